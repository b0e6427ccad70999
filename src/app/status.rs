use crate::auth::{AuthGuard, GuardDecision, SessionStore};
use crate::config::Config;
use crate::form::WritingStyle;
use strum::IntoEnumIterator;

pub fn render_status(config: &Config, store: &SessionStore) -> String {
    let session = match AuthGuard::check(store) {
        GuardDecision::Render(credential) => {
            format!("signed in as {}", credential.user().display_name())
        }
        GuardDecision::Redirect(_) | GuardDecision::Proceed => "not signed in".to_string(),
    };

    let mut lines = vec![
        "◆ intro-writer status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        format!("Session     {session}"),
        format!(
            "Encryption  {}",
            if config.secrets.encrypt { "on" } else { "off" }
        ),
        String::new(),
        format!("  Service     {}", config.service.generate_url()),
        format!("  Draft path  {}", config.service.draft_path),
        format!(
            "  Timeouts    {}s request, {}s connect",
            config.service.timeout_secs, config.service.connect_timeout_secs
        ),
        format!("  Max upload  {}MB", config.attachments.max_file_size_mb),
        format!(
            "  Remote delete {}",
            if config.attachments.confirm_remote_delete {
                "confirmed by service"
            } else {
                "local only"
            }
        ),
        format!("  Style       {}", config.form.default_style),
    ];

    let required = config.form.fields.iter().filter(|f| f.required).count();
    lines.push(format!(
        "  Fields      {} ({required} required)",
        config.form.fields.len()
    ));

    lines.join("\n")
}

pub fn render_fields(config: &Config) -> String {
    let mut lines = vec!["Fields:".to_string()];
    for field in &config.form.fields {
        let marker = if field.is_custom_style() {
            " (custom style only)"
        } else if field.required {
            " (required)"
        } else {
            ""
        };
        lines.push(format!("  - {}: {}{marker}", field.key, field.label));
    }

    lines.push(String::new());
    lines.push("Writing styles:".to_string());
    for style in WritingStyle::iter() {
        lines.push(format!("  - {}: {style}", style.slug()));
    }
    lines.join("\n")
}
