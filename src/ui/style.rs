use console::style;
use std::fmt::Display;

/// Green bold: checkmarks, accepted files
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: section headers, draft titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: hints, secondary text
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: warnings, rejected files
pub fn warning<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Red bold: failed requests
pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Green: paths, user names, config values
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: bullets
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan: form field labels
pub fn label<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Cyan underlined: service URLs
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}

/// Field label with a red marker when the field failed validation.
pub fn field_label(label_text: &str, required: bool, invalid: bool) -> String {
    let marker = if required { " *" } else { "" };
    if invalid {
        format!("{}{}", error(label_text), error(marker))
    } else {
        format!("{}{}", label(label_text), dim(marker))
    }
}
