use crate::app::status::{render_fields, render_status};
use crate::auth::{self, AuthGuard, GuardDecision, Route, SessionStore};
use crate::cli::{Cli, Commands};
use crate::client::{AuthApi, RegisterRequest};
use crate::config::Config;
use crate::error::{AuthError, WriterError};
use crate::ui::prompts;
use crate::ui::style as ui;
use anyhow::Result;
use std::io::IsTerminal;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let store = SessionStore::for_config(&config);

    match cli.command {
        Commands::Login { email } => {
            if already_signed_in(&store) {
                return Ok(());
            }
            let email = match email {
                Some(email) => email,
                None => prompts::text("Email")?,
            };
            let password = prompts::password("Password")?;
            let api = AuthApi::new(&config.service);
            let credential = auth::login(&api, &store, &email, &password)
                .await
                .map_err(report_auth_error)?;
            println!(
                "  {} Signed in as {}",
                ui::success("✓"),
                ui::value(credential.user().display_name())
            );
            Ok(())
        }

        Commands::Register { email, name } => {
            if already_signed_in(&store) {
                return Ok(());
            }
            let email = match email {
                Some(email) => email,
                None => prompts::text("Email")?,
            };
            let name = match name {
                Some(name) => name,
                None => prompts::text("Name")?,
            };
            let (password, confirm_password) = prompts::confirmed_password()?;
            let api = AuthApi::new(&config.service);
            let request = RegisterRequest {
                email,
                password,
                name,
                confirm_password,
            };
            let credential = auth::register(&api, &store, &request)
                .await
                .map_err(report_auth_error)?;
            println!(
                "  {} Registered and signed in as {}",
                ui::success("✓"),
                ui::value(credential.user().display_name())
            );
            Ok(())
        }

        Commands::Logout => {
            if auth::logout(&store)? {
                println!("  {} Signed out", ui::success("✓"));
            } else {
                println!("  {}", ui::dim("No stored session."));
            }
            Ok(())
        }

        Commands::Status => {
            println!("{}", render_status(&config, &store));
            Ok(())
        }

        Commands::Fields => {
            println!("{}", render_fields(&config));
            Ok(())
        }

        Commands::Write(args) => {
            let interactive = !args.no_input && std::io::stdin().is_terminal();
            crate::app::write::run(&config, args, interactive)
                .await
                .map_err(|error| {
                    if let Some(WriterError::Auth(AuthError::NotAuthenticated)) =
                        error.downcast_ref::<WriterError>()
                    {
                        println!(
                            "  {} {}",
                            ui::warning("!"),
                            ui::warning(format!("Redirecting to {}.", Route::Login))
                        );
                    }
                    error
                })
        }
    }
}

fn already_signed_in(store: &SessionStore) -> bool {
    if AuthGuard::redirect_if_authenticated(store) == GuardDecision::Redirect(Route::Dashboard) {
        println!(
            "  {} {}",
            ui::dim("Already signed in."),
            ui::dim("Run `intro-writer logout` first to switch accounts.")
        );
        return true;
    }
    false
}

fn report_auth_error(error: WriterError) -> anyhow::Error {
    match &error {
        WriterError::Auth(AuthError::Rejected {
            message,
            field_errors,
        }) => {
            println!("  {} {}", ui::error("✗"), ui::error(message));
            for (field, text) in field_errors {
                println!("    {} {}", ui::label(field), ui::warning(text));
            }
        }
        WriterError::Auth(AuthError::PasswordMismatch) => {
            println!("  {} {}", ui::error("✗"), ui::error("Passwords do not match."));
        }
        _ => {}
    }
    error.into()
}
