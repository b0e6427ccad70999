use anyhow::Result;
use dialoguer::{Input, Password, Select};

use crate::form::{FieldDescriptor, WritingStyle};
use crate::ui::style as ui;
use strum::IntoEnumIterator;

/// What the user decided about a proposed draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

pub fn password(prompt: &str) -> Result<String> {
    Ok(Password::new()
        .with_prompt(format!("  {prompt}"))
        .interact()?)
}

pub fn confirmed_password() -> Result<(String, String)> {
    let first = password("Password")?;
    let second = password("Confirm password")?;
    Ok((first, second))
}

pub fn text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(format!("  {prompt}"))
        .interact_text()?)
}

/// Empty input is allowed; validation happens on submit.
pub fn field(descriptor: &FieldDescriptor, current: &str, invalid: bool) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(format!(
            "  {}",
            ui::field_label(&descriptor.label, descriptor.required, invalid)
        ))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}

pub fn writing_style(current: WritingStyle) -> Result<WritingStyle> {
    let styles: Vec<WritingStyle> = WritingStyle::iter().collect();
    let labels: Vec<String> = styles.iter().map(ToString::to_string).collect();
    let default = styles.iter().position(|s| *s == current).unwrap_or(0);

    let choice = Select::new()
        .with_prompt("  Writing style")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(styles.get(choice).copied().unwrap_or(current))
}

pub fn verdict() -> Result<Verdict> {
    let choice = Select::new()
        .with_prompt("  Does this introduction work for you?")
        .items(&["Yes, accept it", "No, request changes"])
        .default(0)
        .interact()?;
    Ok(if choice == 0 {
        Verdict::Accept
    } else {
        Verdict::Reject
    })
}

pub fn revision_instructions(invalid: bool) -> Result<String> {
    let prompt = if invalid {
        ui::error("What should change? (required)")
    } else {
        ui::label("What should change?")
    };
    Ok(Input::<String>::new()
        .with_prompt(format!("  {prompt}"))
        .allow_empty(true)
        .interact_text()?)
}
