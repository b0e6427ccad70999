use crate::attachments::{Bucket, load_candidate};
use crate::auth::{self, SessionStore};
use crate::cli::WriteArgs;
use crate::client::HttpGenerationService;
use crate::config::Config;
use crate::error::{ValidationError, WriterError};
use crate::form::{FieldDescriptor, FormState, WritingStyle};
use crate::ui::prompts::{self, Verdict};
use crate::ui::style as ui;
use crate::workflow::FormSession;
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

const THANK_YOU: &str = "Thank you very much for using our service.";
const NO_DRAFT: &str = "The service responded but no draft was produced.";

/// Answers loaded from `--answers`.
#[derive(Debug, Default, PartialEq)]
pub struct Answers {
    pub style: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl Answers {
    pub fn parse(contents: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(contents).context("answers file is not valid TOML")?;
        let mut answers = Self::default();
        for (key, value) in table {
            let Some(text) = value.as_str() else {
                bail!("answer `{key}` must be a string");
            };
            if key == "style" {
                answers.style = Some(text.to_string());
            } else {
                answers.fields.push((key, text.to_string()));
            }
        }
        Ok(answers)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers file: {}", path.display()))?;
        Self::parse(&contents)
    }
}

fn parse_style(input: &str) -> Result<WritingStyle> {
    WritingStyle::parse_loose(input).with_context(|| {
        format!("Unknown writing style '{input}'. Run `intro-writer fields` to list styles")
    })
}

pub async fn run(config: &Config, args: WriteArgs, interactive: bool) -> Result<()> {
    let store = SessionStore::for_config(config);
    let credential = auth::require(&store)?;

    let service = Arc::new(HttpGenerationService::new(
        &config.service,
        Some(&credential),
    ));
    let mut session = FormSession::from_config(config, service).with_credential(credential);

    let answers = match &args.answers {
        Some(path) => Answers::load(path)?,
        None => Answers::default(),
    };
    apply_answers(config, &mut session, &answers);

    match args.style.as_deref().or(answers.style.as_deref()) {
        Some(style) => session.form_mut().set_style(parse_style(style)?),
        None if interactive => {
            let style = prompts::writing_style(session.form().style())?;
            session.form_mut().set_style(style);
        }
        None => {}
    }

    attach(&mut session, Bucket::TheoreticalFramework, &args.theoretical_framework).await?;
    attach(&mut session, Bucket::RelevantTheory, &args.relevant_theory).await?;
    attach(&mut session, Bucket::SupportingLiterature, &args.supporting_literature).await?;

    let Some(draft) = submit(&mut session, interactive).await? else {
        println!("{}", ui::warning(NO_DRAFT));
        return Ok(());
    };
    print_draft("Proposed introduction", &draft);

    let verdict = if args.accept {
        Verdict::Accept
    } else if args.revision.is_some() {
        Verdict::Reject
    } else if interactive {
        prompts::verdict()?
    } else {
        return Ok(());
    };

    match verdict {
        Verdict::Accept => {
            session.accept().await?;
            println!("  {} {THANK_YOU}", ui::success("✓"));
        }
        Verdict::Reject => {
            session.reject()?;
            if let Some(instructions) = &args.revision {
                session.set_revision_instructions(instructions.clone());
            } else {
                session.set_revision_instructions(prompts::revision_instructions(false)?);
            }
            match revise(&mut session, interactive).await? {
                Some(final_draft) => print_draft("Revised introduction", &final_draft),
                None => println!("{}", ui::warning(NO_DRAFT)),
            }
        }
    }
    Ok(())
}

fn apply_answers(config: &Config, session: &mut FormSession, answers: &Answers) {
    for (key, value) in &answers.fields {
        if !config.form.fields.iter().any(|field| &field.key == key) {
            warn!(field = %key, "ignoring answer for unknown field");
            continue;
        }
        session.form_mut().set_field(key, value.clone());
    }
}

async fn attach(session: &mut FormSession, bucket: Bucket, paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }

    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        candidates.push(load_candidate(bucket, path).await?);
    }

    let outcome = session.add_attachments(bucket, candidates);
    for file in &outcome.accepted {
        println!(
            "  {} {} {}",
            ui::success("✓"),
            ui::value(&file.name),
            ui::dim(format!("({})", bucket.title()))
        );
    }
    for rejection in &outcome.rejected {
        warn!(error = %rejection.to_error(), "attachment rejected");
        println!("  {} {}", ui::warning("!"), ui::warning(rejection.message()));
    }
    Ok(())
}

/// Prompts for every missing required field until the form validates.
async fn submit(session: &mut FormSession, interactive: bool) -> Result<Option<String>> {
    loop {
        match session.submit().await {
            Ok(draft) => return Ok(draft),
            Err(WriterError::Validation(ValidationError::MissingFields { keys, focus }))
                if interactive =>
            {
                println!(
                    "  {} {}",
                    ui::warning("!"),
                    ui::warning("Please fill the highlighted fields.")
                );
                prompt_fields(session, &focus, &keys)?;
            }
            Err(WriterError::Transport(error)) => {
                println!("  {} {}", ui::error("✗"), ui::error(error.user_message()));
                return Err(WriterError::Transport(error).into());
            }
            Err(error) => return Err(error.into()),
        }
    }
}

fn prompt_fields(session: &mut FormSession, focus: &str, keys: &[String]) -> Result<()> {
    for descriptor in fields_to_prompt(session.form(), focus, keys)? {
        let current = session.form().field(&descriptor.key).to_string();
        let invalid = session.form().has_error(&descriptor.key);
        let value = prompts::field(&descriptor, &current, invalid)?;
        session.form_mut().set_field(&descriptor.key, value);
    }
    Ok(())
}

/// Focus field first, then the rest in required order.
///
/// Fails if a missing key has no descriptor, since it could never be filled.
fn fields_to_prompt(form: &FormState, focus: &str, keys: &[String]) -> Result<Vec<FieldDescriptor>> {
    let required = form.required_keys();
    let ordered = std::iter::once(focus.to_string()).chain(
        required
            .into_iter()
            .filter(|key| key != focus && keys.contains(key)),
    );

    ordered
        .map(|key| {
            form.descriptors()
                .iter()
                .find(|field| field.key == key)
                .cloned()
                .with_context(|| {
                    format!("Required field `{key}` is not in form.fields; add it to config.toml")
                })
        })
        .collect()
}

async fn revise(session: &mut FormSession, interactive: bool) -> Result<Option<String>> {
    loop {
        match session.submit_revision().await {
            Ok(draft) => return Ok(draft),
            Err(WriterError::Validation(ValidationError::MissingRevisionInstructions))
                if interactive =>
            {
                let invalid = session.workflow().revision_error();
                session.set_revision_instructions(prompts::revision_instructions(invalid)?);
            }
            Err(WriterError::Transport(error)) => {
                println!("  {} {}", ui::error("✗"), ui::error(error.user_message()));
                return Err(WriterError::Transport(error).into());
            }
            Err(error) => return Err(error.into()),
        }
    }
}

fn print_draft(title: &str, draft: &str) {
    println!();
    println!("  {}", ui::header(title));
    println!();
    for line in draft.lines() {
        println!("  {line}");
    }
    println!();
}
