//! CLI command definitions using clap

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use content_guard_core::{GuardrailContext, SafetyLevel, SanitizationOptions};
use content_guard_governance::ContentGuard;

/// Content Guard - validate and sanitize AI-generated text
#[derive(Parser, Debug)]
#[command(name = "content-guard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use the offline classifier (all categories score zero)
    #[arg(long, global = true)]
    pub offline: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print Prometheus metrics to stderr when done
    #[arg(long, global = true)]
    pub print_metrics: bool,

    /// Configuration directory (default.toml, <env>.toml, local.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Who the content is for and what it is grounded on.
#[derive(Args, Debug, Clone)]
pub struct ContextArgs {
    /// Industry (real_estate, finance, healthcare, insurance, legal, ...)
    #[arg(short, long, default_value = "general")]
    pub industry: String,

    /// Content type tag
    #[arg(long, default_value = "")]
    pub content_type: String,

    #[arg(long, default_value = "")]
    pub user: String,

    #[arg(long, default_value = "")]
    pub session: String,

    /// Grounding document; repeatable
    #[arg(long = "source")]
    pub sources: Vec<PathBuf>,
}

impl ContextArgs {
    pub fn to_context(&self) -> anyhow::Result<GuardrailContext> {
        let mut context = GuardrailContext::new(self.industry.as_str())
            .with_content_type(&self.content_type)
            .with_user(&self.user)
            .with_session(&self.session);
        if !self.sources.is_empty() {
            let documents = self
                .sources
                .iter()
                .map(|path| {
                    std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read source document {:?}", path))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            context = context.with_source_documents(documents);
        }
        Ok(context)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline over generated content and print the result as JSON
    ValidateOutput {
        #[command(flatten)]
        context: ContextArgs,

        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Run the injection and harm checks over user input and print the result as JSON
    ValidateInput {
        #[command(flatten)]
        context: ContextArgs,

        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Print whether every harm category is within the level's threshold
    IsSafe {
        /// Safety level (low, medium, high, strict)
        #[arg(short, long, default_value = "medium")]
        level: SafetyLevel,

        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Print a sanitized copy of the text
    Sanitize {
        /// Keep PII in place
        #[arg(long)]
        no_redact_pii: bool,

        /// Drop the text if the classifier still flags it
        #[arg(long)]
        remove_harmful: bool,

        /// Replace removed text with a placeholder instead of nothing
        #[arg(long)]
        preserve_structure: bool,

        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
    },
}

impl Commands {
    pub fn input(&self) -> Option<&PathBuf> {
        match self {
            Commands::ValidateOutput { input, .. }
            | Commands::ValidateInput { input, .. }
            | Commands::IsSafe { input, .. }
            | Commands::Sanitize { input, .. } => input.as_ref(),
        }
    }

    /// Run the command against `text` and return what should be printed.
    pub async fn execute(&self, guard: &ContentGuard, text: &str) -> anyhow::Result<String> {
        match self {
            Commands::ValidateOutput { context, .. } => {
                let result = guard.validate_output(text, &context.to_context()?).await;
                Ok(serde_json::to_string_pretty(&result)?)
            }
            Commands::ValidateInput { context, .. } => {
                let result = guard.validate_input(text, &context.to_context()?).await;
                Ok(serde_json::to_string_pretty(&result)?)
            }
            Commands::IsSafe { level, .. } => Ok(guard.is_content_safe(text, *level).await.to_string()),
            Commands::Sanitize {
                no_redact_pii,
                remove_harmful,
                preserve_structure,
                ..
            } => {
                let options = SanitizationOptions {
                    redact_pii: !no_redact_pii,
                    remove_harmful_content: *remove_harmful,
                    preserve_structure: *preserve_structure,
                };
                Ok(guard.sanitize(text, options).await)
            }
        }
    }
}

/// Read the command's input from a file, or from stdin when none was given.
pub fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read input {:?}", path))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
