//! CLI command definitions.

use crate::core::{GenerationRequest, StageKind, DEFAULT_WORD_COUNT};
use crate::events::LoggingEventSink;
use crate::gateway::OpenAiGateway;
use crate::pipeline::{BlogPipeline, PipelineConfig};
use crate::prompts::{BrandGuidelines, PromptBuilder};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Turn a short brief into a long-form blog article.
#[derive(Parser, Debug)]
#[command(name = "blogflow")]
#[command(about = "Research, draft, optimize and edit a blog article with an LLM")]
#[command(version)]
#[command(
    long_about = "blogflow runs a four-stage LLM pipeline (research, draft, SEO optimize, edit) for one brief.\n\nThe model service is configured through OPENAI_API_KEY, OPENAI_BASE_URL, OPENAI_MODEL and OPENAI_TIMEOUT_SECONDS.\n\nExample usage:\n  blogflow run --topic \"Pet-Friendly Beaches\" --keywords \"dog beaches\" --branded"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline and print the result as JSON.
    Run(RunArgs),

    /// Print the rendered prompt of one stage without calling a model.
    Prompts(PromptsArgs),
}

/// Fields of the generation brief.
#[derive(clap::Args, Debug, Clone)]
pub struct RequestArgs {
    /// Article topic.
    #[arg(short, long)]
    pub topic: String,

    /// Comma-separated primary keywords.
    #[arg(short, long, default_value = "")]
    pub keywords: String,

    /// Target audience.
    #[arg(short, long, default_value = "")]
    pub audience: String,

    /// Call to action quoted in the draft.
    #[arg(long, default_value = "")]
    pub cta: String,

    /// Desired article length in words.
    #[arg(short = 'w', long, default_value_t = DEFAULT_WORD_COUNT)]
    pub word_count: u32,

    /// Requester identity.
    #[arg(long, default_value = "")]
    pub requester: String,

    /// Explicit task id (synthesized when omitted).
    #[arg(long)]
    pub task_id: Option<String>,

    /// Planned publication date.
    #[arg(long)]
    pub publish_date: Option<String>,

    /// Use the Effortless Travel Now brand guidelines.
    #[arg(long)]
    pub branded: bool,

    /// JSON pipeline configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl RequestArgs {
    /// Builds the generation request.
    pub fn to_request(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new(&self.topic)
            .with_keywords(&self.keywords)
            .with_audience(&self.audience)
            .with_call_to_action(&self.cta)
            .with_word_count(self.word_count)
            .with_requester(&self.requester);
        request.task_id.clone_from(&self.task_id);
        request.publish_date.clone_from(&self.publish_date);
        request
    }

    /// Loads the configuration file, then applies `--branded`.
    pub fn to_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if self.branded {
            config.brand = BrandGuidelines::effortless_travel_now();
        }
        Ok(config)
    }
}

/// Arguments for `blogflow run`.
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// The brief.
    #[command(flatten)]
    pub request: RequestArgs,

    /// Write the result to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include per-stage reports in the output.
    #[arg(long)]
    pub report: bool,
}

/// Arguments for `blogflow prompts`.
#[derive(clap::Args, Debug)]
pub struct PromptsArgs {
    /// The brief.
    #[command(flatten)]
    pub request: RequestArgs,

    /// Stage to render.
    #[arg(short, long, default_value = "research", value_parser = parse_stage)]
    pub stage: StageKind,

    /// Text standing in for the previous stage's output.
    #[arg(long, default_value = "<previous stage output>")]
    pub upstream: String,
}

fn parse_stage(raw: &str) -> Result<StageKind, String> {
    StageKind::ALL
        .into_iter()
        .find(|s| s.to_string() == raw.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown stage '{raw}' (expected research, draft, optimize or edit)"))
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Runs the parsed command.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run_pipeline(args).await,
        Commands::Prompts(args) => print_prompt(&args),
    }
}

async fn run_pipeline(args: RunArgs) -> anyhow::Result<()> {
    let config = args.request.to_config()?;
    let request = args.request.to_request();
    let gateway = OpenAiGateway::from_env().context("Failed to configure model gateway")?;
    info!(model = gateway.model(), branded = !config.brand.is_empty(), "Configured pipeline");

    let pipeline = BlogPipeline::with_config(Arc::new(gateway), config)
        .with_events(Arc::new(LoggingEventSink::debug()));

    let json = if args.report {
        let run = pipeline.run_pipeline_with_report(&request).await?;
        serde_json::to_string_pretty(&run)?
    } else {
        let result = pipeline.run_pipeline(&request).await?;
        serde_json::to_string_pretty(&result)?
    };

    match &args.output {
        Some(path) => write_output(path, &json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote result");
    Ok(())
}

fn print_prompt(args: &PromptsArgs) -> anyhow::Result<()> {
    let config = args.request.to_config()?;
    let request = args.request.to_request();
    request.validate()?;

    let prompt = PromptBuilder::new(&config.brand).render(args.stage, &request, &args.upstream);
    println!("=== system ({}) ===\n{}\n\n=== user ===\n{}", prompt.stage, prompt.system, prompt.user);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_args_to_request() {
        let cli = Cli::parse_from([
            "blogflow", "run", "--topic", "Pet-Friendly Beaches", "--keywords", "dog beaches",
            "--cta", "Book now", "-w", "1500", "--task-id", "T-1",
        ]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        let request = args.request.to_request();
        assert_eq!(request.topic, "Pet-Friendly Beaches");
        assert_eq!(request.desired_word_count, 1500);
        assert_eq!(request.task_id.as_deref(), Some("T-1"));
        assert_eq!(request.call_to_action, "Book now");
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_prompts_stage_parser() {
        let cli = Cli::parse_from(["blogflow", "prompts", "--topic", "x", "--stage", "Optimize", "--branded"]);
        let Commands::Prompts(args) = cli.command else {
            panic!("expected prompts");
        };
        assert_eq!(args.stage, StageKind::Optimize);
        assert!(!args.request.to_config().unwrap().brand.is_empty());
    }

    #[test]
    fn test_unknown_stage_rejected() {
        assert!(parse_stage("publish").is_err());
    }
}
