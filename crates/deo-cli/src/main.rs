use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use deo_core::{DocumentPipeline, FallbackSynthesizer, InMemoryStore, PipelineConfig};
use deo_generation::{AnthropicBackend, AnthropicConfig, GenerationBackend, OfflineBackend};
use deo_model::{DesignWeek, DocumentType, SystemClock};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Design week JSON file")
}

fn cli() -> Command {
    Command::new("deo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Digital Employee document generator")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate, validate and store a document for a design week")
                .arg(input_arg())
                .arg(
                    Arg::new("document-type")
                        .long("document-type")
                        .short('t')
                        .default_value("DESIGN_DOCUMENT")
                        .value_parser(|s: &str| s.parse::<DocumentType>())
                        .help("DESIGN_DOCUMENT, EXECUTIVE_BRIEF or TECHNICAL_SPECIFICATION"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(value_parser!(PathBuf))
                        .help("Pipeline config TOML file"),
                )
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .action(ArgAction::SetTrue)
                        .help("Skip the backend and synthesize the fallback document"),
                ),
        )
        .subcommand(
            Command::new("prompt")
                .about("Print the generation request for a design week")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("fallback")
                .about("Print the synthesized fallback content for a design week")
                .arg(input_arg()),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_design_week(path: &Path) -> Result<DesignWeek> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read design week from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid design week", path.display()))
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path).context("failed to load pipeline config"),
        None => Ok(PipelineConfig::default().with_env_overrides()),
    }
}

fn build_backend(config: &PipelineConfig, offline: bool) -> Result<Arc<dyn GenerationBackend>> {
    if offline {
        return Ok(Arc::new(OfflineBackend));
    }
    let anthropic = AnthropicConfig::default().with_model(config.model.clone());
    let backend = AnthropicBackend::new(anthropic).context("failed to configure generation backend")?;
    Ok(Arc::new(backend))
}

fn required_path(args: &ArgMatches) -> Result<&PathBuf> {
    args.get_one::<PathBuf>("input").context("missing --input")
}

async fn run_generate(args: &ArgMatches) -> Result<()> {
    let week = load_design_week(required_path(args)?)?;
    let document_type = args
        .get_one::<DocumentType>("document-type")
        .copied()
        .unwrap_or(DocumentType::DesignDocument);
    let config = load_config(args.get_one::<PathBuf>("config"))?;
    let backend = build_backend(&config, args.get_flag("offline"))?;

    let store = Arc::new(InMemoryStore::new());
    let id = week.id;
    store.insert_design_week(week);

    let pipeline = DocumentPipeline::new(config, backend, store, Arc::new(SystemClock))?;
    let output = pipeline.generate(id, document_type).await?;

    for warning in &output.warnings {
        tracing::warn!("{warning}");
    }
    if !output.missing_fields.is_empty() {
        tracing::info!(missing = ?output.missing_fields, "required items not captured");
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_prompt(args: &ArgMatches) -> Result<()> {
    let week = load_design_week(required_path(args)?)?;
    let ctx = deo_mapper::map_design_week(&week);
    println!("{}", deo_prompt::assemble_prompt(&ctx));
    Ok(())
}

fn run_fallback(args: &ArgMatches) -> Result<()> {
    let week = load_design_week(required_path(args)?)?;
    let ctx = deo_mapper::map_design_week(&week);
    let content = FallbackSynthesizer::new(Arc::new(SystemClock)).synthesize(&ctx, None);
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("generate", args)) => run_generate(args).await,
        Some(("prompt", args)) => run_prompt(args),
        Some(("fallback", args)) => run_fallback(args),
        _ => Ok(()),
    }
}
