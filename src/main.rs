mod agents;
mod aggregate;
mod chat;
mod cli;
mod config;
mod error;
mod narrative;
mod pipeline;
mod report;
mod scan;
mod store;
mod types;

use crate::error::{Result, ScoreError};
use crate::narrative::{CommandGenerator, Role, Style};
use crate::store::cache::AnalysisCache;
use crate::store::history::History;
use crate::types::config::ScoreConfig;
use crate::types::evidence::Evidence;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: cli::Cli) -> Result<i32> {
    match cli.command {
        cli::Commands::Score(cmd) => {
            let config = load_config(&cmd.source.path)?;
            let evidence = load_evidence(&cmd.source, &config)?;
            let report = pipeline::score(&evidence, Utc::now());
            let rendered =
                report::render_score(&report, &evidence.repo_meta, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Payload(cmd) => {
            let config = load_config(&cmd.source.path)?;
            let evidence = load_evidence(&cmd.source, &config)?;
            let (style, role) = narrative_choice(&cmd.narrative, &config)?;
            let report = pipeline::score(&evidence, Utc::now());
            let request = narrative::build_request(&evidence, &report, style, &role);
            println!("{}", serde_json::to_string_pretty(&request.to_payload()?)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Analyze(cmd) => {
            let config = load_config(&cmd.source.path)?;
            let evidence = load_evidence(&cmd.source, &config)?;
            let (style, role) = narrative_choice(&cmd.narrative, &config)?;
            let data_dir =
                store::resolve_data_dir(cli.data_dir.as_deref(), config.storage.dir.as_deref());
            let now = Utc::now();

            let cache = (config.cache_enabled() && !cmd.no_cache)
                .then(|| AnalysisCache::new(&data_dir));
            let key = AnalysisCache::key(&evidence, style, &role, now)?;
            let cached = cache.as_ref().and_then(|cache| cache.get(&key));

            let analysis = match cached {
                Some(analysis) => {
                    tracing::info!(repo = %evidence.repo_meta.full_name, "using cached analysis");
                    analysis
                }
                None => {
                    let generator = resolve_generator(&cmd.generator, &config)?;
                    let analysis = pipeline::analyze(&evidence, style, &role, &generator, now)?;
                    if let Some(cache) = &cache {
                        cache.put(&key, &analysis)?;
                    }
                    analysis
                }
            };

            let rendered = report::render_analysis(
                &analysis,
                &evidence.repo_meta,
                output_format(&cmd.format),
            )?;
            println!("{rendered}");

            if !cmd.no_history {
                let history = History::new(&data_dir, config.history_limit());
                let item = history.save(&evidence.repo_meta, &analysis, now)?;
                eprintln!("history id: {}", item.id);
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Chat(cmd) => {
            let config = load_config(&PathBuf::from("."))?;
            let data_dir =
                store::resolve_data_dir(cli.data_dir.as_deref(), config.storage.dir.as_deref());
            let history = History::new(&data_dir, config.history_limit());
            let item = history.get(&cmd.id)?;
            let generator = resolve_generator(&cmd.generator, &config)?;

            let conversation_path = data_dir
                .join("conversations")
                .join(format!("{}.json", item.id));
            let conversation = if cmd.reset || !conversation_path.exists() {
                chat::Conversation::greeting(&item.repo.full_name)
            } else {
                serde_json::from_str(&std::fs::read_to_string(&conversation_path)?)?
            };

            let context = chat::ChatContext::new(&item.repo, &item.analysis);
            let (conversation, reply) =
                chat::send(&conversation, &context, &cmd.message, &generator)?;
            store::write_json(&conversation_path, &conversation)?;
            println!("{reply}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::History(cmd) => {
            let config = load_config(&PathBuf::from("."))?;
            let data_dir =
                store::resolve_data_dir(cli.data_dir.as_deref(), config.storage.dir.as_deref());
            let history = History::new(&data_dir, config.history_limit());
            match cmd.action {
                cli::HistoryAction::List => {
                    let items = history.list()?;
                    if items.is_empty() {
                        println!("history: no entries");
                    }
                    for item in items {
                        println!(
                            "{} {:>3} {} [{} / {}] {}",
                            item.id,
                            item.score,
                            item.repo.full_name,
                            item.analysis.summary_style,
                            item.analysis.role,
                            item.timestamp.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
                cli::HistoryAction::Delete { id } => {
                    history.delete(&id)?;
                    println!("deleted {id}");
                }
                cli::HistoryAction::Clear => {
                    history.clear()?;
                    println!("history cleared");
                }
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn load_config(path: &std::path::Path) -> Result<ScoreConfig> {
    if !path.exists() {
        return Err(ScoreError::PathNotFound(path.display().to_string()));
    }
    config::load_config(path)
}

fn load_evidence(source: &cli::EvidenceArgs, config: &ScoreConfig) -> Result<Evidence> {
    match &source.evidence {
        Some(snapshot) => scan::load_snapshot(snapshot),
        None => Ok(scan::discover(&source.path, config)),
    }
}

fn narrative_choice(args: &cli::NarrativeArgs, config: &ScoreConfig) -> Result<(Style, Role)> {
    let style = match &args.style {
        Some(style) => style.parse::<Style>().map_err(ScoreError::ConfigParse)?,
        None => config.style()?,
    };
    let role = match &args.role {
        Some(role) => Role::from(role.as_str()),
        None => config.role(),
    };
    Ok((style, role))
}

fn resolve_generator(args: &cli::GeneratorArgs, config: &ScoreConfig) -> Result<CommandGenerator> {
    match &args.generator {
        Some(program) => Ok(CommandGenerator::new(program, args.generator_args.clone())),
        None => config
            .narrative
            .command
            .as_ref()
            .map(|program| CommandGenerator::new(program, config.narrative.args.clone()))
            .ok_or(ScoreError::GeneratorNotConfigured),
    }
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
