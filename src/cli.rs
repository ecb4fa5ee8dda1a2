use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "reposcore",
    version,
    about = "Deterministic repository quality scoring with narrative feedback"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding the analysis cache, history and conversations
    #[arg(long, global = true, env = "REPOSCORE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the agents and the aggregator without any narrative
    Score(ScoreCommand),
    /// Print the request payload the narrative generator would receive
    Payload(PayloadCommand),
    /// Full analysis: scores plus generated summary, strengths, weaknesses and roadmap
    Analyze(AnalyzeCommand),
    /// Ask the mentor about an analysis stored in history
    Chat(ChatCommand),
    /// Inspect or edit the analysis history
    History(HistoryCommand),
}

#[derive(Args)]
pub struct EvidenceArgs {
    /// Repository checkout to evaluate
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Read evidence from a JSON snapshot instead of scanning the checkout
    #[arg(long)]
    pub evidence: Option<PathBuf>,
}

#[derive(Args)]
pub struct NarrativeArgs {
    /// Summary style: Clarity, Naturalness, Professional or Informativeness
    #[arg(long)]
    pub style: Option<String>,

    /// Audience: Student, Mentor, Recruiter, Developer or any other role
    #[arg(long)]
    pub role: Option<String>,
}

#[derive(Args)]
pub struct GeneratorArgs {
    /// Program that turns a JSON payload on stdin into a reply on stdout
    #[arg(long)]
    pub generator: Option<String>,

    /// Argument passed to the generator program (repeatable)
    #[arg(long = "generator-arg", allow_hyphen_values = true)]
    pub generator_args: Vec<String>,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[command(flatten)]
    pub source: EvidenceArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct PayloadCommand {
    #[command(flatten)]
    pub source: EvidenceArgs,
    #[command(flatten)]
    pub narrative: NarrativeArgs,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    pub source: EvidenceArgs,
    #[command(flatten)]
    pub narrative: NarrativeArgs,
    #[command(flatten)]
    pub generator: GeneratorArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Skip the analysis cache
    #[arg(long)]
    pub no_cache: bool,
    /// Do not record the analysis in history
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Args)]
pub struct ChatCommand {
    /// History entry id (see `history list`)
    pub id: String,
    #[arg(short, long)]
    pub message: String,
    /// Start a fresh conversation instead of continuing the stored one
    #[arg(long)]
    pub reset: bool,
    #[command(flatten)]
    pub generator: GeneratorArgs,
}

#[derive(Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List past analyses, newest first
    List,
    /// Remove one entry
    Delete { id: String },
    /// Remove every entry
    Clear,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
