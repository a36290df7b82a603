use crate::predict::{
    run_corpus_export, run_corpus_stats, run_predict, CorpusExportArgs, CorpusStatsArgs,
    PredictArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use juribank_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "JuriBank",
    about = "Estimate outcomes of UK banking complaints from historical case statistics",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single case and print the estimate
    Predict(PredictArgs),
    /// Work with the synthetic historical corpus
    Corpus {
        #[command(subcommand)]
        command: CorpusCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CorpusCommand {
    /// Generate a corpus and write it as CSV
    Export(CorpusExportArgs),
    /// Print per-category statistics for a generated or imported corpus
    Stats(CorpusStatsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Corpus {
            command: CorpusCommand::Export(args),
        } => run_corpus_export(args),
        Command::Corpus {
            command: CorpusCommand::Stats(args),
        } => run_corpus_stats(args),
    }
}
