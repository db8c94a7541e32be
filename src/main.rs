use clap::{Parser, Subcommand};
use ftc_scout_export::config::{ConfigArgs, ScoutConfig, ServeArgs};
use ftc_scout_export::export::write_export;
use ftc_scout_export::fetch::fetch_teams;
use ftc_scout_export::format::format_rows;
use ftc_scout_export::ingest::ingest_files;
use ftc_scout_export::io::graphql::ScoutClient;
use ftc_scout_export::model::{TeamNumber, TeamNumberSet};
use ftc_scout_export::server::{self, AppState};
use ftc_scout_export::{Result, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    logging::init(&cli.log_level)?;
    let config = ScoutConfig::from(cli.config);
    let client = ScoutClient::new(config.api_url.clone(), config.season);

    match cli.command {
        Command::Serve(args) => server::serve(args.bind, AppState::new(client, config)).await,
        Command::Export(args) => {
            let teams = TeamNumberSet::new(args.teams)?;
            let records = fetch_teams(&client, &teams).await;
            let rows = format_rows(&records, &teams);
            write_export(&config.export, rows)?;
            println!("{}", config.export.path.display());
            Ok(())
        }
        Command::Ingest => {
            let files = ingest_files(&config.ingest_paths);
            println!("{}", serde_json::to_string_pretty(&files)?);
            Ok(())
        }
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Collect FTC match scores for a set of teams and export them to Excel."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Fetch the given teams once and write the export file.
    Export(ExportArgs),
    /// Print the local spreadsheets as JSON.
    Ingest,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Team number to include. Repeatable.
    #[arg(long = "team", required = true)]
    teams: Vec<TeamNumber>,
}
