use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use eyre::{Context, Result, eyre};
use requeststore::{Config, DateZone, FileSource, ListingStore, RequestStatus, StatusFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "requeststore")]
#[command(about = "RequestStore CLI - List, filter and update requests loaded from a JSON payload")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Config file (default: <config dir>/requeststore/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request payload: a JSON array, or JSONL when the extension is .jsonl
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Render dates in UTC instead of the local time zone
    #[arg(long)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the listing
    List {
        /// All, Pending, Approved or Denied
        #[arg(short, long)]
        filter: Option<StatusFilter>,
    },

    /// Change a request's status and show the resulting listing
    SetStatus {
        id: u64,
        /// Pending, Approved or Denied
        status: RequestStatus,
        /// Filter active before the change
        #[arg(short, long)]
        filter: Option<StatusFilter>,
    },

    /// Remove a request and show the resulting listing
    Remove {
        id: u64,
        #[arg(short, long)]
        filter: Option<StatusFilter>,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source = Some(source);
    }
    if cli.utc {
        config.timezone = DateZone::Utc;
    }

    let path = config
        .source
        .clone()
        .ok_or_else(|| eyre!("No request source given (use --source or set `source` in the config file)"))?;

    let mut store = ListingStore::new(&config);
    store
        .load_from(&FileSource::new(&path))
        .with_context(|| format!("Failed to load requests from {}", path.display()))?;

    match cli.command {
        Commands::List { filter } => {
            store.set_filter(filter.unwrap_or(config.default_filter));
        }
        Commands::SetStatus { id, status, filter } => {
            store.set_filter(filter.unwrap_or(config.default_filter));
            if !store.set_status(id, status) {
                eprintln!("No request with id {}", id);
            }
        }
        Commands::Remove { id, filter } => {
            store.set_filter(filter.unwrap_or(config.default_filter));
            if !store.remove(id) {
                eprintln!("No request with id {}", id);
            }
        }
    }

    print_listing(&store);
    Ok(())
}

fn print_listing(store: &ListingStore) {
    let title_width = store
        .visible()
        .iter()
        .map(|r| r.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("TITLE".len());

    println!("Filter: {}", store.active_filter().to_string().bold());
    println!(
        "{:>6}  {:<title_width$}  {:<8}  {:<10}  {:<10}",
        "ID", "TITLE", "STATUS", "UPDATED", "CREATED"
    );

    for request in store.visible() {
        println!(
            "{:>6}  {:<title_width$}  {}  {:<10}  {:<10}",
            request.id,
            request.title,
            colorize(request.status),
            request.updated_at,
            request.created_at
        );
    }

    let summary: Vec<String> = store
        .counts()
        .iter()
        .map(|(status, count)| format!("{} {}", count, status))
        .collect();
    println!("{} shown, {}", store.visible().len(), summary.join(", "));
}

fn colorize(status: RequestStatus) -> ColoredString {
    let padded = format!("{:<8}", status.as_str());
    match status {
        RequestStatus::Pending => padded.yellow(),
        RequestStatus::Approved => padded.green(),
        RequestStatus::Denied => padded.red(),
    }
}
