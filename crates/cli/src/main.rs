use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use srcgraph_db::{CsvAssembler, ScriptWriter, Session};
use srcgraph_ingest::FileIngest;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "srcgraph")]
#[command(about = "Ingest JavaScript sources into a property graph", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest sources and write a replayable statement script
    Ingest(IngestArgs),

    /// Ingest sources and write bulk-import CSV files
    #[command(name = "export-csv")]
    ExportCsv(ExportCsvArgs),
}

#[derive(Args)]
struct IngestArgs {
    /// File or directory to ingest
    path: PathBuf,

    /// Session identifier (random when omitted)
    #[arg(long)]
    session: Option<String>,

    /// Commit hash to stamp before ingesting
    #[arg(long)]
    commit: Option<String>,

    /// Statement script output path (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct ExportCsvArgs {
    /// File or directory to ingest
    path: PathBuf,

    /// Session identifier (random when omitted)
    #[arg(long)]
    session: Option<String>,

    /// Directory for nodes.csv and relationships.csv
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Ingest(args) => run_ingest(args),
        Commands::ExportCsv(args) => run_export_csv(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn session_id(requested: Option<String>) -> String {
    requested.unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Collect JavaScript sources under `path` (or `path` itself for a file)
fn collect_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry.with_context(|| format!("walking {}", path.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_js = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "js" | "mjs" | "cjs"));
        if is_js {
            sources.push(entry.path().to_path_buf());
        }
    }
    sources.sort();

    log::info!("Found {} source files", sources.len());
    Ok(sources)
}

fn run_ingest(args: IngestArgs) -> Result<()> {
    let session = session_id(args.session);
    let sources = collect_sources(&args.path)?;

    let writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut db = Session::new(ScriptWriter::new(writer));

    if let Some(commit) = &args.commit {
        db.set_commit_hash(commit)?;
    }

    let mut ingest = FileIngest::new()?;
    let mut failed = 0usize;
    for source in &sources {
        let content = std::fs::read_to_string(source)
            .with_context(|| format!("reading {}", source.display()))?;
        let path = source.to_string_lossy();

        match ingest.ingest_source(&session, &path, &content) {
            Ok(query) => {
                db.run(&query)?;
            }
            Err(e) => {
                log::error!("{path}: {e}");
                failed += 1;
            }
        }
    }

    log::info!(
        "Ingested {} files ({} failed), session {}",
        sources.len() - failed,
        failed,
        session
    );
    Ok(())
}

fn run_export_csv(args: ExportCsvArgs) -> Result<()> {
    let session = session_id(args.session);
    let sources = collect_sources(&args.path)?;

    let mut ingest = FileIngest::new()?;
    let mut assembler = CsvAssembler::new();
    for source in &sources {
        let content = std::fs::read_to_string(source)
            .with_context(|| format!("reading {}", source.display()))?;
        let path = source.to_string_lossy();

        if let Err(e) = ingest.ingest_source_csv(&mut assembler, &session, &path, &content) {
            log::error!("{path}: {e}");
        }
    }

    assembler.write_to(&args.out)?;
    log::info!(
        "Exported {} nodes, {} relationships to {}",
        assembler.node_count(),
        assembler.relationship_count(),
        args.out.display()
    );
    Ok(())
}
