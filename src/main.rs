use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use modscope::analysis::run_full_analysis;
use modscope::bus::LocalBus;
use modscope::config::AnalyzerConfig;
use modscope::export::{export, ExportData, ExportFormat};
use modscope::snapshot::Snapshot;
use modscope::tasks::IdentityApplier;
use modscope::workbench::Workbench;

#[derive(Parser)]
#[command(name = "modscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Static modularity analyzer for TypeScript/JavaScript codebases", long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct Source {
    /// Directory to analyze (defaults to current directory)
    #[arg(short, long, conflicts_with = "seed")]
    path: Option<PathBuf>,

    /// Analyze the built-in demo codebase instead of a directory
    #[arg(long)]
    seed: bool,

    /// JSON file overriding analyzer settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a codebase and print the report
    Analyze {
        #[command(flatten)]
        source: Source,

        /// Output format: json or markdown
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },
    /// List the refactoring tasks offered for a selected file
    Tasks {
        /// Snapshot-relative path of the selected file
        #[arg(long)]
        file: String,

        #[command(flatten)]
        source: Source,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Analyze { source, format }) => analyze(&source, format),
        Some(Commands::Tasks { file, source }) => tasks(&source, &file),
        Some(Commands::Version) => {
            println!("modscope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("modscope - static modularity analyzer");
            println!("Run 'modscope analyze' to analyze the current directory");
            println!("Run 'modscope --help' for more information");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load(source: &Source) -> Result<(String, Snapshot, AnalyzerConfig)> {
    let config = match &source.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    if source.seed {
        return Ok(("seed".to_string(), Snapshot::seed(), config));
    }

    let root = source.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let snapshot = Snapshot::from_directory(&root)
        .with_context(|| format!("Failed to read sources under {}", root.display()))?;
    Ok((project_name(&root), snapshot, config))
}

fn project_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| root.display().to_string())
}

fn analyze(source: &Source, format: ExportFormat) -> Result<()> {
    let (name, snapshot, config) = load(source)?;
    let result = run_full_analysis(&snapshot, &config).context("Analysis failed")?;
    let data = ExportData::new(name, snapshot.len(), result, &config);

    let stdout = io::stdout();
    export(format, &data, &mut stdout.lock()).context("Failed to write report")?;
    Ok(())
}

fn tasks(source: &Source, file: &str) -> Result<()> {
    let (_, snapshot, config) = load(source)?;
    let mut workbench = Workbench::new(
        snapshot,
        config,
        Rc::new(LocalBus::new()),
        Box::new(IdentityApplier),
    );

    workbench.run_analysis().context("Analysis failed")?;
    workbench
        .select_file(file)
        .with_context(|| format!("Cannot select {file}"))?;

    let json = serde_json::to_string_pretty(&workbench.all_tasks())?;
    println!("{json}");
    Ok(())
}
