//! BuildForge - multi-platform build orchestration
//!
//! Thin CLI over the build core. It initializes:
//! - Logging infrastructure (rotating file + console output)
//! - Tokio runtime (backend subprocess execution)
//! - Settings loading ([`SettingsManager`])
//! - The [`BuildOrchestrator`] wired to the stock collaborators:
//!   [`CommandBackend`], [`YamlDefineStore`], [`SystemRevealer`]
//!
//! Builds are long-running, blocking foreground operations; the CLI runs one
//! orchestrator future at a time and nothing here is safe to run
//! concurrently with another instance over the same define store.

use anyhow::{Context, Result};
use buildforge::config::SettingsManager;
use buildforge::models::{BuildOutcome, BuildTarget};
use buildforge::services::{
    BuildOrchestrator, CommandBackend, SystemRevealer, get_or_default_platform, paths,
};
use buildforge::{APP_NAME, VERSION};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "buildforge", version, about = "Multi-platform build orchestrator")]
struct Cli {
    /// Project root directory ({project} in folder patterns)
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    /// Directory holding builder.yaml, product.yaml and defines.yaml
    #[arg(long, default_value = ".buildforge")]
    config_dir: Utf8PathBuf,

    /// Builder program the command backend invokes
    #[arg(long, default_value = "buildforge-backend")]
    backend: Utf8PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build one platform (the first configured platform when omitted)
    Build {
        target: Option<BuildTarget>,

        /// Run the build after producing it (suppresses folder reveal)
        #[arg(long)]
        run: bool,
    },

    /// Build every configured platform in order, halting on first failure
    BuildAll,

    /// Resolve an output-folder pattern and print the path
    ResolveFolder { pattern: String },

    /// Resolve an output pattern for a target and print the path
    ResolvePattern {
        pattern: String,

        #[arg(long)]
        target: BuildTarget,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = buildforge::logging::setup_logging("logs", "buildforge", cli.debug, true)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let project_root = cli
        .project_root
        .canonicalize_utf8()
        .with_context(|| format!("Invalid project root: {}", cli.project_root))?;

    let manager = SettingsManager::new(&cli.config_dir)?;
    let settings = manager.load_or_create_settings()?;
    let product = manager.load_or_create_product()?;

    // The resolve commands are pure; only builds need the runtime and the
    // stateful collaborators.
    let build_command = match cli.command {
        Command::ResolveFolder { pattern } => {
            println!("{}", paths::resolve_output_folder(&pattern, &project_root));
            return Ok(());
        }
        Command::ResolvePattern { pattern, target } => {
            let platform = get_or_default_platform(&settings, target);
            println!("{}", paths::resolve_output_pattern(&pattern, &platform, &product));
            return Ok(());
        }
        other => other,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("buildforge-worker")
        .build()?;

    let defines = manager.open_define_store()?;
    let mut orchestrator = BuildOrchestrator::new(
        CommandBackend::new(cli.backend),
        defines,
        SystemRevealer,
        project_root,
        product,
    );

    let failed = match build_command {
        Command::Build { target, run } => {
            let target = target
                .or_else(|| settings.platforms.first().map(|p| p.target))
                .context("No platforms configured and no target given")?;

            let report = runtime.block_on(orchestrator.build_one(&settings, target, run))?;
            report.outcome != BuildOutcome::Succeeded
        }
        Command::BuildAll => {
            let targets: Vec<BuildTarget> = settings.platforms.iter().map(|p| p.target).collect();
            anyhow::ensure!(!targets.is_empty(), "No platforms configured");

            runtime.block_on(orchestrator.build_all(&settings, &targets))?;
            false
        }
        Command::ResolveFolder { .. } | Command::ResolvePattern { .. } => unreachable!(),
    };

    runtime.shutdown_timeout(std::time::Duration::from_secs(5));
    tracing::info!("Shutdown complete");

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
