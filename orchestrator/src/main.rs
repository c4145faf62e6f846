//! Main entry point for the bridge-orchestrator binary
//!
//! Binds a baseline bridge config to a provisioned test environment, starts
//! the requested worker roles and keeps them running until Ctrl+C.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;

use bridge_orchestrator::{
    BridgeOrchestrator, ConfigMutator, InfraDescriptor, OrchestratorResult, OrchestratorSettings,
};
use shared::{logging, process_debug, process_info, ProcessId};

/// Runs bridge workers against an isolated test environment
#[derive(Parser)]
#[command(name = "bridge-orchestrator")]
#[command(about = "Rewrites a bridge config for test infrastructure and supervises the bridge workers")]
pub struct Args {
    /// Baseline bridge config (JSON)
    #[arg(long)]
    pub baseline: PathBuf,

    /// Infrastructure descriptor written by the provisioner (JSON)
    #[arg(long)]
    pub infra: PathBuf,

    /// Worker role to start; repeat for several roles
    #[arg(long = "role")]
    pub roles: Vec<String>,

    /// Directory containing the worker executables (defaults to PATH lookup)
    #[arg(long)]
    pub bin_dir: Option<PathBuf>,

    /// Directory the rewritten config is stored in (defaults to the temp dir)
    #[arg(long)]
    pub artifact_dir: Option<PathBuf>,

    /// Seconds a worker gets to print its readiness marker
    #[arg(long, default_value = "20")]
    pub ready_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the rewritten config and exit without persisting or spawning
    #[arg(long)]
    pub dry_run: bool,
}

#[tokio::main]
async fn main() -> OrchestratorResult<()> {
    let _ = dotenv::dotenv();
    let args = Args::parse();

    ProcessId::init_harness();
    logging::init_tracing_with_level(Some(&args.log_level))?;

    let infra = InfraDescriptor::load(&args.infra).await?;
    process_debug!(
        ProcessId::current(),
        "Session {}: L1 {}, L2 {}",
        infra.timestamp,
        infra.l1_endpoint,
        infra.l2_endpoint
    );

    if args.dry_run {
        let cfg = ConfigMutator::new().mutate(&args.baseline, &infra, false).await?;
        println!("{}", cfg.to_json_pretty()?);
        return Ok(());
    }

    logging::log_startup(ProcessId::current(), "bridge test session");

    let mut builder = OrchestratorSettings::builder().readiness_timeout(Duration::from_secs(args.ready_timeout_secs));
    if let Some(dir) = args.bin_dir.clone() {
        builder = builder.bin_dir(dir);
    }
    if let Some(dir) = args.artifact_dir.clone() {
        builder = builder.artifact_dir(dir);
    }
    let settings = builder.build();

    let mut orchestrator = BridgeOrchestrator::new(&args.baseline, &infra, settings).await?;
    process_info!(
        ProcessId::current(),
        "📝 Workers will read {}",
        orchestrator.config_path().display()
    );

    // start() already logs failures; they do not abort the session
    let mut failed = 0usize;
    for role in &args.roles {
        if orchestrator.start(role, Vec::<String>::new()).await.is_err() {
            failed += 1;
        }
    }
    process_info!(
        ProcessId::current(),
        "📋 {} of {} roles ready: {:?}",
        args.roles.len() - failed,
        args.roles.len(),
        orchestrator.tracked_roles()
    );

    if let Err(err) = signal::ctrl_c().await {
        logging::log_error(ProcessId::current(), "Signal handling", &err);
    }
    logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal");

    orchestrator.free().await?;
    logging::log_success(ProcessId::current(), "All workers stopped and config removed");
    Ok(())
}
