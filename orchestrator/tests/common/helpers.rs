//! Test helpers for orchestrator sessions
//!
//! A [`TestSession`] owns a temporary directory holding the baseline config,
//! the worker executables and the persisted artifact, so tests never touch
//! the shared temp dir and can run in parallel.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tempfile::TempDir;

use bridge_orchestrator::{BridgeOrchestrator, InfraDescriptor, OrchestratorResult, OrchestratorSettings, RoleName};

use super::fixtures::TestFixtures;

static NEXT_TIMESTAMP: AtomicI64 = AtomicI64::new(1_700_000_000);

/// Readiness bound for workers expected to be quick
pub const FAST_READY: Duration = Duration::from_secs(10);

/// Readiness bound for workers expected to miss it
pub const SHORT_READY: Duration = Duration::from_millis(300);

pub struct TestSession {
    pub dir: TempDir,
    pub baseline: PathBuf,
    pub infra: InfraDescriptor,
}

impl TestSession {
    /// Fresh directory with the fixture baseline written into it
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create session dir");
        let baseline = dir.path().join("baseline.json");
        std::fs::write(&baseline, TestFixtures::baseline_json()).expect("write baseline");
        std::fs::create_dir(dir.path().join("bin")).expect("create bin dir");

        Self {
            dir,
            baseline,
            infra: TestFixtures::infra(NEXT_TIMESTAMP.fetch_add(1, Ordering::SeqCst)),
        }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn settings(&self, readiness_timeout: Duration) -> OrchestratorSettings {
        OrchestratorSettings::builder()
            .bin_dir(self.bin_dir())
            .artifact_dir(self.dir.path())
            .readiness_timeout(readiness_timeout)
            .shutdown_grace(Duration::from_secs(5))
            .build()
    }

    pub async fn orchestrator(&self) -> OrchestratorResult<BridgeOrchestrator> {
        self.orchestrator_with(self.settings(FAST_READY)).await
    }

    pub async fn orchestrator_with(&self, settings: OrchestratorSettings) -> OrchestratorResult<BridgeOrchestrator> {
        BridgeOrchestrator::new(&self.baseline, &self.infra, settings).await
    }

    /// Install a shell script as the executable for `role`
    #[cfg(unix)]
    pub fn write_worker(&self, role: RoleName, body: &str) -> PathBuf {
        write_script(&self.bin_dir(), role.as_str(), body)
    }

    /// Worker that announces readiness and then idles
    #[cfg(unix)]
    pub fn write_ready_worker(&self, role: RoleName) -> PathBuf {
        self.write_worker(role, &format!("echo '{}'\nexec sleep 30", role.readiness_marker()))
    }
}

#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write worker script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod worker script");
    path
}

/// Whether a process with `pid` still exists
#[cfg(unix)]
pub fn pid_alive(pid: i32) -> bool {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid), None).is_ok()
}
