//! Orchestrator settings
//!
//! Where worker executables live, where the config artifact goes, how long a
//! worker gets to report readiness and which flags every worker receives.

use shared::RoleName;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bound on the readiness wait
pub const DEFAULT_READINESS_TIMEOUT: Duration = Duration::from_secs(20);

/// How long a worker gets to honour the teardown interrupt
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Flag enabling debug logging in the bridge workers
pub const DEBUG_LOG_FLAG: &str = "--log.debug";

#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorSettings {
    /// Directory holding the worker executables; `None` resolves via `PATH`
    pub bin_dir: Option<PathBuf>,
    /// Directory the rewritten config is persisted into
    pub artifact_dir: PathBuf,
    pub readiness_timeout: Duration,
    pub shutdown_grace: Duration,
    pub debug_logging: bool,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            bin_dir: None,
            artifact_dir: std::env::temp_dir(),
            readiness_timeout: DEFAULT_READINESS_TIMEOUT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            debug_logging: true,
        }
    }
}

impl OrchestratorSettings {
    /// Create a new builder
    pub fn builder() -> OrchestratorSettingsBuilder {
        OrchestratorSettingsBuilder::new()
    }

    /// Executable launched for `role`
    pub fn program_for(&self, role: RoleName) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(role.as_str()),
            None => PathBuf::from(role.as_str()),
        }
    }

    /// Base arguments shared by every worker
    pub fn to_args(&self, config_path: &Path) -> Vec<String> {
        let mut args = Vec::new();

        if self.debug_logging {
            args.push(DEBUG_LOG_FLAG.to_string());
        }

        args.push("--config".to_string());
        args.push(config_path.display().to_string());

        args
    }
}

pub struct OrchestratorSettingsBuilder {
    settings: OrchestratorSettings,
}

impl OrchestratorSettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: OrchestratorSettings::default(),
        }
    }

    /// Look up worker executables in `dir`
    pub fn bin_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.settings.bin_dir = Some(dir.into());
        self
    }

    /// Persist the rewritten config into `dir`
    pub fn artifact_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.settings.artifact_dir = dir.into();
        self
    }

    pub fn readiness_timeout(mut self, timeout: Duration) -> Self {
        self.settings.readiness_timeout = timeout;
        self
    }

    pub fn shutdown_grace(mut self, grace: Duration) -> Self {
        self.settings.shutdown_grace = grace;
        self
    }

    pub fn debug_logging(mut self, enabled: bool) -> Self {
        self.settings.debug_logging = enabled;
        self
    }

    pub fn build(self) -> OrchestratorSettings {
        self.settings
    }
}

impl Default for OrchestratorSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
