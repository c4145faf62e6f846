//! Bridge worker orchestrator
//!
//! Owns one test session: the rewritten config artifact, the base arguments
//! every worker gets, and at most one tracked process per role.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use shared::{logging, process_error, process_info, process_warn, ProcessId, RoleName};

use crate::core::{BridgeConfig, ConfigMutator, RoleState};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::services::{file_manager, ManagedProcess};
use crate::settings::OrchestratorSettings;
use crate::traits::Infrastructure;

/// Launches, tracks and tears down the bridge worker roles
///
/// Every mutating operation takes `&mut self`; callers serialize access.
#[derive(Debug)]
pub struct BridgeOrchestrator {
    config: BridgeConfig,
    config_path: PathBuf,
    base_args: Vec<String>,
    settings: OrchestratorSettings,
    processes: HashMap<RoleName, ManagedProcess>,
}

impl BridgeOrchestrator {
    /// Rewrite and persist the baseline for `infra`, ready to start roles
    pub async fn new(
        baseline_path: impl AsRef<Path>,
        infra: &dyn Infrastructure,
        settings: OrchestratorSettings,
    ) -> OrchestratorResult<Self> {
        let mutator = ConfigMutator::new().with_artifact_dir(settings.artifact_dir.clone());
        let config_path = mutator.artifact_path(infra);
        let config = mutator.mutate(baseline_path.as_ref(), infra, true).await?;
        let base_args = settings.to_args(&config_path);

        Ok(Self {
            config,
            config_path,
            base_args,
            settings,
            processes: HashMap::new(),
        })
    }

    /// The rewritten config the workers run with
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn base_args(&self) -> &[String] {
        &self.base_args
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Tracked roles in a stable order
    pub fn tracked_roles(&self) -> Vec<RoleName> {
        let mut roles: Vec<RoleName> = self.processes.keys().copied().collect();
        roles.sort();
        roles
    }

    pub fn is_tracked(&self, role: RoleName) -> bool {
        self.processes.contains_key(&role)
    }

    pub fn role_state(&mut self, role: RoleName) -> RoleState {
        self.processes
            .get_mut(&role)
            .map(|process| process.state())
            .unwrap_or(RoleState::Absent)
    }

    pub fn process(&self, role: RoleName) -> Option<&ManagedProcess> {
        self.processes.get(&role)
    }

    /// Direct handle access, e.g. to kill a worker stuck in start-up
    pub fn process_mut(&mut self, role: RoleName) -> Option<&mut ManagedProcess> {
        self.processes.get_mut(&role)
    }

    /// Start the role called `name` with `extra_args` after the base args
    ///
    /// Unknown names are rejected without touching tracked state.
    pub async fn start<I, S>(&mut self, name: &str, extra_args: I) -> OrchestratorResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let role = match name.parse::<RoleName>() {
            Ok(role) => role,
            Err(_) => {
                process_error!(ProcessId::current(), "❌ Don't support the worker role, name: {}", name);
                return Err(OrchestratorError::InvalidRole { name: name.to_string() });
            }
        };
        self.start_role(role, extra_args).await
    }

    /// Start `role`, replacing a tracked instance, and wait for readiness
    ///
    /// A worker that misses the readiness deadline stays tracked and keeps
    /// running; only the returned error reports the failure.
    pub async fn start_role<I, S>(&mut self, role: RoleName, extra_args: I) -> OrchestratorResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(mut previous) = self.processes.remove(&role) {
            process_info!(
                ProcessId::current(),
                "♻️ {} already exists, free the current and recreate again",
                role
            );
            previous.wait_exit(self.settings.shutdown_grace).await?;
        }

        let mut args = self.base_args.clone();
        args.extend(extra_args.into_iter().map(Into::into));

        let mut process = ManagedProcess::spawn(role, self.settings.program_for(role), &args)?;
        let readiness = process.wait_ready(self.settings.readiness_timeout).await;
        self.processes.insert(role, process);

        match &readiness {
            Ok(()) => logging::log_success(ProcessId::current(), &format!("{role} is ready")),
            Err(e) if e.is_readiness_failure() => {
                logging::log_error(ProcessId::current(), &format!("Starting {role}"), e);
                process_warn!(ProcessId::current(), "⚠️ {} stays tracked until the next free()", role);
            }
            Err(e) => logging::log_error(ProcessId::current(), &format!("Starting {role}"), e),
        }
        readiness
    }

    /// Wait for every tracked worker to exit, then forget them all
    pub async fn wait_exit(&mut self) -> OrchestratorResult<()> {
        let processes = std::mem::take(&mut self.processes);
        let grace = self.settings.shutdown_grace;
        let mut first_error = None;

        for (role, mut process) in processes {
            if let Err(e) = process.wait_exit(grace).await {
                process_warn!(ProcessId::current(), "⚠️ Waiting for {} failed: {}", role, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Tear the session down: all workers exited, artifact deleted
    ///
    /// Safe to call repeatedly.
    pub async fn free(&mut self) -> OrchestratorResult<()> {
        let waited = self.wait_exit().await;
        let removed = file_manager::remove_artifact(&self.config_path).await;

        if let Ok(true) = removed {
            process_info!(ProcessId::current(), "🧹 Removed {}", self.config_path.display());
        }

        waited?;
        removed.map(|_| ())
    }
}

impl Drop for BridgeOrchestrator {
    fn drop(&mut self) {
        // workers are spawned kill_on_drop; this only reports the leak
        if !self.processes.is_empty() {
            process_warn!(
                ProcessId::current(),
                "🚨 Dropped with {} tracked workers; killing them without a clean free()",
                self.processes.len()
            );
        }
    }
}
