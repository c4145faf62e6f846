//! Worker process handle
//!
//! Spawns a single bridge worker, watches its output for the readiness
//! marker and drives it to exit at teardown.

use std::ffi::OsStr;
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::sync::watch;

use crate::core::RoleState;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::services::process_output_handler::{configure_child_stdio, spawn_output_consumers};
use shared::{process_debug, process_warn, ProcessId, RoleName};

/// A spawned worker tracked by the orchestrator
pub struct ManagedProcess {
    role: RoleName,
    child: Child,
    process_id: Option<u32>,
    state: RoleState,
    ready: watch::Receiver<bool>,
    exit_status: Option<ExitStatus>,
    start_time: std::time::Instant,
}

impl ManagedProcess {
    /// Spawn `program` with `args` as the worker for `role`
    pub fn spawn<S: AsRef<OsStr>>(role: RoleName, program: S, args: &[String]) -> OrchestratorResult<Self> {
        let mut cmd = Command::new(program.as_ref());
        cmd.args(args).kill_on_drop(true);
        configure_child_stdio(&mut cmd);

        let mut child = cmd.spawn().map_err(|e| OrchestratorError::SpawnFailed {
            role,
            reason: format!("{}: {e}", program.as_ref().to_string_lossy()),
        })?;

        let process_id = child.id();
        let ready = spawn_output_consumers(&mut child, role, role.readiness_marker());

        process_debug!(
            ProcessId::current(),
            "🏭 Spawned {} (PID: {}) with args {:?}",
            role,
            process_id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string()),
            args
        );

        Ok(Self {
            role,
            child,
            process_id,
            state: RoleState::Starting,
            ready,
            exit_status: None,
            start_time: std::time::Instant::now(),
        })
    }

    pub fn role(&self) -> RoleName {
        self.role
    }

    /// OS process id captured at spawn time
    pub fn id(&self) -> Option<u32> {
        self.process_id
    }

    pub fn exit_status(&self) -> Option<ExitStatus> {
        self.exit_status
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Current state, noticing a process that exited on its own
    pub fn state(&mut self) -> RoleState {
        self.refresh();
        self.state
    }

    /// Block until the readiness marker shows up or `timeout` elapses
    ///
    /// Fails early when the worker closes its output without ever printing
    /// the marker. The process is left running on timeout.
    pub async fn wait_ready(&mut self, timeout: Duration) -> OrchestratorResult<()> {
        let outcome = tokio::time::timeout(timeout, self.ready.wait_for(|ready| *ready))
            .await
            .map(|seen| seen.map(|_| ()));

        match outcome {
            Ok(Ok(())) => {
                self.state = self.state.on_readiness(true);
                Ok(())
            }
            Ok(Err(_)) => {
                self.state = self.state.on_exit();
                Err(OrchestratorError::ExitedBeforeReady { role: self.role })
            }
            Err(_) => Err(OrchestratorError::ReadinessTimeout {
                role: self.role,
                timeout,
            }),
        }
    }

    /// Interrupt the worker and wait until it has exited
    ///
    /// A worker still alive `grace` after the interrupt is killed; the wait
    /// itself is unbounded.
    pub async fn wait_exit(&mut self, grace: Duration) -> OrchestratorResult<ExitStatus> {
        if let Some(status) = self.exit_status {
            return Ok(status);
        }

        self.interrupt();
        let waited = match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(waited) => waited,
            Err(_) => {
                process_warn!(
                    ProcessId::current(),
                    "⚠️ {} ignored the interrupt for {:?}, killing it",
                    self.role,
                    grace
                );
                match self.child.kill().await {
                    Ok(()) => self.child.wait().await,
                    Err(e) => Err(e),
                }
            }
        };
        let status = waited.map_err(|e| OrchestratorError::ProcessWait {
            role: self.role,
            reason: e.to_string(),
        })?;
        self.record_exit(status);

        process_debug!(
            ProcessId::current(),
            "🛑 {} exited with {} after {:?}",
            self.role,
            status,
            self.uptime()
        );
        Ok(status)
    }

    /// Kill the worker outright and reap it
    pub async fn kill(&mut self) -> OrchestratorResult<()> {
        if self.exit_status.is_some() {
            return Ok(());
        }
        self.child.kill().await.map_err(|e| OrchestratorError::ProcessWait {
            role: self.role,
            reason: e.to_string(),
        })?;
        if let Ok(Some(status)) = self.child.try_wait() {
            self.record_exit(status);
        } else {
            self.state = self.state.on_exit();
        }
        Ok(())
    }

    fn refresh(&mut self) {
        if self.exit_status.is_some() {
            return;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => self.record_exit(status),
            Ok(None) => {}
            Err(e) => {
                process_warn!(ProcessId::current(), "⚠️ Failed to poll {}: {}", self.role, e);
            }
        }
    }

    fn record_exit(&mut self, status: ExitStatus) {
        self.exit_status = Some(status);
        self.state = self.state.on_exit();
    }

    /// Ask the worker to shut down the way Ctrl+C would
    fn interrupt(&mut self) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{self, Signal};
            use nix::unistd::Pid;

            // id() is None once the child has been reaped
            if let Some(pid) = self.child.id() {
                match signal::kill(Pid::from_raw(pid as i32), Signal::SIGINT) {
                    Ok(()) => return,
                    Err(e) => {
                        process_warn!(
                            ProcessId::current(),
                            "⚠️ Failed to interrupt {} (PID: {}): {}",
                            self.role,
                            pid,
                            e
                        );
                    }
                }
            }
        }

        let _ = self.child.start_kill();
    }
}

impl std::fmt::Debug for ManagedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedProcess")
            .field("role", &self.role)
            .field("process_id", &self.process_id)
            .field("state", &self.state)
            .field("exit_status", &self.exit_status)
            .finish()
    }
}
