//! Config file I/O
//!
//! Loading the baseline, writing the owner-only config artifact the workers
//! read, and removing it again at teardown.

use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::core::BridgeConfig;
use crate::error::{OrchestratorError, OrchestratorResult};

/// Permission bits of the persisted config
pub const ARTIFACT_MODE: u32 = 0o600;

/// Read and parse a bridge config document
pub async fn load_config(path: &Path) -> OrchestratorResult<BridgeConfig> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| OrchestratorError::load(path, e))?;
    BridgeConfig::from_json(&content).map_err(|e| OrchestratorError::load(path, e))
}

/// Write `cfg` to `path`, readable and writable by the owner only
pub async fn persist_config(path: &Path, cfg: &BridgeConfig) -> OrchestratorResult<()> {
    let data = cfg.to_json_pretty().map_err(|e| OrchestratorError::persist(path, e))?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(ARTIFACT_MODE);

    let mut file = options.open(path).await.map_err(|e| OrchestratorError::persist(path, e))?;
    file.write_all(data.as_bytes())
        .await
        .map_err(|e| OrchestratorError::persist(path, e))?;
    file.flush().await.map_err(|e| OrchestratorError::persist(path, e))?;

    // mode() only applies on create; tighten a pre-existing file too
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(ARTIFACT_MODE))
            .await
            .map_err(|e| OrchestratorError::persist(path, e))?;
    }

    Ok(())
}

/// Delete the artifact; returns false when it was already gone
pub async fn remove_artifact(path: &Path) -> OrchestratorResult<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(_) => Err(OrchestratorError::FileSystemError {
            operation: "remove_artifact".to_string(),
            path: path.display().to_string(),
        }),
    }
}
