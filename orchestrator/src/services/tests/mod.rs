//! Service-specific tests
//!
//! Process tests drive small `/bin/sh` scripts standing in for the bridge
//! workers, so they only run on Unix.


// Common test utilities for services
pub mod common {
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    /// Readiness bound used where a worker is expected to be quick
    pub const FAST_READY: Duration = Duration::from_secs(10);

    /// Readiness bound used where a worker is expected to miss it
    pub const SHORT_READY: Duration = Duration::from_millis(300);

    /// Grace period before an ignored interrupt escalates to a kill
    pub const GRACE: Duration = Duration::from_secs(5);

    /// Write an executable shell script named `name` into `dir`
    #[cfg(unix)]
    pub fn write_worker(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write worker script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod worker script");
        path
    }

    /// Baseline config document with every rewritten field populated
    pub fn baseline_json() -> String {
        serde_json::json!({
            "l1_config": {
                "confirmations": "0xa",
                "endpoint": "https://l1.prod",
                "l1_message_queue_address": "0x0",
                "rollup_contract_address": "0x0",
                "l1_messenger_address": "0x0",
                "relayer_config": {
                    "messenger_contract_address": "0x0",
                    "gas_price_oracle_contract_address": "0x0",
                    "sender_config": { "endpoint": "https://l2.prod", "confirmations": "0x6" }
                }
            },
            "l2_config": {
                "confirmations": "0xc",
                "endpoint": "https://l2.prod",
                "l2_message_queue_address": "0x0",
                "l2_messenger_address": "0x0",
                "relayer_config": {
                    "messenger_contract_address": "0x0",
                    "gas_price_oracle_contract_address": "0x0",
                    "sender_config": { "endpoint": "https://l1.prod", "confirmations": "0x6" }
                },
                "batch_proposer_config": { "commit_tx_calldata_size_limit": 130000 }
            },
            "db_config": { "driver_name": "postgres", "dsn": "postgres://prod" }
        })
        .to_string()
    }
}
