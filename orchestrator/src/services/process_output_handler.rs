//! Helper to handle child process stdout/stderr output
//!
//! Both streams are piped and drained line by line for the whole life of the
//! child. Lines are raw bytes; invalid UTF-8 is replaced, never fatal:
//! - every line is forwarded to the harness log, tagged with the role
//! - the first line containing the readiness marker flips the readiness flag
//!
//! Draining continues after readiness so a chatty worker never blocks on a
//! full pipe.

use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::watch;

use shared::{process_debug, process_warn, ProcessId, RoleName};

/// Configure stdio for a worker process
pub fn configure_child_stdio(cmd: &mut tokio::process::Command) {
    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null());
}

/// Spawn tasks draining the child's output and return the readiness flag
///
/// The returned receiver reads `true` once `marker` has been seen on either
/// stream. When both streams close without the marker the sender side is
/// dropped, which a waiter observes as the channel closing.
pub fn spawn_output_consumers(child: &mut Child, role: RoleName, marker: String) -> watch::Receiver<bool> {
    let (ready_tx, ready_rx) = watch::channel(false);
    let ready_tx = Arc::new(ready_tx);
    let marker = Arc::new(marker);

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(scan_lines(stdout, role, marker.clone(), ready_tx.clone()));
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(scan_lines(stderr, role, marker, ready_tx));
    }

    ready_rx
}

async fn scan_lines<R>(stream: R, role: RoleName, marker: Arc<String>, ready_tx: Arc<watch::Sender<bool>>)
where
    R: AsyncRead + Unpin,
{
    let process = ProcessId::Role(role);
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();

    // Workers may log arbitrary bytes; only EOF or a read error ends the scan
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\r', '\n']);
                process_debug!(process, "{}", line);
                if !*ready_tx.borrow() && line.contains(marker.as_str()) {
                    ready_tx.send_replace(true);
                }
            }
            Err(e) => {
                process_warn!(process, "⚠️ Stopped reading worker output: {}", e);
                break;
            }
        }
    }
}
