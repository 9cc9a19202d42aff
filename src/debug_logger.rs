// Debug logging module for asynchronous play logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the request/response cycle. Each play call is written as one JSONL line
// carrying everything needed to replay it: inputs, seed and emitted decisions.

use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::decision::Decision;
use crate::types::{GridPayload, PositionPayload};

/// A single debug log entry
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlayLogEntry {
    pub correlation_id: String,
    pub seed: u64,
    pub max_depth: u32,
    pub position: PositionPayload,
    pub grid: GridPayload,
    pub decisions: Vec<Decision>,
    pub timestamp: String,
}

impl PlayLogEntry {
    /// Builds an entry stamped with the current time
    pub fn new(
        correlation_id: &str,
        seed: u64,
        max_depth: u32,
        position: PositionPayload,
        grid: GridPayload,
        decisions: Vec<Decision>,
    ) -> Self {
        PlayLogEntry {
            correlation_id: correlation_id.to_string(),
            seed,
            max_depth,
            position,
            grid,
            decisions,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a play call asynchronously (fire-and-forget)
    /// Needs a tokio runtime; outside of one the entry is dropped with a warning.
    pub fn log_play(&self, entry: PlayLogEntry) {
        if !self.enabled {
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(
                    "No async runtime, dropping debug log entry for {}",
                    entry.correlation_id
                );
                return;
            }
        };

        let file_handle = self.file.clone();
        handle.spawn(async move {
            Self::log_play_internal(file_handle, entry).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn log_play_internal(file_handle: Arc<Mutex<Option<File>>>, entry: PlayLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
