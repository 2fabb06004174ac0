//! Message framing for rearrangement jobs and worker events.
//!
//! The enums serialize with a `type` tag (`rearrange`, `progress`,
//! `complete`, `error`) so the same shapes work over any out-of-process
//! transport, not just the in-process channel.

use nautilus::{Connection, Entry, MindMap, Rearrangement};
use serde::{Deserialize, Serialize};

/// One rearrangement request: the designated root plus the full graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RearrangeJob {
    pub root_entry: Entry,
    pub entries: Vec<Entry>,
    pub connections: Vec<Connection>,
}

impl RearrangeJob {
    pub fn new(root_entry: Entry, entries: Vec<Entry>, connections: Vec<Connection>) -> Self {
        Self {
            root_entry,
            entries,
            connections,
        }
    }

    /// Splits the job into the graph and the root id the engine expects.
    pub(crate) fn into_parts(self) -> (MindMap, String) {
        (
            MindMap {
                entries: self.entries,
                connections: self.connections,
            },
            self.root_entry.id,
        )
    }
}

/// Messages accepted by a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerRequest {
    Rearrange { data: RearrangeJob },
}

/// Messages emitted by a worker: progress fractions in `[0, 1]`, in
/// non-decreasing order, then exactly one `Complete` or `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerResponse {
    Progress { progress: f64 },
    Complete { result: Rearrangement },
    Error { error: String },
}

impl WorkerResponse {
    /// `Complete` and `Error` end a job's event stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }
}
