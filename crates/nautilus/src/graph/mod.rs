//! The layout-facing data model: entries, connections, and results.
//!
//! Entries carry whatever display fields the caller stores on them; the
//! engine only reads `id` and `position` and passes the rest through
//! untouched (`extras`).

use crate::error::{Error, Result};
use crate::geom::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node in the mind map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub position: Vec3,
    /// Non-layout fields (titles, colors, content references). Preserved
    /// verbatim through layout and transport.
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Entry {
    pub fn new(id: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            extras: BTreeMap::new(),
        }
    }
}

/// An undirected edge between two entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source_id: String,
    pub target_id: String,
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Connection {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            extras: BTreeMap::new(),
        }
    }
}

/// A full mind-map graph: the flat entry list plus the connection list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMap {
    pub entries: Vec<Entry>,
    pub connections: Vec<Connection>,
}

impl MindMap {
    /// Checks that every connection endpoint names an existing entry.
    pub fn validate(&self) -> Result<()> {
        let ids: FxHashSet<&str> = self.entries.iter().map(|e| e.id.as_str()).collect();
        for c in &self.connections {
            if !ids.contains(c.source_id.as_str()) || !ids.contains(c.target_id.as_str()) {
                return Err(Error::MissingEndpoint {
                    source_id: c.source_id.clone(),
                    target_id: c.target_id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The output of one rearrangement.
///
/// `new_positions` holds exactly the repositioned entries (the root is never
/// repositioned and entries unreachable from the root are never touched).
/// `updated_entries` is a full copy of the input list, in input order, with
/// the new positions applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rearrangement {
    pub new_positions: BTreeMap<String, Vec3>,
    pub updated_entries: Vec<Entry>,
}

/// Neighbor lists per entry id, in connection-list order. Both endpoints of
/// every connection see each other.
#[derive(Debug)]
pub(crate) struct Adjacency<'a> {
    neighbors: FxHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    pub(crate) fn build(connections: &'a [Connection]) -> Self {
        let mut neighbors: FxHashMap<&'a str, Vec<&'a str>> = FxHashMap::default();
        for c in connections {
            neighbors
                .entry(c.source_id.as_str())
                .or_default()
                .push(c.target_id.as_str());
            neighbors
                .entry(c.target_id.as_str())
                .or_default()
                .push(c.source_id.as_str());
        }
        Self { neighbors }
    }

    pub(crate) fn neighbors(&self, id: &str) -> &[&'a str] {
        self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
