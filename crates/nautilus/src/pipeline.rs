//! The rearrangement pipeline: recursive scheduling over the connection
//! graph, plus the public entry points.
//!
//! The walk starts at the root, lays out each node's not-yet-visited
//! neighbors as a batch (axis offsets for up to six children, force
//! simulation above that), then recurses into the children — largest
//! unvisited subtrees first, so big branches are laid out while the
//! surrounding volume is still uncrowded. The visited set makes cycles and
//! diamond shapes safe: the first path to reach an entry positions it, every
//! later path skips it.

use crate::algo::{self, UpdateOrder, axis, force};
use crate::error::{Error, Result};
use crate::geom::Vec3;
use crate::graph::{Adjacency, Entry, MindMap, Rearrangement};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Graphs with more entries than this carry a wall-clock budget for
/// descendant-count ordering; smaller graphs always sort.
pub const SORT_BUDGET_THRESHOLD: usize = 100;

/// Scheduling knobs for one rearrangement run. The simulation constants
/// themselves are fixed.
#[derive(Debug, Clone)]
pub struct RearrangeOptions {
    pub update_order: UpdateOrder,
    /// Wall-clock budget for descendant-count ordering on graphs larger than
    /// [`SORT_BUDGET_THRESHOLD`] entries. Once spent, remaining sibling
    /// batches are visited in connection-list order instead.
    pub sort_budget: Duration,
}

impl Default for RearrangeOptions {
    fn default() -> Self {
        Self {
            update_order: UpdateOrder::default(),
            sort_budget: Duration::from_millis(25),
        }
    }
}

/// Rearranges every entry reachable from `root_id` with default options.
///
/// The input is not mutated; the root keeps its position. See
/// [`Rearrangement`] for the output contract.
pub fn rearrange(map: &MindMap, root_id: &str) -> Result<Rearrangement> {
    rearrange_with(map, root_id, &RearrangeOptions::default(), None)
}

/// [`rearrange`] with explicit options and an optional progress callback.
///
/// `progress` receives fractions in `[0, 1]`, non-decreasing across the run,
/// reaching `1.0` when every entry is connected to the root. Entries that are
/// unreachable from the root never contribute progress.
pub fn rearrange_with(
    map: &MindMap,
    root_id: &str,
    opts: &RearrangeOptions,
    progress: Option<&mut dyn FnMut(f64)>,
) -> Result<Rearrangement> {
    map.validate()?;

    // First occurrence wins if an id appears twice in the entry list.
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, entry) in map.entries.iter().enumerate() {
        index.entry(entry.id.as_str()).or_insert(i);
    }
    let Some((&root_key, _)) = index.get_key_value(root_id) else {
        return Err(Error::MissingRoot {
            id: root_id.to_string(),
        });
    };

    let total = map.entries.len();
    let sort_deadline =
        (total > SORT_BUDGET_THRESHOLD).then(|| Instant::now() + opts.sort_budget);

    let mut scheduler = Scheduler {
        adjacency: Adjacency::build(&map.connections),
        index,
        entries: map.entries.clone(),
        visited: FxHashSet::default(),
        positions: BTreeMap::new(),
        total,
        update_order: opts.update_order,
        sort_deadline,
        sort_expired: false,
        progress,
    };

    // The root is never its own child, even through a cyclic connection.
    scheduler.visited.insert(root_key);
    scheduler.walk(root_key);

    Ok(Rearrangement {
        new_positions: scheduler.positions,
        updated_entries: scheduler.entries,
    })
}

struct Scheduler<'a, 'p> {
    adjacency: Adjacency<'a>,
    index: FxHashMap<&'a str, usize>,
    /// Working copy of the entry list; positions are written here as batches
    /// are laid out.
    entries: Vec<Entry>,
    visited: FxHashSet<&'a str>,
    positions: BTreeMap<String, Vec3>,
    total: usize,
    update_order: UpdateOrder,
    /// `None` when the graph is small enough to always sort.
    sort_deadline: Option<Instant>,
    sort_expired: bool,
    progress: Option<&'p mut dyn FnMut(f64)>,
}

impl<'a> Scheduler<'a, '_> {
    fn walk(&mut self, current: &'a str) {
        // Collecting a neighbor marks it visited immediately, which both
        // claims it for this batch (first path wins) and dedupes repeated
        // connections to the same entry.
        let mut children: Vec<&'a str> = Vec::new();
        for &neighbor in self.adjacency.neighbors(current) {
            if self.visited.insert(neighbor) {
                children.push(neighbor);
            }
        }
        if children.is_empty() {
            return;
        }

        let visited_before = self.visited.len() - children.len();
        let parent = self.entries[self.index[current]].position;

        let placed = if children.len() <= algo::AXIS_THRESHOLD {
            let placed = axis::place(parent, &children);
            let fraction = self.visited.len() as f64 / self.total as f64;
            self.report(fraction);
            placed
        } else {
            self.simulate_batch(parent, &children, visited_before)
        };

        for (id, position) in &placed {
            self.entries[self.index[id.as_str()]].position = *position;
            self.positions.insert(id.clone(), *position);
        }

        for child in self.order_children(children) {
            self.walk(child);
        }
    }

    fn simulate_batch(
        &mut self,
        parent: Vec3,
        children: &[&str],
        visited_before: usize,
    ) -> IndexMap<String, Vec3> {
        let before = visited_before as f64;
        let batch = children.len() as f64;
        let total = self.total as f64;
        let order = self.update_order;

        match self.progress.as_mut() {
            Some(p) => {
                let mut forward = |f: f64| (*p)((before + f * batch) / total);
                force::simulate(parent, children, order, Some(&mut forward))
            }
            None => force::simulate(parent, children, order, None),
        }
    }

    /// Orders a batch by unvisited-subtree size, descending, so the largest
    /// branches are laid out first. Stable: equal subtree sizes keep
    /// connection-list order. Once the sort budget is exhausted (large graphs
    /// only), batches keep connection-list order outright.
    fn order_children(&mut self, mut children: Vec<&'a str>) -> Vec<&'a str> {
        if children.len() <= 1 || self.sort_expired {
            return children;
        }

        let mut counts: FxHashMap<&'a str, usize> = FxHashMap::default();
        for &child in &children {
            if let Some(deadline) = self.sort_deadline {
                if Instant::now() >= deadline {
                    self.sort_expired = true;
                    tracing::debug!(
                        entries = self.total,
                        "descendant ordering budget exhausted; keeping connection order"
                    );
                    return children;
                }
            }
            counts.insert(child, self.descendant_count(child));
        }

        children.sort_by(|a, b| counts[b].cmp(&counts[a]));
        children
    }

    /// Number of not-yet-visited entries reachable from `from` without
    /// crossing an already-visited entry. `from` itself (already visited as
    /// part of the current batch) is not counted.
    fn descendant_count(&self, from: &'a str) -> usize {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        seen.insert(from);
        let mut stack = vec![from];
        let mut count = 0usize;

        while let Some(node) = stack.pop() {
            for &neighbor in self.adjacency.neighbors(node) {
                if self.visited.contains(neighbor) || !seen.insert(neighbor) {
                    continue;
                }
                count += 1;
                stack.push(neighbor);
            }
        }
        count
    }

    fn report(&mut self, fraction: f64) {
        if let Some(p) = self.progress.as_mut() {
            (*p)(fraction);
        }
    }
}
