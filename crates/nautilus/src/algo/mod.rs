//! Child-placement algorithms.
//!
//! A batch of children is placed relative to its parent by one of two paths:
//! up to [`AXIS_THRESHOLD`] children land deterministically on signed axis
//! offsets ([`axis`]), larger batches are spread by an iterative force
//! simulation ([`force`]). Both paths key their output by entry id and keep
//! every child inside the parent's bounding sphere.

pub mod axis;
pub mod force;

/// Largest batch the axis placer handles; bigger batches go through the
/// force simulator.
pub const AXIS_THRESHOLD: usize = 6;

/// How sibling positions are read while integrating one simulation iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrder {
    /// Gauss-Seidel style: children are integrated in batch order, and later
    /// children read earlier children's freshly written positions.
    #[default]
    InPlace,
    /// Jacobi style: every child reads the previous iteration's positions.
    Snapshot,
}
