//! Deterministic placement for small child batches.

use crate::geom::Vec3;
use indexmap::IndexMap;

/// Distance from the parent for axis-placed children.
pub const AXIS_DISTANCE: f64 = 5.0;

/// Unit offsets assigned to children in batch order. A seventh child would
/// wrap around and alias the first slot.
const AXIS_SLOTS: [Vec3; 6] = [
    Vec3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    },
    Vec3 {
        x: -1.0,
        y: 0.0,
        z: 0.0,
    },
    Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    },
    Vec3 {
        x: 0.0,
        y: -1.0,
        z: 0.0,
    },
    Vec3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    },
    Vec3 {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    },
];

/// Places `children` around `parent`, each exactly [`AXIS_DISTANCE`] units
/// away along one signed coordinate axis, cycling `+x, -x, +y, -y, +z, -z`
/// in batch order.
pub fn place(parent: Vec3, children: &[&str]) -> IndexMap<String, Vec3> {
    let mut positions = IndexMap::with_capacity(children.len());
    for (i, id) in children.iter().enumerate() {
        let mut offset = AXIS_SLOTS[i % AXIS_SLOTS.len()];
        offset.scale(AXIS_DISTANCE);
        let mut position = parent;
        position.add(offset);
        positions.insert((*id).to_string(), position);
    }
    positions
}
