//! Iterative force simulation for large child batches.
//!
//! Children start on a Fibonacci sphere around the parent and are then pulled
//! toward it and pushed apart from each other over a fixed number of
//! iterations. A post-pass clamps every child into the shell between
//! [`MIN_PARENT_DISTANCE`] and [`BOUNDING_RADIUS`].

use crate::algo::UpdateOrder;
use crate::geom::Vec3;
use indexmap::IndexMap;

/// Maximum distance of a child from its parent after layout.
pub const BOUNDING_RADIUS: f64 = 5.0;
/// Minimum distance of a child from its parent after layout.
pub const MIN_PARENT_DISTANCE: f64 = 1.5;
/// Inverse-square repulsion scale, applied between siblings and from the
/// parent.
pub const REPULSION_STRENGTH: f64 = 1.0;
/// Linear attraction scale toward the parent.
pub const ATTRACTION_STRENGTH: f64 = 0.05;
/// Velocity decay per iteration.
pub const DAMPING: f64 = 0.9;
/// Velocity magnitude cap per iteration.
pub const MAX_SPEED: f64 = 0.5;
/// Fixed iteration count; the simulation does not check for convergence.
pub const ITERATIONS: usize = 100;

/// Spreads `children` around `parent`. Returns final positions keyed by
/// entry id, in batch order. `progress`, if given, is invoked after every
/// iteration with `(i + 1) / ITERATIONS`.
///
/// An empty batch is a no-op.
pub fn simulate(
    parent: Vec3,
    children: &[&str],
    order: UpdateOrder,
    mut progress: Option<&mut dyn FnMut(f64)>,
) -> IndexMap<String, Vec3> {
    let n = children.len();
    let mut positions: IndexMap<String, Vec3> = IndexMap::with_capacity(n);
    if n == 0 {
        return positions;
    }

    // Spherical-spiral starting points keep children well separated for any
    // batch size; coincident starts would make the repulsion term blow up.
    for (i, id) in children.iter().enumerate() {
        positions.insert((*id).to_string(), fibonacci_point(parent, i, n));
    }
    let mut velocities = vec![Vec3::ZERO; n];

    for iteration in 0..ITERATIONS {
        let snapshot = match order {
            UpdateOrder::Snapshot => Some(positions.values().copied().collect::<Vec<_>>()),
            UpdateOrder::InPlace => None,
        };

        for i in 0..n {
            let current = positions[i];
            let mut force = Vec3::ZERO;

            // Attraction toward the parent.
            let mut attraction = parent;
            attraction.sub(current);
            attraction.scale(ATTRACTION_STRENGTH);
            force.add(attraction);

            // Repulsion from every sibling.
            for j in 0..n {
                if j == i {
                    continue;
                }
                let other = match &snapshot {
                    Some(prior) => prior[j],
                    None => positions[j],
                };
                force.add(repulsion(current, other));
            }

            // The parent repels too, so children do not sit on top of it.
            force.add(repulsion(current, parent));

            let velocity = &mut velocities[i];
            velocity.add(force);
            velocity.scale(DAMPING);
            if velocity.length() > MAX_SPEED {
                velocity.normalize();
                velocity.scale(MAX_SPEED);
            }

            let mut next = current;
            next.add(*velocity);
            positions[i] = next;
        }

        if let Some(p) = progress.as_mut() {
            (*p)((iteration + 1) as f64 / ITERATIONS as f64);
        }
    }

    for i in 0..n {
        positions[i] = clamp_to_shell(parent, positions[i]);
    }
    positions
}

/// Inverse-square repulsion pushing `target` away from `source`. Zero when
/// the two points coincide (no direction to push along).
fn repulsion(target: Vec3, source: Vec3) -> Vec3 {
    let mut dir = target;
    dir.sub(source);
    let dist = dir.length();
    if dist == 0.0 {
        return Vec3::ZERO;
    }
    dir.normalize();
    dir.scale(REPULSION_STRENGTH / (dist * dist));
    dir
}

/// Clamps a child into the shell around the parent: closer than
/// [`MIN_PARENT_DISTANCE`] is pushed out to exactly that distance (along +x
/// when coincident with the parent), farther than [`BOUNDING_RADIUS`] is
/// pulled in to exactly the radius.
fn clamp_to_shell(parent: Vec3, position: Vec3) -> Vec3 {
    let mut dir = position;
    dir.sub(parent);
    let dist = dir.length();

    if dist < MIN_PARENT_DISTANCE {
        if dist == 0.0 {
            dir = Vec3::new(1.0, 0.0, 0.0);
        } else {
            dir.normalize();
        }
        dir.scale(MIN_PARENT_DISTANCE);
    } else if dist > BOUNDING_RADIUS {
        dir.normalize();
        dir.scale(BOUNDING_RADIUS);
    } else {
        return position;
    }

    let mut clamped = parent;
    clamped.add(dir);
    clamped
}

/// Point `index` of `count` on a Fibonacci sphere of radius
/// `BOUNDING_RADIUS * 0.8` centered on `parent`.
fn fibonacci_point(parent: Vec3, index: usize, count: usize) -> Vec3 {
    let phi = (1.0 - 2.0 * (index as f64 + 0.5) / count as f64).acos();
    let theta = std::f64::consts::PI * (1.0 + 5.0f64.sqrt()) * index as f64;

    let mut offset = Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    );
    offset.scale(BOUNDING_RADIUS * 0.8);

    let mut point = parent;
    point.add(offset);
    point
}
