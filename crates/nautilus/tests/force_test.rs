use nautilus::algo::force;
use nautilus::{UpdateOrder, Vec3};

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("c{i}")).collect()
}

fn id_refs(ids: &[String]) -> Vec<&str> {
    ids.iter().map(String::as_str).collect()
}

fn distance(a: Vec3, b: Vec3) -> f64 {
    let mut d = a;
    d.sub(b);
    d.length()
}

#[test]
fn force_keeps_children_inside_the_shell() {
    for n in [1, 2, 7, 10, 25] {
        let ids = ids(n);
        let placed = force::simulate(Vec3::ZERO, &id_refs(&ids), UpdateOrder::InPlace, None);

        assert_eq!(placed.len(), n);
        for (id, position) in &placed {
            let dist = distance(*position, Vec3::ZERO);
            assert!(
                dist >= force::MIN_PARENT_DISTANCE - 1e-9,
                "{id} too close: {dist}"
            );
            assert!(
                dist <= force::BOUNDING_RADIUS + 1e-9,
                "{id} too far: {dist}"
            );
        }
    }
}

#[test]
fn force_shell_invariant_holds_away_from_the_origin() {
    let parent = Vec3::new(100.0, -50.0, 25.0);
    let ids = ids(12);
    let placed = force::simulate(parent, &id_refs(&ids), UpdateOrder::InPlace, None);

    for (_, position) in &placed {
        let dist = distance(*position, parent);
        assert!(dist >= force::MIN_PARENT_DISTANCE - 1e-9);
        assert!(dist <= force::BOUNDING_RADIUS + 1e-9);
    }
}

#[test]
fn force_is_deterministic() {
    let ids = ids(9);
    let refs = id_refs(&ids);
    let first = force::simulate(Vec3::ZERO, &refs, UpdateOrder::InPlace, None);
    let second = force::simulate(Vec3::ZERO, &refs, UpdateOrder::InPlace, None);
    assert_eq!(first, second);
}

#[test]
fn force_reports_one_progress_step_per_iteration() {
    let ids = ids(8);
    let mut fractions: Vec<f64> = Vec::new();
    let mut record = |f: f64| fractions.push(f);
    force::simulate(
        Vec3::ZERO,
        &id_refs(&ids),
        UpdateOrder::InPlace,
        Some(&mut record),
    );

    assert_eq!(fractions.len(), force::ITERATIONS);
    assert_eq!(fractions[0], 1.0 / force::ITERATIONS as f64);
    assert_eq!(*fractions.last().unwrap(), 1.0);
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn force_empty_batch_is_a_noop() {
    let placed = force::simulate(Vec3::ZERO, &[], UpdateOrder::InPlace, None);
    assert!(placed.is_empty());
}

#[test]
fn force_snapshot_order_also_satisfies_the_shell_invariant() {
    let ids = ids(8);
    let placed = force::simulate(Vec3::ZERO, &id_refs(&ids), UpdateOrder::Snapshot, None);

    for (_, position) in &placed {
        let dist = distance(*position, Vec3::ZERO);
        assert!(dist >= force::MIN_PARENT_DISTANCE - 1e-9);
        assert!(dist <= force::BOUNDING_RADIUS + 1e-9);
    }
}

#[test]
fn force_update_orders_produce_different_layouts() {
    let ids = ids(8);
    let refs = id_refs(&ids);
    let in_place = force::simulate(Vec3::ZERO, &refs, UpdateOrder::InPlace, None);
    let snapshot = force::simulate(Vec3::ZERO, &refs, UpdateOrder::Snapshot, None);
    assert_ne!(in_place, snapshot);
}

#[test]
fn force_preserves_batch_order() {
    let ids = ids(7);
    let placed = force::simulate(Vec3::ZERO, &id_refs(&ids), UpdateOrder::InPlace, None);
    let got: Vec<&str> = placed.keys().map(String::as_str).collect();
    assert_eq!(got, id_refs(&ids));
}
