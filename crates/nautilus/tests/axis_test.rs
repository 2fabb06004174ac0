use nautilus::Vec3;
use nautilus::algo::axis;

#[test]
fn axis_places_three_children_on_cycling_axes() {
    let parent = Vec3::new(1.0, 2.0, 3.0);
    let placed = axis::place(parent, &["a", "b", "c"]);

    assert_eq!(placed["a"], Vec3::new(6.0, 2.0, 3.0));
    assert_eq!(placed["b"], Vec3::new(-4.0, 2.0, 3.0));
    assert_eq!(placed["c"], Vec3::new(1.0, 7.0, 3.0));
}

#[test]
fn axis_covers_all_six_signed_axes() {
    let placed = axis::place(Vec3::ZERO, &["a", "b", "c", "d", "e", "f"]);

    assert_eq!(placed["a"], Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(placed["b"], Vec3::new(-5.0, 0.0, 0.0));
    assert_eq!(placed["c"], Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(placed["d"], Vec3::new(0.0, -5.0, 0.0));
    assert_eq!(placed["e"], Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(placed["f"], Vec3::new(0.0, 0.0, -5.0));
}

#[test]
fn axis_wraps_after_six_children() {
    let placed = axis::place(Vec3::ZERO, &["a", "b", "c", "d", "e", "f", "g", "h"]);

    // The seventh and eighth children alias the first two slots.
    assert_eq!(placed["g"], placed["a"]);
    assert_eq!(placed["h"], placed["b"]);
}

#[test]
fn axis_preserves_batch_order() {
    let placed = axis::place(Vec3::ZERO, &["x", "y", "z"]);
    let ids: Vec<&str> = placed.keys().map(String::as_str).collect();
    assert_eq!(ids, ["x", "y", "z"]);
}

#[test]
fn axis_distance_is_exact() {
    let parent = Vec3::new(-7.5, 0.25, 12.0);
    for (_, position) in axis::place(parent, &["a", "b", "c", "d", "e", "f"]) {
        let mut offset = position;
        offset.sub(parent);
        assert_eq!(offset.length(), 5.0);
    }
}
