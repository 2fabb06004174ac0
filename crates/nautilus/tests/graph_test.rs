use nautilus::{Connection, Entry, Error, MindMap, Vec3};
use serde_json::json;

#[test]
fn validate_accepts_a_well_formed_map() {
    let map = MindMap {
        entries: vec![
            Entry::new("a", Vec3::ZERO),
            Entry::new("b", Vec3::ZERO),
        ],
        connections: vec![Connection::new("a", "b")],
    };
    assert!(map.validate().is_ok());
}

#[test]
fn validate_rejects_a_dangling_endpoint() {
    let map = MindMap {
        entries: vec![Entry::new("a", Vec3::ZERO)],
        connections: vec![Connection::new("a", "missing")],
    };
    match map.validate() {
        Err(Error::MissingEndpoint {
            source_id,
            target_id,
        }) => {
            assert_eq!(source_id, "a");
            assert_eq!(target_id, "missing");
        }
        other => panic!("expected MissingEndpoint, got {other:?}"),
    }
}

#[test]
fn vec3_serializes_as_an_array() {
    let v = Vec3::new(1.0, -2.5, 3.0);
    assert_eq!(serde_json::to_value(v).unwrap(), json!([1.0, -2.5, 3.0]));

    let back: Vec3 = serde_json::from_value(json!([1.0, -2.5, 3.0])).unwrap();
    assert_eq!(back, v);
}

#[test]
fn vec3_normalize_leaves_the_zero_vector_alone() {
    let mut v = Vec3::ZERO;
    v.normalize();
    assert_eq!(v, Vec3::ZERO);

    let mut v = Vec3::new(3.0, 0.0, 4.0);
    v.normalize();
    assert!((v.x - 0.6).abs() < 1e-12);
    assert_eq!(v.y, 0.0);
    assert!((v.z - 0.8).abs() < 1e-12);
    assert!((v.length() - 1.0).abs() < 1e-12);
}

#[test]
fn entry_round_trips_with_unknown_fields() {
    let raw = json!({
        "id": "n1",
        "position": [1.0, 2.0, 3.0],
        "title": "Branch",
        "color": "#aabbcc"
    });
    let entry: Entry = serde_json::from_value(raw.clone()).unwrap();

    assert_eq!(entry.id, "n1");
    assert_eq!(entry.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(entry.extras["title"], json!("Branch"));

    assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
}

#[test]
fn connection_uses_camel_case_endpoint_names() {
    let connection = Connection::new("a", "b");
    assert_eq!(
        serde_json::to_value(&connection).unwrap(),
        json!({"sourceId": "a", "targetId": "b"})
    );

    let back: Connection =
        serde_json::from_value(json!({"sourceId": "a", "targetId": "b", "kind": "link"})).unwrap();
    assert_eq!(back.source_id, "a");
    assert_eq!(back.extras["kind"], json!("link"));
}
