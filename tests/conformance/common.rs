use serde_json::{Value, json};
use topodiff::{
    Feature, FeatureGeometry, Geometry, GeometryKind, Node, Topology, Transform,
};

/// A point feature with an empty envelope, the smallest interesting
/// feature-extraction output.
pub fn point_feature(x: f64, y: f64) -> Feature {
    Feature {
        properties: None,
        geometry: FeatureGeometry::Point {
            coordinates: vec![x, y],
        },
        id: None,
        bbox: None,
    }
}

/// The expected-side mirror of [`point_feature`], as a reference
/// implementation would serialize it.
pub fn point_feature_expected(x: f64, y: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [x, y] }
    })
}

/// A small quantized topology with one named polygon object.
pub fn land_topology() -> Topology {
    let mut objects = std::collections::BTreeMap::new();
    objects.insert(
        "land".to_string(),
        Geometry {
            kind: GeometryKind::Polygon {
                arcs: vec![vec![0]],
            },
            id: Some(json!("L1")),
            properties: None,
            bbox: None,
        },
    );
    Topology {
        bbox: Some(vec![0.0, 0.0, 10.0, 10.0]),
        transform: Some(Transform {
            scale: vec![0.001, 0.001],
            translate: vec![0.0, 0.0],
        }),
        objects: Some(objects),
        arcs: Some(vec![vec![
            vec![0.0, 0.0],
            vec![9999.0, 0.0],
            vec![0.0, 9999.0],
            vec![-9999.0, 0.0],
            vec![0.0, -9999.0],
        ]]),
    }
}

/// The expected-side mirror of [`land_topology`], carrying the `type` tags
/// native objects do not expose.
pub fn land_topology_expected() -> Value {
    json!({
        "type": "Topology",
        "bbox": [0.0, 0.0, 10.0, 10.0],
        "transform": { "scale": [0.001, 0.001], "translate": [0.0, 0.0] },
        "objects": {
            "land": { "type": "Polygon", "arcs": [[0]], "id": "L1" }
        },
        "arcs": [[[0, 0], [9999, 0], [0, 9999], [-9999, 0], [0, -9999]]]
    })
}

/// Convenience: ingest + compare, panicking with the mismatch on failure.
pub fn assert_equivalent(actual: impl Into<Node>, expected: &Value) {
    let node = actual.into();
    if let Err(m) = topodiff::compare(&node, expected) {
        panic!("expected equivalence, got: {}", m);
    }
}
