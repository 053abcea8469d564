//! The equivalence oracle.
//!
//! Compares an ingested actual-side tree ([`Node`]) against a plain JSON
//! expected-side tree, depth first, failing at the first disagreement with a
//! [`Mismatch`] that carries the path to the offending field.
//!
//! The comparison is deliberately asymmetric, matching how differential
//! fixtures are built:
//!
//! - a mapping only requires that the actual side's keys exist on the
//!   expected side; expected-only keys (for example a `type` tag the native
//!   object does not expose) are ignored;
//! - a null or missing field on the actual side matches only a null or
//!   missing field on the expected side;
//! - the expected side's declared `type` string is used as a cross-check
//!   against the kind inferred from the actual side's shape, never as the
//!   dispatch key.

use crate::error::{Mismatch, MismatchKind, Path};
use crate::node::Node;
use serde_json::{Map, Value};

/// Absolute tolerance for float comparison.
pub const FLOAT_TOLERANCE: f64 = 1e-6;

const GEOMETRY_TYPES: [&str; 7] = [
    "GeometryCollection",
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
];

/// Check two representations of the same artifact for semantic equivalence.
///
/// Returns `Ok(())` when equivalent; the error identifies the first
/// disagreement. Sequence order is significant and compared positionally.
pub fn compare(actual: &Node, expected: &Value) -> Result<(), Mismatch> {
    let mut path = Path::root();
    compare_at(actual, expected, &mut path)
}

/// Boolean convenience wrapper around [`compare`].
pub fn equivalent(actual: &Node, expected: &Value) -> bool {
    compare(actual, expected).is_ok()
}

fn compare_at(actual: &Node, expected: &Value, path: &mut Path) -> Result<(), Mismatch> {
    match actual {
        Node::Absent => {
            if expected.is_null() {
                Ok(())
            } else {
                Err(Mismatch::new(
                    MismatchKind::NullAsymmetry,
                    path,
                    format!("actual is null but expected holds {}", preview(expected)),
                ))
            }
        }
        Node::Bool(a) => match expected.as_bool() {
            Some(b) if *a == b => Ok(()),
            _ => Err(value_mismatch(path, &a.to_string(), expected)),
        },
        Node::Int(a) => match expected.as_i64() {
            Some(b) if *a == b => Ok(()),
            _ => Err(value_mismatch(path, &a.to_string(), expected)),
        },
        Node::Float(a) => match expected.as_f64() {
            Some(b) if (a - b).abs() <= FLOAT_TOLERANCE => Ok(()),
            _ => Err(value_mismatch(path, &a.to_string(), expected)),
        },
        Node::Str(a) => compare_string(a, expected, path),
        Node::Seq(items) => compare_sequence(items, expected, path),
        Node::Map(map) => compare_mapping(map, expected, path),
        Node::Topology {
            bbox,
            transform,
            objects,
            arcs,
        } => {
            let obj = expect_mapping(actual, expected, path)?;
            field(bbox, obj, "bbox", path)?;
            field(transform, obj, "transform", path)?;
            field(objects, obj, "objects", path)?;
            field(arcs, obj, "arcs", path)
        }
        Node::Transform { scale, translate } => {
            let obj = expect_mapping(actual, expected, path)?;
            field(scale, obj, "scale", path)?;
            field(translate, obj, "translate", path)
        }
        Node::GeometryCollection {
            geometries,
            id,
            properties,
            bbox,
        } => {
            let obj = expect_mapping(actual, expected, path)?;
            check_type_tag(obj, &["GeometryCollection"], actual, path)?;
            field(geometries, obj, "geometries", path)?;
            properties_field(properties, obj, path)?;
            field(bbox, obj, "bbox", path)?;
            field(id, obj, "id", path)
        }
        Node::PointGeometry {
            coordinates,
            id,
            properties,
            bbox,
        } => {
            let obj = expect_mapping(actual, expected, path)?;
            check_type_tag(obj, &["Point", "MultiPoint"], actual, path)?;
            field(coordinates, obj, "coordinates", path)?;
            properties_field(properties, obj, path)?;
            field(bbox, obj, "bbox", path)?;
            field(id, obj, "id", path)
        }
        Node::ArcGeometry {
            arcs,
            id,
            properties,
            bbox,
        } => {
            let obj = expect_mapping(actual, expected, path)?;
            check_type_tag(
                obj,
                &["LineString", "MultiLineString", "Polygon", "MultiPolygon"],
                actual,
                path,
            )?;
            field(arcs, obj, "arcs", path)?;
            properties_field(properties, obj, path)?;
            field(bbox, obj, "bbox", path)?;
            field(id, obj, "id", path)
        }
        Node::Feature {
            geometry,
            properties,
            id,
            bbox,
        } => {
            let obj = expect_mapping(actual, expected, path)?;
            check_type_tag(obj, &["Feature"], actual, path)?;
            field(geometry, obj, "geometry", path)?;
            properties_field(properties, obj, path)?;
            field(bbox, obj, "bbox", path)?;
            field(id, obj, "id", path)
        }
        Node::BareGeometry { coordinates } => {
            let obj = expect_mapping(actual, expected, path)?;
            check_type_tag(obj, &GEOMETRY_TYPES, actual, path)?;
            field(coordinates, obj, "coordinates", path)
        }
        Node::FeatureCollection { features } => {
            let obj = expect_mapping(actual, expected, path)?;
            check_type_tag(obj, &["FeatureCollection"], actual, path)?;
            field(features, obj, "features", path)
        }
    }
}

// ─── Scalars ────────────────────────────────────────────────────────────────

/// Outcome of attempting to decode both sides of a string comparison as
/// serialized JSON.
enum DecodedPair {
    Decoded(Value, Value),
    Raw,
}

fn decode_pair(a: &str, b: &str) -> DecodedPair {
    match (
        serde_json::from_str::<Value>(a),
        serde_json::from_str::<Value>(b),
    ) {
        (Ok(da), Ok(db)) => DecodedPair::Decoded(da, db),
        _ => DecodedPair::Raw,
    }
}

fn compare_string(a: &str, expected: &Value, path: &mut Path) -> Result<(), Mismatch> {
    let Some(b) = expected.as_str() else {
        return Err(value_mismatch(path, a, expected));
    };
    match decode_pair(a, b) {
        DecodedPair::Decoded(da, db) => {
            if decoded_eq(&da, &db) {
                Ok(())
            } else {
                Err(Mismatch::new(
                    MismatchKind::Value,
                    path,
                    format!(
                        "decoded strings differ: {} != {}",
                        preview(&da),
                        preview(&db)
                    ),
                ))
            }
        }
        DecodedPair::Raw => {
            if a == b {
                Ok(())
            } else {
                Err(value_mismatch(path, a, expected))
            }
        }
    }
}

/// Deep structural equality over two decoded JSON trees, with the same
/// numeric tolerance as the node comparison. Symmetric and strict about
/// key sets and lengths.
fn decoded_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => (x - y).abs() <= FLOAT_TOLERANCE,
            _ => false,
        },
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| decoded_eq(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, xv)| y.get(k).is_some_and(|yv| decoded_eq(xv, yv)))
        }
        _ => false,
    }
}

// ─── Sequences and mappings ─────────────────────────────────────────────────

fn compare_sequence(items: &[Node], expected: &Value, path: &mut Path) -> Result<(), Mismatch> {
    // A single-element sequence wrapping a feature collection or feature
    // (the shape feature extraction hands back) unwraps one level, but only
    // against a mapping: a one-feature list compared against an expected
    // array is an ordinary positional comparison.
    if let [single] = items
        && matches!(
            single,
            Node::FeatureCollection { .. } | Node::Feature { .. }
        )
        && expected.is_object()
    {
        return compare_at(single, expected, path);
    }

    let Some(expected_items) = expected.as_array() else {
        return Err(Mismatch::new(
            MismatchKind::Value,
            path,
            format!("actual is a sequence but expected holds {}", preview(expected)),
        ));
    };
    if items.len() != expected_items.len() {
        return Err(Mismatch::new(
            MismatchKind::Length,
            path,
            format!(
                "sequence lengths differ: {} != {}",
                items.len(),
                expected_items.len()
            ),
        ));
    }
    for (i, (a, b)) in items.iter().zip(expected_items).enumerate() {
        path.push_index(i);
        let result = compare_at(a, b, path);
        path.pop();
        result?;
    }
    Ok(())
}

fn compare_mapping(
    map: &std::collections::BTreeMap<String, Node>,
    expected: &Value,
    path: &mut Path,
) -> Result<(), Mismatch> {
    let Some(expected_map) = expected.as_object() else {
        return Err(Mismatch::new(
            MismatchKind::Value,
            path,
            format!("actual is a mapping but expected holds {}", preview(expected)),
        ));
    };
    // Only the actual side's keys must exist; expected-only keys are
    // supersets the fixtures are allowed to carry.
    for (key, node) in map {
        let Some(expected_value) = expected_map.get(key) else {
            return Err(Mismatch::new(
                MismatchKind::MissingKey,
                path,
                format!("key '{}' missing in expected", key),
            ));
        };
        path.push_key(key);
        let result = compare_at(node, expected_value, path);
        path.pop();
        result?;
    }
    Ok(())
}

// ─── Domain-variant helpers ─────────────────────────────────────────────────

fn expect_mapping<'a>(
    actual: &Node,
    expected: &'a Value,
    path: &Path,
) -> Result<&'a Map<String, Value>, Mismatch> {
    expected.as_object().ok_or_else(|| {
        Mismatch::new(
            MismatchKind::Value,
            path,
            format!(
                "actual is a {} but expected holds {}",
                actual.kind_name(),
                preview(expected)
            ),
        )
    })
}

/// Compare one envelope field of a domain variant. An `Absent` field on the
/// actual side requires the expected key to be missing or null; a present
/// field requires the key to exist and match.
fn field(
    node: &Node,
    expected: &Map<String, Value>,
    key: &str,
    path: &mut Path,
) -> Result<(), Mismatch> {
    path.push_key(key);
    let result = match node {
        Node::Absent => match expected.get(key) {
            None | Some(Value::Null) => Ok(()),
            Some(value) => Err(Mismatch::new(
                MismatchKind::NullAsymmetry,
                path,
                format!("actual is null but expected holds {}", preview(value)),
            )),
        },
        _ => match expected.get(key) {
            Some(value) => compare_at(node, value, path),
            None => Err(Mismatch::new(
                MismatchKind::MissingKey,
                path,
                format!("key '{}' missing in expected", key),
            )),
        },
    };
    path.pop();
    result
}

/// Compare the properties envelope field.
///
/// Native producers emit properties as a pre-encoded JSON string, so a
/// present actual side is compared against the expected side's properties
/// re-encoded the same way (which the string rule then decodes again). An
/// absent actual side accepts a missing, null, or empty-mapping expected
/// side.
fn properties_field(
    node: &Node,
    expected: &Map<String, Value>,
    path: &mut Path,
) -> Result<(), Mismatch> {
    path.push_key("properties");
    let result = match node {
        Node::Absent => match expected.get("properties") {
            None | Some(Value::Null) => Ok(()),
            Some(Value::Object(map)) if map.is_empty() => Ok(()),
            Some(value) => Err(Mismatch::new(
                MismatchKind::NullAsymmetry,
                path,
                format!("actual is null but expected holds {}", preview(value)),
            )),
        },
        _ => match expected.get("properties") {
            Some(value) => match serde_json::to_string(value) {
                Ok(encoded) => compare_at(node, &Value::String(encoded), path),
                Err(e) => Err(Mismatch::new(
                    MismatchKind::Classification,
                    path,
                    format!("could not re-encode expected properties: {}", e),
                )),
            },
            None => Err(Mismatch::new(
                MismatchKind::MissingKey,
                path,
                "key 'properties' missing in expected",
            )),
        },
    };
    path.pop();
    result
}

/// Cross-check the expected side's declared `type` string against the kind
/// inferred from the actual side's shape. The tag never drives dispatch.
fn check_type_tag(
    expected: &Map<String, Value>,
    allowed: &[&str],
    actual: &Node,
    path: &mut Path,
) -> Result<(), Mismatch> {
    path.push_key("type");
    let result = match expected.get("type").and_then(Value::as_str) {
        Some(tag) if allowed.contains(&tag) => Ok(()),
        Some(tag) => Err(Mismatch::new(
            MismatchKind::TypeTag,
            path,
            format!(
                "expected side claims '{}' but actual shape is a {}",
                tag,
                actual.kind_name()
            ),
        )),
        None => Err(Mismatch::new(
            MismatchKind::TypeTag,
            path,
            format!(
                "expected side carries no 'type' tag for a {} node",
                actual.kind_name()
            ),
        )),
    };
    path.pop();
    result
}

// ─── Diagnostics ────────────────────────────────────────────────────────────

fn value_mismatch(path: &Path, actual: &str, expected: &Value) -> Mismatch {
    Mismatch::new(
        MismatchKind::Value,
        path,
        format!("{} != {}", actual, preview(expected)),
    )
}

/// Render an expected-side value for a diagnostic, truncated so a mismatch
/// deep inside a large fixture stays readable.
fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.len() <= 80 {
        return rendered;
    }
    let mut end = 79;
    while !rendered.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &rendered[..end])
}
