//! The comparison-node union and ingestion into it.
//!
//! Classification is structural and happens exactly once, here: plain JSON
//! becomes the generic scalar/sequence/mapping variants, native producer
//! types become the domain variants. The oracle in [`crate::compare`] then
//! dispatches on the tag and never inspects shapes at runtime.

use crate::types::{
    Feature, FeatureCollection, FeatureGeometry, GeoJson, Geometry, GeometryKind, Topology,
    Transform,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// One node of the actual-side comparison tree.
///
/// Generic variants (`Absent` through `Map`) arise from ingesting plain JSON
/// output; domain variants arise from ingesting native Rust output. A plain
/// mapping that happens to look like a topology stays a `Map` and is compared
/// key by key, which is what makes the oracle representation-tolerant.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Null or missing on the actual side.
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Node>),
    Map(BTreeMap<String, Node>),
    Topology {
        bbox: Box<Node>,
        transform: Box<Node>,
        objects: Box<Node>,
        arcs: Box<Node>,
    },
    Transform {
        scale: Box<Node>,
        translate: Box<Node>,
    },
    GeometryCollection {
        geometries: Box<Node>,
        id: Box<Node>,
        properties: Box<Node>,
        bbox: Box<Node>,
    },
    PointGeometry {
        coordinates: Box<Node>,
        id: Box<Node>,
        properties: Box<Node>,
        bbox: Box<Node>,
    },
    ArcGeometry {
        arcs: Box<Node>,
        id: Box<Node>,
        properties: Box<Node>,
        bbox: Box<Node>,
    },
    Feature {
        geometry: Box<Node>,
        properties: Box<Node>,
        id: Box<Node>,
        bbox: Box<Node>,
    },
    /// A decoded geometry carrying coordinates and nothing else.
    BareGeometry { coordinates: Box<Node> },
    FeatureCollection { features: Box<Node> },
}

impl Node {
    /// Ingest a plain JSON tree. Produces only the generic variants.
    pub fn from_json(value: &Value) -> Node {
        match value {
            Value::Null => Node::Absent,
            Value::Bool(b) => Node::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else {
                    // Covers floats and the rare u64 beyond i64 range.
                    Node::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Node::Str(s.clone()),
            Value::Array(items) => Node::Seq(items.iter().map(Node::from_json).collect()),
            Value::Object(map) => Node::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Human-readable name of this node's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Absent => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) => "integer",
            Node::Float(_) => "float",
            Node::Str(_) => "string",
            Node::Seq(_) => "sequence",
            Node::Map(_) => "mapping",
            Node::Topology { .. } => "topology",
            Node::Transform { .. } => "transform",
            Node::GeometryCollection { .. } => "geometry collection",
            Node::PointGeometry { .. } => "point geometry",
            Node::ArcGeometry { .. } => "arc geometry",
            Node::Feature { .. } => "feature",
            Node::BareGeometry { .. } => "bare geometry",
            Node::FeatureCollection { .. } => "feature collection",
        }
    }
}

// ─── Generic ingestion ──────────────────────────────────────────────────────

/// Conversion of producer output into a comparison node.
///
/// Implemented for scalars, nested vectors, arrays, optionals, and every
/// native domain type, so producer closures can hand results to the driver
/// without per-call-site glue.
pub trait IntoNode {
    fn into_node(self) -> Node;
}

impl IntoNode for Node {
    fn into_node(self) -> Node {
        self
    }
}

impl IntoNode for f64 {
    fn into_node(self) -> Node {
        Node::Float(self)
    }
}

impl IntoNode for i64 {
    fn into_node(self) -> Node {
        Node::Int(self)
    }
}

impl IntoNode for i32 {
    fn into_node(self) -> Node {
        Node::Int(self as i64)
    }
}

impl IntoNode for bool {
    fn into_node(self) -> Node {
        Node::Bool(self)
    }
}

impl IntoNode for String {
    fn into_node(self) -> Node {
        Node::Str(self)
    }
}

impl IntoNode for &str {
    fn into_node(self) -> Node {
        Node::Str(self.to_string())
    }
}

impl IntoNode for Value {
    fn into_node(self) -> Node {
        Node::from_json(&self)
    }
}

impl<T: IntoNode> IntoNode for Vec<T> {
    fn into_node(self) -> Node {
        Node::Seq(self.into_iter().map(IntoNode::into_node).collect())
    }
}

impl<T: IntoNode, const N: usize> IntoNode for [T; N] {
    fn into_node(self) -> Node {
        Node::Seq(self.into_iter().map(IntoNode::into_node).collect())
    }
}

impl<T: IntoNode> IntoNode for Option<T> {
    fn into_node(self) -> Node {
        match self {
            Some(inner) => inner.into_node(),
            None => Node::Absent,
        }
    }
}

impl<T: IntoNode> IntoNode for BTreeMap<String, T> {
    fn into_node(self) -> Node {
        Node::Map(
            self.into_iter()
                .map(|(k, v)| (k, v.into_node()))
                .collect(),
        )
    }
}

// ─── Domain ingestion ───────────────────────────────────────────────────────

impl From<Transform> for Node {
    fn from(t: Transform) -> Node {
        Node::Transform {
            scale: Box::new(t.scale.into_node()),
            translate: Box::new(t.translate.into_node()),
        }
    }
}

impl From<Topology> for Node {
    fn from(t: Topology) -> Node {
        Node::Topology {
            bbox: Box::new(t.bbox.into_node()),
            transform: Box::new(t.transform.map(Node::from).into_node()),
            objects: Box::new(t.objects.map(objects_node).into_node()),
            arcs: Box::new(t.arcs.into_node()),
        }
    }
}

fn objects_node(objects: BTreeMap<String, Geometry>) -> Node {
    Node::Map(
        objects
            .into_iter()
            .map(|(name, geometry)| (name, Node::from(geometry)))
            .collect(),
    )
}

impl From<Geometry> for Node {
    fn from(g: Geometry) -> Node {
        let id = Box::new(g.id.into_node());
        let properties = Box::new(g.properties.into_node());
        let bbox = Box::new(g.bbox.into_node());
        match g.kind {
            GeometryKind::GeometryCollection { geometries } => Node::GeometryCollection {
                geometries: Box::new(geometries.into_node()),
                id,
                properties,
                bbox,
            },
            GeometryKind::Point { coordinates } => Node::PointGeometry {
                coordinates: Box::new(coordinates.into_node()),
                id,
                properties,
                bbox,
            },
            GeometryKind::MultiPoint { coordinates } => Node::PointGeometry {
                coordinates: Box::new(coordinates.into_node()),
                id,
                properties,
                bbox,
            },
            GeometryKind::LineString { arcs } => Node::ArcGeometry {
                arcs: Box::new(arcs.into_node()),
                id,
                properties,
                bbox,
            },
            GeometryKind::MultiLineString { arcs } => Node::ArcGeometry {
                arcs: Box::new(arcs.into_node()),
                id,
                properties,
                bbox,
            },
            GeometryKind::Polygon { arcs } => Node::ArcGeometry {
                arcs: Box::new(arcs.into_node()),
                id,
                properties,
                bbox,
            },
            GeometryKind::MultiPolygon { arcs } => Node::ArcGeometry {
                arcs: Box::new(arcs.into_node()),
                id,
                properties,
                bbox,
            },
        }
    }
}

impl IntoNode for Geometry {
    fn into_node(self) -> Node {
        Node::from(self)
    }
}

impl From<FeatureGeometry> for Node {
    fn from(g: FeatureGeometry) -> Node {
        match g {
            // A bare collection has no coordinates of its own; it compares
            // through the geometry-collection rule with an empty envelope.
            FeatureGeometry::GeometryCollection { geometries } => Node::GeometryCollection {
                geometries: Box::new(geometries.into_node()),
                id: Box::new(Node::Absent),
                properties: Box::new(Node::Absent),
                bbox: Box::new(Node::Absent),
            },
            FeatureGeometry::Point { coordinates } => bare(coordinates.into_node()),
            FeatureGeometry::MultiPoint { coordinates } => bare(coordinates.into_node()),
            FeatureGeometry::LineString { coordinates } => bare(coordinates.into_node()),
            FeatureGeometry::MultiLineString { coordinates } => bare(coordinates.into_node()),
            FeatureGeometry::Polygon { coordinates } => bare(coordinates.into_node()),
            FeatureGeometry::MultiPolygon { coordinates } => bare(coordinates.into_node()),
        }
    }
}

fn bare(coordinates: Node) -> Node {
    Node::BareGeometry {
        coordinates: Box::new(coordinates),
    }
}

impl IntoNode for FeatureGeometry {
    fn into_node(self) -> Node {
        Node::from(self)
    }
}

impl From<Feature> for Node {
    fn from(f: Feature) -> Node {
        Node::Feature {
            geometry: Box::new(Node::from(f.geometry)),
            properties: Box::new(f.properties.into_node()),
            id: Box::new(f.id.into_node()),
            bbox: Box::new(f.bbox.into_node()),
        }
    }
}

impl IntoNode for Feature {
    fn into_node(self) -> Node {
        Node::from(self)
    }
}

impl From<FeatureCollection> for Node {
    fn from(fc: FeatureCollection) -> Node {
        Node::FeatureCollection {
            features: Box::new(fc.features.into_node()),
        }
    }
}

impl From<GeoJson> for Node {
    fn from(g: GeoJson) -> Node {
        match g {
            GeoJson::FeatureCollection(fc) => Node::from(fc),
            GeoJson::Feature(f) => Node::from(f),
        }
    }
}

impl IntoNode for GeoJson {
    fn into_node(self) -> Node {
        Node::from(self)
    }
}
