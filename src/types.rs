use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

// ─── Topology side ──────────────────────────────────────────────────────────

/// Coordinate transform of a quantized topology: two scale factors and two
/// translation offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vec<f64>,
    pub translate: Vec<f64>,
}

/// A TopoJSON topology as produced natively by a candidate implementation.
///
/// Every field is optional so that each one independently participates in
/// the null-asymmetry rule: a `None` here matches only an absent or null
/// field on the expected side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Topology {
    pub bbox: Option<Vec<f64>>,
    pub transform: Option<Transform>,
    pub objects: Option<BTreeMap<String, Geometry>>,
    pub arcs: Option<Vec<Vec<Vec<f64>>>>,
}

/// A topology-side geometry object: the geometry payload plus the optional
/// envelope fields shared by every TopoJSON geometry.
///
/// `properties` is a pre-encoded JSON string, the form native producers
/// emit; the oracle decodes it before comparing.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub kind: GeometryKind,
    pub id: Option<Value>,
    pub properties: Option<String>,
    pub bbox: Option<Vec<f64>>,
}

impl Geometry {
    /// A geometry with no id, properties, or bbox.
    pub fn bare(kind: GeometryKind) -> Self {
        Geometry {
            kind,
            id: None,
            properties: None,
            bbox: None,
        }
    }
}

/// Geometry payload variants. Point families carry coordinates; line and
/// polygon families reference shared arcs by index.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryKind {
    GeometryCollection { geometries: Vec<Geometry> },
    Point { coordinates: Vec<f64> },
    MultiPoint { coordinates: Vec<Vec<f64>> },
    LineString { arcs: Vec<i64> },
    MultiLineString { arcs: Vec<Vec<i64>> },
    Polygon { arcs: Vec<Vec<i64>> },
    MultiPolygon { arcs: Vec<Vec<Vec<i64>>> },
}

// ─── Feature side ───────────────────────────────────────────────────────────

/// Result of feature extraction: either a collection (when the input object
/// was a GeometryCollection) or a single feature.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    FeatureCollection(FeatureCollection),
    Feature(Feature),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,
    pub geometry: FeatureGeometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
}

/// A decoded GeoJSON geometry carrying absolute coordinates and nothing
/// else. Mesh and merge produce these directly.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum FeatureGeometry {
    GeometryCollection { geometries: Vec<FeatureGeometry> },
    Point { coordinates: Vec<f64> },
    MultiPoint { coordinates: Vec<Vec<f64>> },
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
}

impl FeatureGeometry {
    /// The GeoJSON `type` name of this variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            FeatureGeometry::GeometryCollection { .. } => "GeometryCollection",
            FeatureGeometry::Point { .. } => "Point",
            FeatureGeometry::MultiPoint { .. } => "MultiPoint",
            FeatureGeometry::LineString { .. } => "LineString",
            FeatureGeometry::MultiLineString { .. } => "MultiLineString",
            FeatureGeometry::Polygon { .. } => "Polygon",
            FeatureGeometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }
}
