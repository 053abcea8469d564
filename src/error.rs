use serde::{Serialize, Serializer};
use std::fmt;

/// One step into the comparison tree: a mapping key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a comparison node, as the sequence of keys and indices walked
/// from the root of the compared artifact.
///
/// Renders in the usual dotted form, e.g. `objects.land.geometries[0].arcs[2]`.
/// The root renders as `$`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub(crate) fn push_key(&mut self, key: &str) {
        self.0.push(Segment::Key(key.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.0.push(Segment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(k) if i == 0 => write!(f, "{}", k)?,
                Segment::Key(k) => write!(f, ".{}", k)?,
                Segment::Index(n) => write!(f, "[{}]", n)?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Failure category for an equivalence check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// Values disagree after correct classification.
    Value,
    /// A key present on the actual side is missing on the expected side.
    MissingKey,
    /// The actual side is null/absent but the expected side holds a value,
    /// or vice versa.
    NullAsymmetry,
    /// Sequences of different lengths.
    Length,
    /// The expected side's declared `type` string contradicts the kind
    /// inferred from the actual side's shape.
    TypeTag,
    /// A node matches none of the recognized comparison shapes.
    Classification,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MismatchKind::Value => "value mismatch",
            MismatchKind::MissingKey => "missing key",
            MismatchKind::NullAsymmetry => "null asymmetry",
            MismatchKind::Length => "length mismatch",
            MismatchKind::TypeTag => "type tag mismatch",
            MismatchKind::Classification => "classification failure",
        };
        write!(f, "{}", name)
    }
}

/// Produced by the oracle at the first point where the two sides disagree.
///
/// The path identifies the offending field so a failed scenario can be
/// debugged from the report alone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mismatch {
    pub kind: MismatchKind,
    pub path: Path,
    pub message: String,
}

impl Mismatch {
    pub(crate) fn new(kind: MismatchKind, path: &Path, message: impl Into<String>) -> Self {
        Mismatch {
            kind,
            path: path.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.path, self.message)
    }
}

impl std::error::Error for Mismatch {}

/// Produced when a fixture topology cannot be read or parsed.
#[derive(Debug)]
pub struct LoadError {
    pub path: std::path::PathBuf,
    pub message: String,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for LoadError {}
