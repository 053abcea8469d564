//! Differential-testing oracle and benchmark harness for TopoJSON
//! processing implementations.
//!
//! Given two independently produced representations of the same topology
//! artifact — one from a reference implementation as plain JSON, one from a
//! candidate implementation as a native value or plain JSON — this crate
//! decides whether they are semantically equivalent, tolerating
//! representational differences (native object vs. mapping, float rounding
//! within 1e-6, re-encoded JSON property strings) that are not correctness
//! differences:
//!
//! ```text
//! candidate output → Node (ingest) ─┐
//!                                   ├─ compare(actual, expected) → Ok | Mismatch
//! reference output → Value ─────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use topodiff::{Feature, FeatureGeometry, Node};
//!
//! let actual = Node::from(Feature {
//!     properties: None,
//!     geometry: FeatureGeometry::Point { coordinates: vec![1.0, 2.0] },
//!     id: None,
//!     bbox: None,
//! });
//! let expected = json!({
//!     "type": "Feature",
//!     "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
//! });
//!
//! assert!(topodiff::equivalent(&actual, &expected));
//! ```
//!
//! The benchmark driver in [`bench`] wraps the oracle for differential
//! benchmarking: it times a reference and a candidate producer for one
//! operation, checks their outputs for equivalence, and reports both
//! latencies, their ratio, and the verdict.

pub mod bench;
pub mod compare;
pub mod error;
pub mod node;
pub mod types;

pub use error::*;
pub use types::*;

// Re-export entry-point items at the crate root for convenience.
pub use bench::{Operation, Scenario, ScenarioReport, load_topology, run_scenario, run_scenarios};
pub use compare::{FLOAT_TOLERANCE, compare, equivalent};
pub use node::{IntoNode, Node};
