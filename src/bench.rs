//! The benchmark driver.
//!
//! Each scenario is a stateless pipeline: run the reference producer, run
//! the candidate producer, time both with a monotonic clock, hand the two
//! outputs to the oracle, and report. Scenarios execute strictly
//! sequentially so the two measured latencies stay comparable; an oracle
//! failure is captured in the scenario's report and never aborts the run.

use crate::compare::compare;
use crate::error::{LoadError, Mismatch};
use crate::node::Node;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

/// The topology operation a scenario benchmarks. The operations themselves
/// are black boxes to the driver; this names them for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Feature,
    Mesh,
    Merge,
    Bbox,
    Neighbors,
    Quantize,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Feature => "feature",
            Operation::Mesh => "mesh",
            Operation::Merge => "merge",
            Operation::Bbox => "bbox",
            Operation::Neighbors => "neighbors",
            Operation::Quantize => "quantize",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one benchmarked scenario: absolute times, their ratio, and
/// the oracle verdict.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub operation: Operation,
    pub reference_ms: f64,
    pub candidate_ms: f64,
    /// `reference_ms / candidate_ms`; above 1.0 the candidate is faster.
    pub ratio: f64,
    /// `None` when the outputs were equivalent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Mismatch>,
}

impl ScenarioReport {
    pub fn is_equivalent(&self) -> bool {
        self.mismatch.is_none()
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>20}: ratio: {:>6.3}, reference: {:>8.3} ms, candidate: {:>8.3} ms ",
            self.name, self.ratio, self.reference_ms, self.candidate_ms
        )?;
        match &self.mismatch {
            None => write!(f, "(equivalent)"),
            Some(m) => write!(f, "(mismatch: {})", m),
        }
    }
}

/// Run one scenario: reference first, then candidate, then the oracle.
///
/// The reference closure yields the expected-side plain JSON tree; the
/// candidate closure yields an already-ingested comparison node (any
/// producer output converts via [`crate::node::IntoNode`]).
pub fn run_scenario<R, C>(
    name: &str,
    operation: Operation,
    reference: R,
    candidate: C,
) -> ScenarioReport
where
    R: FnOnce() -> Value,
    C: FnOnce() -> Node,
{
    let start = Instant::now();
    let expected = reference();
    let reference_ms = start.elapsed().as_secs_f64() * 1_000.0;

    let start = Instant::now();
    let actual = candidate();
    let candidate_ms = start.elapsed().as_secs_f64() * 1_000.0;

    let mismatch = compare(&actual, &expected).err();
    let ratio = if candidate_ms > 0.0 {
        reference_ms / candidate_ms
    } else {
        f64::INFINITY
    };

    ScenarioReport {
        name: name.to_string(),
        operation,
        reference_ms,
        candidate_ms,
        ratio,
        mismatch,
    }
}

/// One (operation, input) pairing to benchmark. The producer closures
/// capture their input source and any operation-specific arguments, such as
/// the filter predicate mesh construction takes.
pub struct Scenario {
    pub name: String,
    pub operation: Operation,
    pub reference: Box<dyn FnOnce() -> Value>,
    pub candidate: Box<dyn FnOnce() -> Node>,
}

impl Scenario {
    pub fn new<R, C>(name: impl Into<String>, operation: Operation, reference: R, candidate: C) -> Self
    where
        R: FnOnce() -> Value + 'static,
        C: FnOnce() -> Node + 'static,
    {
        Scenario {
            name: name.into(),
            operation,
            reference: Box::new(reference),
            candidate: Box::new(candidate),
        }
    }
}

/// Run a list of scenarios in order, producing one report each. Scenarios
/// are independent: a mismatch in one never stops the rest.
pub fn run_scenarios(scenarios: Vec<Scenario>) -> Vec<ScenarioReport> {
    scenarios
        .into_iter()
        .map(|s| run_scenario(&s.name, s.operation, s.reference, s.candidate))
        .collect()
}

/// Load a fixture topology from a JSON file. The file handle is scoped to
/// this call.
pub fn load_topology(path: impl AsRef<std::path::Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
