//! Result records for pipeline runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use quilt_ir::Circuit;

/// Gate statistics of one circuit snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitStats {
    /// Total gate count.
    pub gates: usize,
    /// Multi-qubit (entangling) gate count.
    pub multi_qubit_gates: usize,
    /// Circuit depth.
    pub depth: usize,
}

impl CircuitStats {
    /// Snapshot a circuit.
    pub fn of(circuit: &Circuit) -> Self {
        Self {
            gates: circuit.num_gates(),
            multi_qubit_gates: circuit.num_multi_qubit_gates(),
            depth: circuit.depth(),
        }
    }
}

/// The result record of one pipeline run on one circuit.
///
/// Every field is named; consumers address results by field, never by
/// tuple position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Circuit name.
    pub name: String,
    /// Wire count.
    pub num_qubits: usize,
    /// Width-bearing partitioner label, e.g. `quick3`.
    pub partitioner: String,
    /// Synthesis algorithm label, or `baseline-o{level}` for baseline runs.
    pub algorithm: String,
    /// Replace-filter label.
    pub filter: String,
    /// Identity tolerance used.
    pub threshold: f64,
    /// Number of blocks the circuit was cut into.
    pub num_blocks: usize,
    /// Stats of the canonicalized input.
    pub before: CircuitStats,
    /// Stats of the canonicalized output.
    pub after: CircuitStats,
    /// Mean gates per block before resynthesis.
    pub avg_block_gates_before: f64,
    /// Mean gates per block after resynthesis.
    pub avg_block_gates_after: f64,
    /// Blocks whose resynthesized form was accepted by the filter.
    pub blocks_replaced: usize,
    /// Wall-clock run time in milliseconds.
    pub duration_ms: u64,
    /// When the record was produced.
    pub generated_at: DateTime<Utc>,
}

impl MetricsRecord {
    /// Serialize to pretty JSON.
    ///
    /// `serde_json` renders non-finite floats as `null`, which averages
    /// over zero blocks can produce; records carrying them are instead
    /// written with the offending numbers coerced to strings, so no
    /// information is silently dropped.
    pub fn to_json(&self) -> String {
        let all_finite = [
            self.threshold,
            self.avg_block_gates_before,
            self.avg_block_gates_after,
        ]
        .iter()
        .all(|f| f.is_finite());

        let result = if all_finite {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string_pretty(&self.coerced_value())
        };
        result.unwrap_or_else(|_| "{}".to_string())
    }

    /// JSON object with non-finite floats rendered as strings.
    fn coerced_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".into(), json!(self.name));
        map.insert("num_qubits".into(), json!(self.num_qubits));
        map.insert("partitioner".into(), json!(self.partitioner));
        map.insert("algorithm".into(), json!(self.algorithm));
        map.insert("filter".into(), json!(self.filter));
        map.insert("threshold".into(), float_value(self.threshold));
        map.insert("num_blocks".into(), json!(self.num_blocks));
        map.insert("before".into(), json!(self.before));
        map.insert("after".into(), json!(self.after));
        map.insert(
            "avg_block_gates_before".into(),
            float_value(self.avg_block_gates_before),
        );
        map.insert(
            "avg_block_gates_after".into(),
            float_value(self.avg_block_gates_after),
        );
        map.insert("blocks_replaced".into(), json!(self.blocks_replaced));
        map.insert("duration_ms".into(), json!(self.duration_ms));
        map.insert("generated_at".into(), json!(self.generated_at));
        Value::Object(map)
    }
}

fn float_value(f: f64) -> Value {
    if f.is_finite() {
        json!(f)
    } else {
        Value::String(f.to_string())
    }
}
