use serde::{Deserialize, Serialize};

use crate::circuit::{CircuitProgram, GateOperation};
use crate::error::{Result, SimError};
use crate::gate::Gate;
use crate::simulation::SimulationResult;

#[derive(Serialize, Deserialize)]
struct ProgramJson {
    /// Missing means "infer from the operations".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_qubits: Option<usize>,
    operations: Vec<OperationJson>,
}

#[derive(Serialize, Deserialize)]
struct OperationJson {
    gate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    qubit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    control: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<usize>,
}

fn operation_to_json(op: &GateOperation) -> OperationJson {
    match *op {
        GateOperation::SingleQubit { gate, qubit } => OperationJson {
            gate: gate.name().to_string(),
            qubit: Some(qubit),
            control: None,
            target: None,
        },
        GateOperation::ControlledNot { control, target } => OperationJson {
            gate: "CNOT".to_string(),
            qubit: None,
            control: Some(control),
            target: Some(target),
        },
    }
}

fn operation_from_json(oj: OperationJson) -> Result<GateOperation> {
    let name = oj.gate.as_str();
    if name.eq_ignore_ascii_case("CNOT") || name.eq_ignore_ascii_case("CX") {
        let control = oj
            .control
            .ok_or_else(|| SimError::Json("CNOT requires \"control\"".to_string()))?;
        let target = oj
            .target
            .ok_or_else(|| SimError::Json("CNOT requires \"target\"".to_string()))?;
        return Ok(GateOperation::ControlledNot { control, target });
    }
    let gate = Gate::from_name(name)
        .ok_or_else(|| SimError::Json(format!("unknown gate type: {}", name)))?;
    let qubit = oj
        .qubit
        .ok_or_else(|| SimError::Json(format!("{} gate requires \"qubit\"", gate)))?;
    Ok(GateOperation::SingleQubit { gate, qubit })
}

/// Serialize a program to a pretty-printed JSON string.
pub fn program_to_json(program: &CircuitProgram) -> Result<String> {
    let pj = ProgramJson {
        num_qubits: Some(program.num_qubits()),
        operations: program.operations().iter().map(operation_to_json).collect(),
    };
    Ok(serde_json::to_string_pretty(&pj)?)
}

/// Deserialize and validate a program.
///
/// When `num_qubits` is absent the register size is inferred with
/// [`CircuitProgram::infer_num_qubits`].
pub fn program_from_json(json: &str) -> Result<CircuitProgram> {
    let pj: ProgramJson = serde_json::from_str(json)?;
    let operations = pj
        .operations
        .into_iter()
        .map(operation_from_json)
        .collect::<Result<Vec<_>>>()?;
    match pj.num_qubits {
        Some(n) => CircuitProgram::new(n, operations),
        None => CircuitProgram::inferred(operations),
    }
}

/// Serialize a simulation result for the transport layer.
pub fn result_to_json(result: &SimulationResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}
