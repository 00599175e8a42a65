// Copyright contributors to the qconvert project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ProjectQ gate spelling, `Op | qubits`, and the ProjectQ to QuTiP translator.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::{
    classify::Syntax,
    document::SourceLine,
    driver::{ADVISORY, Translation, Translator},
    error::LineError,
    gate::{Axis, Gate},
    qutip,
    resolver::{QubitRegistry, is_allocation},
    scope::MetaScope,
    syntax::{find_top_level, split_arguments, unwrap_group},
};

static AXIS_ROTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^R([xyzXYZ])\s*\((.*)\)$").expect("rotation pattern should compile")
});

static PHASE_SHIFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R\s*\((.*)\)$").expect("phase pattern should compile"));

/// Register name used by the generated QuTiP script.
pub const CIRCUIT_NAME: &str = "quantum_circuit";

fn exactly<const N: usize>(op: &str, qubits: Vec<String>) -> Result<[String; N], LineError> {
    let found = qubits.len();
    qubits
        .try_into()
        .map_err(|_| LineError::malformed(op, format!("expected {N} qubit(s), got {found}")))
}

fn angle<'a>(op: &str, angle: &'a str) -> Result<&'a str, LineError> {
    let angle = angle.trim();
    if angle.is_empty() {
        return Err(LineError::malformed(op, "missing angle"));
    }
    Ok(angle)
}

/// Parse the body of a ProjectQ gate line, e.g. `CNOT | (b1, b2)`.
pub fn parse_gate(body: &str) -> Result<Gate, LineError> {
    let split = find_top_level(body, " | ").ok_or(LineError::Unrecognized)?;
    let op = body[..split].trim();
    let mut operand = &body[split + 3..];
    if let Some(comment) = find_top_level(operand, "#") {
        operand = &operand[..comment];
    }
    let qubits = split_arguments(unwrap_group(operand));

    match op {
        "H" => {
            let [q] = exactly(op, qubits)?;
            Ok(Gate::Hadamard(q))
        }
        "X" | "Y" | "Z" => {
            let [q] = exactly(op, qubits)?;
            let axis = op.chars().next().and_then(|c| Axis::try_from(c).ok());
            axis.map(|axis| Gate::Pauli(axis, q))
                .ok_or_else(|| LineError::UnknownGate(op.to_string()))
        }
        "CNOT" | "CX" => {
            let [a, b] = exactly(op, qubits)?;
            Ok(Gate::Cnot(a, b))
        }
        "Swap" | "SWAP" => Gate::swap(false, qubits),
        "SqrtSwap" | "SQRTSWAP" => Gate::swap(true, qubits),
        _ => {
            if let Some(caps) = AXIS_ROTATION.captures(op) {
                let axis = caps[1]
                    .chars()
                    .next()
                    .and_then(|c| Axis::try_from(c).ok())
                    .ok_or_else(|| LineError::UnknownGate(op.to_string()))?;
                let theta = angle(op, caps.get(2).map_or("", |m| m.as_str()))?;
                let [q] = exactly(op, qubits)?;
                Ok(Gate::rotation(axis, theta, q))
            } else if let Some(caps) = PHASE_SHIFT.captures(op) {
                let theta = angle(op, caps.get(1).map_or("", |m| m.as_str()))?;
                let [q] = exactly(op, qubits)?;
                Ok(Gate::Phase {
                    angle: theta.to_string(),
                    qubit: q,
                })
            } else {
                Err(LineError::UnknownGate(op.to_string()))
            }
        }
    }
}

/// Spell a gate the ProjectQ way.
pub fn emit_gate(gate: &Gate) -> String {
    match gate {
        Gate::Hadamard(q) => format!("H | {q}"),
        Gate::Pauli(axis, q) => format!("{axis} | {q}"),
        Gate::Rotation { axis, angle, qubit } => {
            format!("R{}({angle}) | {qubit}", axis.lower())
        }
        Gate::Cnot(a, b) => format!("CNOT | ({a}, {b})"),
        Gate::Swap { sqrt, qubits } => {
            let op = if *sqrt { "SqrtSwap" } else { "Swap" };
            format!("{op} | ({})", qubits.join(", "))
        }
        Gate::Phase { angle, qubit } => format!("R({angle}) | {qubit}"),
    }
}

/// Rewrites a ProjectQ script as a QuTiP `QubitCircuit` script.
#[derive(Debug)]
pub struct ProjectqToQutip {
    syntax: Syntax,
    registry: QubitRegistry,
}

impl ProjectqToQutip {
    pub fn new(lines: &[SourceLine]) -> Self {
        let registry = QubitRegistry::scan(lines);
        debug!("Found {} allocated qubits", registry.len());
        Self {
            syntax: Syntax::projectq(),
            registry,
        }
    }

    pub fn registry(&self) -> &QubitRegistry {
        &self.registry
    }
}

impl Translator for ProjectqToQutip {
    fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    fn preamble(&self) -> Vec<String> {
        vec![
            String::new(),
            "from numpy import pi".to_string(),
            "from qutip import *".to_string(),
            String::new(),
            format!("{CIRCUIT_NAME} = QubitCircuit({})", self.registry.len()),
            String::new(),
        ]
    }

    fn suppresses_assignment(&self, body: &str) -> bool {
        is_allocation(body) || body.contains("MainEngine(")
    }

    fn supports_meta_scopes(&self) -> bool {
        true
    }

    fn translate_gate(&self, body: &str, scope: Option<&MetaScope>) -> Result<Translation, LineError> {
        let gate = parse_gate(body)?.map_qubits(|q| Ok(self.registry.resolve(q)))?;
        debug!("Parsed gate {:?}", gate);

        let (gate, control) = match scope {
            None => (gate, None),
            Some(MetaScope::Inversion) => (gate.inverse()?, None),
            Some(MetaScope::ControlledBy(qubit)) => (gate, Some(self.registry.resolve(qubit))),
        };
        let advisory = matches!(gate, Gate::Phase { .. }).then_some(ADVISORY);
        let line = qutip::emit_gate(CIRCUIT_NAME, &gate, control.as_deref())?;
        Ok(Translation {
            lines: vec![line],
            advisory,
        })
    }
}
