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

//! QuTiP gate spelling, `circuit.add_gate("NAME", targets, controls, arg_value)`,
//! and the QuTiP to ProjectQ translator.

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::{
    classify::{LineCategory, Syntax, classify},
    document::SourceLine,
    driver::{ADVISORY, Translation, Translator},
    error::{FatalError, LineError},
    gate::{Axis, Gate},
    projectq,
    resolver::{QUBIT_PREFIX, name_of},
    scope::MetaScope,
    syntax::{call_arguments, split_arguments, unquote, unwrap_group},
};

static CIRCUIT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:[A-Za-z_][A-Za-z0-9_]*\.)*QubitCircuit\s*\(")
        .expect("declaration pattern should compile")
});

static RECEIVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_.]*)\.add_gate\(").expect("receiver pattern should compile")
});

static KEYWORD_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=([^=].*)$").expect("keyword pattern should compile")
});

/// Arguments of one `add_gate(...)` call, split into positional and keyword
/// forms. The gate name is not among the positionals.
#[derive(Debug, Default)]
struct CallArguments {
    name: String,
    positional: Vec<String>,
    keywords: Vec<(String, String)>,
}

impl CallArguments {
    fn parse(inner: &str) -> Result<Self, LineError> {
        let mut call = CallArguments::default();
        let mut name = None;
        for argument in split_arguments(inner) {
            let keyword = KEYWORD_ARGUMENT
                .captures(&argument)
                .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()));
            match keyword {
                Some((key, value)) if key == "name" || key == "gate" => name = Some(value),
                Some(pair) => call.keywords.push(pair),
                None if name.is_none() && call.positional.is_empty() => name = Some(argument),
                None => call.positional.push(argument),
            }
        }
        let name = name.ok_or_else(|| LineError::malformed("add_gate", "missing gate name"))?;
        call.name = unquote(&name)
            .ok_or_else(|| LineError::malformed("add_gate", format!("gate name {name} is not a string")))?
            .to_string();
        Ok(call)
    }

    fn keyword(&self, key: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn targets(&self) -> Result<Vec<String>, LineError> {
        let targets = self
            .keyword("targets")
            .or(self.positional.first().map(String::as_str))
            .ok_or_else(|| LineError::malformed(&self.name, "missing targets"))?;
        Ok(split_arguments(unwrap_group(targets)))
    }

    fn target(&self) -> Result<String, LineError> {
        let mut targets = self.targets()?;
        match targets.len() {
            1 => Ok(targets.remove(0)),
            n => Err(LineError::malformed(
                &self.name,
                format!("expected 1 target, got {n}"),
            )),
        }
    }

    /// The `controls` slot, for gates without an angle.
    fn controls(&self) -> Option<String> {
        present(self.keyword("controls").or(self.positional.get(1).map(String::as_str)))
    }

    /// The `(controls, angle)` slots of an angle gate. A single positional
    /// argument after the targets is the angle.
    fn controls_and_angle(&self) -> (Option<String>, Option<String>) {
        let after: Vec<&str> = self
            .positional
            .iter()
            .skip(1)
            .take(2)
            .map(String::as_str)
            .collect();
        let (controls, angle) = match after.as_slice() {
            [] => (None, None),
            [angle] => (None, Some(*angle)),
            [controls, angle, ..] => (Some(*controls), Some(*angle)),
        };
        (
            present(self.keyword("controls").or(controls)),
            present(self.keyword("arg_value").or(angle)),
        )
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "None")
        .map(str::to_string)
}

/// A QuTiP gate together with the qubit in its `controls` slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateCall {
    pub gate: Gate,
    pub controls: Option<String>,
}

const ADD_GATE: &str = ".add_gate(";

/// The object a gate is added to, `circuit` in `circuit.add_gate(...)`.
pub fn receiver(body: &str) -> Option<&str> {
    RECEIVER.captures(body).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Parse a QuTiP `add_gate` line.
pub fn parse_gate(body: &str) -> Result<GateCall, LineError> {
    let start = body.find(ADD_GATE).ok_or(LineError::Unrecognized)?;
    let open = start + ADD_GATE.len() - 1;
    let inner = call_arguments(body, open)
        .ok_or_else(|| LineError::malformed("add_gate", "unbalanced parentheses"))?;
    let call = CallArguments::parse(inner)?;
    debug!("Gate found: {}", call.name);

    let name = call.name.as_str();
    match name {
        "SNOT" => Ok(GateCall {
            gate: Gate::Hadamard(call.target()?),
            controls: call.controls(),
        }),
        "RX" | "RY" | "RZ" => {
            let axis = Axis::try_from(name.chars().nth(1).unwrap_or_default())
                .map_err(|e| LineError::malformed(name, e))?;
            let (controls, angle) = call.controls_and_angle();
            let angle = angle.unwrap_or_else(|| "pi".to_string());
            Ok(GateCall {
                gate: Gate::rotation(axis, &angle, call.target()?),
                controls,
            })
        }
        "CNOT" => {
            let control = call
                .controls()
                .ok_or_else(|| LineError::malformed(name, "missing second qubit"))?;
            Ok(GateCall {
                gate: Gate::Cnot(call.target()?, control),
                controls: None,
            })
        }
        "SWAP" | "SQRTSWAP" => Ok(GateCall {
            gate: Gate::swap(name == "SQRTSWAP", call.targets()?)?,
            controls: call.controls(),
        }),
        "CPHASE" => {
            let (controls, angle) = call.controls_and_angle();
            let angle = angle.ok_or_else(|| LineError::malformed(name, "missing angle"))?;
            Ok(GateCall {
                gate: Gate::Phase {
                    angle,
                    qubit: call.target()?,
                },
                controls,
            })
        }
        "ISWAP" => Err(LineError::NoCounterpart(name.to_string())),
        _ => Err(LineError::UnknownGate(name.to_string())),
    }
}

/// Spell a gate as an `add_gate` call on `circuit`, with an optional control.
pub fn emit_gate(circuit: &str, gate: &Gate, control: Option<&str>) -> Result<String, LineError> {
    let controls = control.unwrap_or("None");
    let arguments = match gate {
        Gate::Hadamard(q) => match control {
            Some(c) => format!("\"SNOT\", {q}, {c}"),
            None => format!("\"SNOT\", {q}"),
        },
        Gate::Pauli(axis, q) => format!("\"R{axis}\", {q}, {controls}, pi"),
        Gate::Rotation { axis, angle, qubit } => {
            format!("\"R{axis}\", {qubit}, {controls}, {angle}")
        }
        Gate::Cnot(a, b) => {
            if control.is_some() {
                return Err(LineError::NoCounterpart("controlled CNOT".to_string()));
            }
            format!("\"CNOT\", {a}, {b}")
        }
        Gate::Swap { sqrt, qubits } => {
            let name = if *sqrt { "SQRTSWAP" } else { "SWAP" };
            let qubits = qubits.join(", ");
            match control {
                Some(c) => format!("\"{name}\", [{qubits}], {c}"),
                None => format!("\"{name}\", [{qubits}]"),
            }
        }
        Gate::Phase { angle, qubit } => format!("\"CPHASE\", {qubit}, {controls}, {angle}"),
    };
    Ok(format!("{circuit}.add_gate({arguments})"))
}

/// Circuit variable name and register size of the first `QubitCircuit`
/// declaration in a script.
pub fn find_declaration(lines: &[SourceLine]) -> Option<(String, usize)> {
    lines.iter().find_map(|line| {
        let caps = CIRCUIT_DECLARATION.captures(&line.text)?;
        let open = caps.get(0)?.end() - 1;
        let arguments = split_arguments(call_arguments(&line.text, open)?);
        let size = arguments.first().map(|first| match KEYWORD_ARGUMENT.captures(first) {
            Some(kw) if &kw[1] == "N" => kw[2].trim().to_string(),
            _ => first.clone(),
        })?;
        let size = size.parse::<usize>().ok()?;
        debug!("{}: circuit {} with {} qubits", line.number, &caps[1], size);
        Some((caps[1].to_string(), size))
    })
}

/// Highest numeric qubit position a gate call touches, controls included.
fn highest_position(call: GateCall) -> Option<usize> {
    let position = |q: &str| q.trim().parse::<usize>().ok();
    let mut highest = call.controls.as_deref().and_then(position);
    // Only the visit matters, the mapped gate is discarded.
    let _ = call.gate.map_qubits(|q| {
        highest = highest.max(position(q));
        Ok(q.to_string())
    });
    highest
}

/// Rewrites a QuTiP `QubitCircuit` script as a ProjectQ script.
#[derive(Debug)]
pub struct QutipToProjectq {
    syntax: Syntax,
    circuit: String,
    qubits: usize,
}

impl QutipToProjectq {
    /// Fails when the script never declares a register of known size.
    ///
    /// Gates on positions past the declared size still get a qubit: the
    /// register is grown to the highest position any gate on the circuit uses.
    pub fn new(lines: &[SourceLine]) -> Result<Self, FatalError> {
        let (circuit, declared) = find_declaration(lines).ok_or(FatalError::NoQubitDefinitions)?;
        let syntax = Syntax::qutip();
        let used = lines
            .iter()
            .filter(|line| classify(&line.text, &syntax) == LineCategory::GateApplication)
            .filter(|line| receiver(&line.text) == Some(circuit.as_str()))
            .filter_map(|line| parse_gate(&line.text).ok())
            .filter_map(highest_position)
            .max()
            .map_or(0, |p| p + 1);
        if used > declared {
            warn!("{circuit} declares {declared} qubits but gates use {used}");
        }
        Ok(Self {
            syntax,
            circuit,
            qubits: declared.max(used),
        })
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }
}

impl Translator for QutipToProjectq {
    fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    fn preamble(&self) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            "from projectq import MainEngine".to_string(),
            "from projectq.ops import *".to_string(),
            String::new(),
            "eng = MainEngine()".to_string(),
        ];
        lines.extend((0..self.qubits).map(|i| format!("{QUBIT_PREFIX}{i} = eng.allocate_qubit()")));
        lines.push(String::new());
        lines
    }

    fn postamble(&self) -> Vec<String> {
        vec![
            String::new(),
            "eng.flush()".to_string(),
            String::new(),
            "# Add desired measurements below".to_string(),
        ]
    }

    fn suppresses_assignment(&self, body: &str) -> bool {
        body.contains("QubitCircuit(")
    }

    fn supports_meta_scopes(&self) -> bool {
        false
    }

    fn translate_gate(&self, body: &str, scope: Option<&MetaScope>) -> Result<Translation, LineError> {
        if scope.is_some() {
            return Err(LineError::ScopeNotApplicable);
        }
        match receiver(body) {
            Some(name) if name == self.circuit => {}
            other => {
                return Err(LineError::UnknownCircuit(
                    other.unwrap_or_default().to_string(),
                ));
            }
        }
        let call = parse_gate(body)?;
        let gate = call.gate.map_qubits(name_of)?;
        debug!("Parsed gate {:?}", gate);

        let advisory = matches!(gate, Gate::Phase { .. }).then_some(ADVISORY);
        let line = projectq::emit_gate(&gate);
        let lines = match call.controls {
            None => vec![line],
            Some(control) => vec![
                format!("with Control(eng, {}):", name_of(&control)?),
                format!("    {line}"),
            ],
        };
        Ok(Translation { lines, advisory })
    }
}
