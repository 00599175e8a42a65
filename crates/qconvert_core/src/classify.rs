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

use std::fmt::Display;

use crate::syntax::{call_arguments, find_top_level, is_bare_call, split_arguments};

const CONTROL_FLOW_KEYWORDS: [&str; 5] = ["if", "elif", "else", "for", "while"];

/// The syntactic shape of one source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCategory {
    Empty,
    Definition,
    Import,
    Comment,
    Assignment,
    Conditional,
    PrintCall,
    GateApplication,
    MetaScopeOpen(MetaKind),
    ReturnStatement,
    BareCall,
    Unrecognized,
}

impl LineCategory {
    /// Inert lines never consume a pending meta-scope.
    pub fn is_inert(&self) -> bool {
        matches!(self, LineCategory::Empty | LineCategory::Comment)
    }
}

/// Which meta-scope a `with` line opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaKind {
    Inversion,
    /// Carries the control qubit exactly as written in the source
    ControlledBy(String),
}

impl Display for LineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineCategory::Empty => write!(f, "empty line"),
            LineCategory::Definition => write!(f, "function definition"),
            LineCategory::Import => write!(f, "import statement"),
            LineCategory::Comment => write!(f, "comment"),
            LineCategory::Assignment => write!(f, "assignment"),
            LineCategory::Conditional => write!(f, "control flow"),
            LineCategory::PrintCall => write!(f, "print statement"),
            LineCategory::GateApplication => write!(f, "gate"),
            LineCategory::MetaScopeOpen(MetaKind::Inversion) => write!(f, "meta gate (dagger)"),
            LineCategory::MetaScopeOpen(MetaKind::ControlledBy(q)) => {
                write!(f, "meta gate (control on {q})")
            }
            LineCategory::ReturnStatement => write!(f, "return statement"),
            LineCategory::BareCall => write!(f, "function call"),
            LineCategory::Unrecognized => write!(f, "unrecognized line"),
        }
    }
}

/// Dialect-specific markers consulted by [`classify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    gate_marker: String,
}

impl Syntax {
    /// Pipe-style gate application, `H | q1`.
    pub fn projectq() -> Self {
        Self {
            gate_marker: " | ".to_string(),
        }
    }

    /// Register method calls, `circuit.add_gate("SNOT", 0)`, on any receiver.
    pub fn qutip() -> Self {
        Self {
            gate_marker: ".add_gate(".to_string(),
        }
    }

    pub fn gate_marker(&self) -> &str {
        &self.gate_marker
    }
}

/// Classify one line. The checks form a fixed priority chain: the first match wins.
pub fn classify(line: &str, syntax: &Syntax) -> LineCategory {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return LineCategory::Empty;
    };

    if first == "def" || (first == "async" && tokens.next() == Some("def")) {
        LineCategory::Definition
    } else if first == "import" || first == "from" {
        LineCategory::Import
    } else if first.starts_with('#') {
        LineCategory::Comment
    } else if find_top_level(line, " = ").is_some() {
        LineCategory::Assignment
    } else if CONTROL_FLOW_KEYWORDS.contains(&first.trim_end_matches(':')) {
        LineCategory::Conditional
    } else if line.contains("print(") {
        LineCategory::PrintCall
    } else if line.contains(syntax.gate_marker()) {
        LineCategory::GateApplication
    } else if first == "with" {
        meta_kind(line).map_or(LineCategory::Unrecognized, LineCategory::MetaScopeOpen)
    } else if first == "return" {
        LineCategory::ReturnStatement
    } else if is_bare_call(line) {
        LineCategory::BareCall
    } else {
        LineCategory::Unrecognized
    }
}

fn meta_kind(line: &str) -> Option<MetaKind> {
    if line.contains("Dagger(") {
        return Some(MetaKind::Inversion);
    }
    let open = line.find("Control(")? + "Control".len();
    let args = split_arguments(call_arguments(line, open)?);
    args.get(1).map(|qubit| MetaKind::ControlledBy(qubit.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pq(line: &str) -> LineCategory {
        classify(line, &Syntax::projectq())
    }

    #[test]
    fn projectq_lines() {
        assert_eq!(LineCategory::Empty, pq("   \t"));
        assert_eq!(LineCategory::Definition, pq("def create_bell_pair(eng):"));
        assert_eq!(LineCategory::Definition, pq("async def run(eng):"));
        assert_eq!(LineCategory::Import, pq("from projectq.ops import H"));
        assert_eq!(LineCategory::Import, pq("import projectq"));
        assert_eq!(LineCategory::Comment, pq("    # put it in superposition"));
        assert_eq!(LineCategory::Comment, pq("#no space"));
        assert_eq!(LineCategory::Assignment, pq("q1 = eng.allocate_qubit()"));
        assert_eq!(LineCategory::Conditional, pq("if verbose:"));
        assert_eq!(LineCategory::Conditional, pq("else:"));
        assert_eq!(LineCategory::PrintCall, pq("print(\"Measured\")"));
        assert_eq!(LineCategory::GateApplication, pq("CNOT | (b1, b2)"));
        assert_eq!(LineCategory::ReturnStatement, pq("return b1, b2"));
        assert_eq!(LineCategory::BareCall, pq("eng.flush()"));
        assert_eq!(LineCategory::Unrecognized, pq("del b2"));
    }

    #[test]
    fn meta_scopes() {
        assert_eq!(
            LineCategory::MetaScopeOpen(MetaKind::Inversion),
            pq("    with Dagger(eng):")
        );
        assert_eq!(
            LineCategory::MetaScopeOpen(MetaKind::ControlledBy("b1".to_string())),
            pq("    with Control(eng, b1):")
        );
        assert_eq!(LineCategory::Unrecognized, pq("with open(path) as f:"));
        assert_eq!(LineCategory::Unrecognized, pq("with Control(eng):"));
    }

    #[test]
    fn priority_order_is_significant() {
        // Print wins over the pipe marker.
        assert_eq!(LineCategory::PrintCall, pq("print(\"a | b\")"));
        // Named parameters are not assignments.
        assert_eq!(LineCategory::BareCall, pq("run(eng, verbose = True)"));
        // Assignments win over gates.
        assert_eq!(LineCategory::Assignment, pq("x = a | b"));
        // Comments win over everything that follows.
        assert_eq!(LineCategory::Comment, pq("# X | q1"));
    }

    #[test]
    fn qutip_gate_calls_on_any_circuit() {
        let syntax = Syntax::qutip();
        assert_eq!(
            LineCategory::GateApplication,
            classify("circuit.add_gate(\"CNOT\", 0, 1)", &syntax)
        );
        assert_eq!(
            LineCategory::GateApplication,
            classify("    qc.add_gate(\"ISWAP\", [1, 2])", &syntax)
        );
        assert_eq!(LineCategory::BareCall, classify("circuit.run(state)", &syntax));
        assert_eq!(
            LineCategory::Assignment,
            classify("circuit = QubitCircuit(3)", &syntax)
        );
    }
}
