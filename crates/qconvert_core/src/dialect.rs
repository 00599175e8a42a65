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

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The circuit scripting interfaces known to the converter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// Named qubits, pipe-style gate application
    #[value(name = "projectq")]
    ProjectQ,
    /// Positional qubits in a `QubitCircuit` register
    #[value(name = "qutip")]
    Qutip,
    /// Accepted on the command line, no translator yet
    #[value(name = "qiskit")]
    Qiskit,
}

impl Dialect {
    /// File extension of scripts written in this dialect.
    pub fn extension(&self) -> &'static str {
        "py"
    }

    /// Whether a translator exists from `self` to `target`.
    pub fn converts_to(&self, target: Dialect) -> bool {
        matches!(
            (self, target),
            (Dialect::ProjectQ, Dialect::Qutip) | (Dialect::Qutip, Dialect::ProjectQ)
        )
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectQ => write!(f, "ProjectQ"),
            Self::Qutip => write!(f, "QuTiP"),
            Self::Qiskit => write!(f, "Qiskit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_projectq_and_qutip_pair_up() {
        assert!(Dialect::ProjectQ.converts_to(Dialect::Qutip));
        assert!(Dialect::Qutip.converts_to(Dialect::ProjectQ));
        assert!(!Dialect::ProjectQ.converts_to(Dialect::ProjectQ));
        assert!(!Dialect::Qiskit.converts_to(Dialect::Qutip));
        assert!(!Dialect::Qutip.converts_to(Dialect::Qiskit));
    }

    #[test]
    fn command_line_names() {
        assert_eq!(
            Some(Dialect::ProjectQ),
            Dialect::from_str("projectq", false).ok()
        );
        assert_eq!(Some(Dialect::Qutip), Dialect::from_str("qutip", false).ok());
        assert_eq!("QuTiP", Dialect::Qutip.to_string());
    }
}
