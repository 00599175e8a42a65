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

//! Mapping between named qubits (ProjectQ) and register positions (QuTiP).

use log::debug;

use crate::{document::SourceLine, error::LineError};

const ALLOCATION: &str = ".allocate_qubit()";

/// Prefix of the qubit names synthesised from register positions.
pub const QUBIT_PREFIX: &str = "qubit_";

/// Named qubits in order of their first allocation line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QubitRegistry {
    names: Vec<String>,
}

impl QubitRegistry {
    /// Collect the allocation lines of a whole file.
    /// Commented-out allocations are ignored.
    pub fn scan(lines: &[SourceLine]) -> Self {
        let mut registry = Self::default();
        for line in lines {
            let text = line.text.trim_start();
            if text.starts_with('#') || !text.contains(ALLOCATION) {
                continue;
            }
            if let Some((name, _)) = text.split_once('=') {
                let name = name.trim();
                let position = registry.register(name);
                debug!("{}: qubit {} at position {}", line.number, name, position);
            }
        }
        registry
    }

    /// Register `name` if unseen and return its position.
    pub fn register(&mut self, name: &str) -> usize {
        match self.names.iter().position(|n| n == name) {
            Some(position) => position,
            None => {
                self.names.push(name.to_string());
                self.names.len() - 1
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Rewrite a qubit reference for the position-based side. Names that were
    /// never allocated (function parameters, say) pass through unchanged.
    pub fn resolve(&self, token: &str) -> String {
        let token = token.trim();
        match self.position_of(token) {
            Some(position) => position.to_string(),
            None => token.to_string(),
        }
    }
}

/// Name synthesised for a register position, `qubit_<position>`.
pub fn name_of(position: &str) -> Result<String, LineError> {
    let position = position.trim();
    position
        .parse::<usize>()
        .map(|p| format!("{QUBIT_PREFIX}{p}"))
        .map_err(|_| LineError::InvalidQubit(position.to_string()))
}

/// Whether `line` is the allocation of a qubit.
pub fn is_allocation(line: &str) -> bool {
    line.contains("allocate_qubit(")
}
