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

//! Error types for the conversion engine.
//!
//! There are two tiers. A [`FatalError`] stops a run before any line is
//! translated and carries the stable exit code reported to the user. A
//! [`LineError`] only ever affects one line: the driver flags that line as
//! untranslatable and carries on.

use std::path::PathBuf;

use thiserror::Error;

use crate::dialect::Dialect;

/// Errors that abort a conversion before the line pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Output filename contains invalid characters: {0}")]
    InvalidOutputName(String),

    #[error("Input file format matches output file format")]
    MatchingFormats,

    #[error("Conversion from {input} to {output} is not supported")]
    Unsupported { input: Dialect, output: Dialect },

    #[error("No qubits allocated in input script")]
    NoQubitDefinitions,
}

impl FatalError {
    /// Exit status reported for this error.
    pub fn code(&self) -> i32 {
        match self {
            FatalError::InputNotFound(_) => 1,
            FatalError::InvalidOutputName(_) => 2,
            FatalError::MatchingFormats => 3,
            FatalError::Unsupported { .. } => 4,
            FatalError::NoQubitDefinitions => 21,
        }
    }

    /// The message block printed before exiting.
    pub fn report(&self) -> String {
        format!(
            "FATAL ERROR:\n    Code: {}\n    Message: {}\n\nExiting...",
            self.code(),
            self
        )
    }
}

/// Reasons a single line could not be translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("unrecognized line")]
    Unrecognized,

    #[error("unknown gate '{0}'")]
    UnknownGate(String),

    #[error("gate '{gate}' has malformed arguments: {detail}")]
    MalformedArguments { gate: String, detail: String },

    #[error("'{0}' has no equivalent in the target dialect")]
    NoCounterpart(String),

    #[error("gate added to '{0}', which is not the declared circuit")]
    UnknownCircuit(String),

    #[error("'{0}' is not a qubit position")]
    InvalidQubit(String),

    #[error("meta-scope cannot be applied to this line")]
    ScopeNotApplicable,

    #[error("line lies inside a meta-scope that was already applied")]
    ScopeBody,
}

impl LineError {
    pub(crate) fn malformed(gate: &str, detail: impl Into<String>) -> Self {
        LineError::MalformedArguments {
            gate: gate.to_string(),
            detail: detail.into(),
        }
    }
}
