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

//! Dialect-neutral description of the gates both translators understand.
//!
//! Each dialect module parses its own spelling into a [`Gate`] and emits a
//! [`Gate`] back in its own spelling. Qubit references and angles stay as
//! source text. Qubits are rewritten by [`Gate::map_qubits`], and angles are
//! only ever compared against π or negated.

use std::{f64::consts::PI, fmt::Display, sync::LazyLock};

use regex::Regex;

use crate::{error::LineError, syntax::unwrap_group};

static SIMPLE_OPERAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.]+$").expect("operand pattern should compile")
});

const PI_SPELLINGS: [&str; 4] = ["pi", "np.pi", "numpy.pi", "math.pi"];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn lower(&self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<char> for Axis {
    type Error = String;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'x' => Ok(Axis::X),
            'y' => Ok(Axis::Y),
            'z' => Ok(Axis::Z),
            c => Err(format!("Cannot convert {} to a rotation axis", c)),
        }
    }
}

/// A gate application with its qubit references and angle kept as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Hadamard(String),
    /// Rotation by π about an axis
    Pauli(Axis, String),
    Rotation {
        axis: Axis,
        angle: String,
        qubit: String,
    },
    /// Qubits in the order they were written
    Cnot(String, String),
    /// Variable arity, at least two qubits
    Swap { sqrt: bool, qubits: Vec<String> },
    Phase { angle: String, qubit: String },
}

impl Gate {
    /// A rotation, collapsed to the Pauli form when the angle is π.
    pub fn rotation(axis: Axis, angle: &str, qubit: String) -> Self {
        if is_pi(angle) {
            Gate::Pauli(axis, qubit)
        } else {
            Gate::Rotation {
                axis,
                angle: angle.trim().to_string(),
                qubit,
            }
        }
    }

    /// Build a swap-family gate, checking the arity.
    pub fn swap(sqrt: bool, qubits: Vec<String>) -> Result<Self, LineError> {
        if qubits.len() < 2 {
            let name = if sqrt { "SqrtSwap" } else { "Swap" };
            return Err(LineError::malformed(
                name,
                format!("needs at least two qubits, got {}", qubits.len()),
            ));
        }
        Ok(Gate::Swap { sqrt, qubits })
    }

    /// Rewrite every qubit reference, keeping their order.
    pub fn map_qubits<F>(self, mut f: F) -> Result<Self, LineError>
    where
        F: FnMut(&str) -> Result<String, LineError>,
    {
        Ok(match self {
            Gate::Hadamard(q) => Gate::Hadamard(f(&q)?),
            Gate::Pauli(axis, q) => Gate::Pauli(axis, f(&q)?),
            Gate::Rotation { axis, angle, qubit } => Gate::Rotation {
                axis,
                angle,
                qubit: f(&qubit)?,
            },
            Gate::Cnot(a, b) => Gate::Cnot(f(&a)?, f(&b)?),
            Gate::Swap { sqrt, qubits } => Gate::Swap {
                sqrt,
                qubits: qubits.iter().map(|q| f(q)).collect::<Result<_, _>>()?,
            },
            Gate::Phase { angle, qubit } => Gate::Phase {
                angle,
                qubit: f(&qubit)?,
            },
        })
    }

    /// The adjoint gate. Rotations and phases negate their angle.
    pub fn inverse(self) -> Result<Self, LineError> {
        match self {
            Gate::Hadamard(_) | Gate::Pauli(..) | Gate::Cnot(..) => Ok(self),
            Gate::Swap { sqrt: false, .. } => Ok(self),
            Gate::Swap { sqrt: true, .. } => {
                Err(LineError::NoCounterpart("inverse of SqrtSwap".to_string()))
            }
            Gate::Rotation { axis, angle, qubit } => {
                Ok(Gate::rotation(axis, &negate_angle(&angle), qubit))
            }
            Gate::Phase { angle, qubit } => Ok(Gate::Phase {
                angle: negate_angle(&angle),
                qubit,
            }),
        }
    }
}

/// Whether an angle literal denotes π.
pub fn is_pi(angle: &str) -> bool {
    let angle: String = angle.chars().filter(|c| !c.is_whitespace()).collect();
    PI_SPELLINGS.contains(&angle.as_str())
        || angle
            .parse::<f64>()
            .is_ok_and(|value| (value - PI).abs() < 1e-12)
}

/// Negate an angle expression without changing its value otherwise.
pub fn negate_angle(angle: &str) -> String {
    let angle = angle.trim();
    if let Some(rest) = angle.strip_prefix('-') {
        let rest = rest.trim();
        if SIMPLE_OPERAND.is_match(rest) {
            return rest.to_string();
        }
        let inner = unwrap_group(rest);
        if inner.len() < rest.len() && rest.starts_with('(') {
            return inner.to_string();
        }
    }
    if SIMPLE_OPERAND.is_match(angle) {
        format!("-{angle}")
    } else {
        format!("-({angle})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pi_spellings() {
        assert!(is_pi("pi"));
        assert!(is_pi(" np.pi "));
        assert!(is_pi("math.pi"));
        assert!(is_pi("3.141592653589793"));
        assert!(!is_pi("3.14"));
        assert!(!is_pi("pi / 2"));
        assert!(!is_pi("2 * pi"));
    }

    #[test]
    fn rotation_by_pi_collapses() {
        assert_eq!(
            Gate::Pauli(Axis::X, "q1".to_string()),
            Gate::rotation(Axis::X, "pi", "q1".to_string())
        );
        assert_eq!(
            Gate::Rotation {
                axis: Axis::Z,
                angle: "1.21".to_string(),
                qubit: "qb".to_string()
            },
            Gate::rotation(Axis::Z, " 1.21", "qb".to_string())
        );
    }

    #[test]
    fn negation() {
        assert_eq!("-1.2", negate_angle("1.2"));
        assert_eq!("1.2", negate_angle("-1.2"));
        assert_eq!("-(pi / 2)", negate_angle("pi / 2"));
        assert_eq!("pi / 2", negate_angle("-(pi / 2)"));
        assert_eq!("-(-a + b)", negate_angle("-a + b"));
    }

    #[test]
    fn inverses() -> Result<(), LineError> {
        let h = Gate::Hadamard("0".to_string());
        assert_eq!(h.clone(), h.inverse()?);

        let rz = Gate::rotation(Axis::Z, "theta", "0".to_string());
        assert_eq!(
            Gate::Rotation {
                axis: Axis::Z,
                angle: "-theta".to_string(),
                qubit: "0".to_string()
            },
            rz.inverse()?
        );

        let sqrt_swap = Gate::swap(true, vec!["0".to_string(), "1".to_string()])?;
        assert!(sqrt_swap.inverse().is_err());
        Ok(())
    }

    #[test]
    fn swap_needs_two_qubits() {
        assert!(Gate::swap(false, vec!["0".to_string()]).is_err());
        assert!(Gate::swap(false, vec!["0".to_string(), "1".to_string()]).is_ok());
    }

    #[test]
    fn map_qubits_preserves_order() -> Result<(), LineError> {
        let swap = Gate::swap(false, vec!["c".into(), "a".into(), "b".into()])?;
        let mapped = swap.map_qubits(|q| Ok(q.to_uppercase()))?;
        assert_eq!(
            Gate::Swap {
                sqrt: false,
                qubits: vec!["C".into(), "A".into(), "B".into()]
            },
            mapped
        );
        Ok(())
    }

    #[test]
    fn axis_from_char() {
        assert_eq!(Ok(Axis::Y), Axis::try_from('y'));
        assert_eq!(Ok(Axis::X), Axis::try_from('X'));
        assert!(Axis::try_from('w').is_err());
    }
}
