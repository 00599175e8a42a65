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

//! The single forward pass that turns a script into its translation.
//!
//! Every input line yields one unit of output: a translated line (or the two
//! lines of a controlled block), a verbatim copy, an empty line, or an
//! untranslatable stub. A bad line never aborts the pass.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    classify::{LineCategory, Syntax, classify},
    dialect::Dialect,
    document::SourceLine,
    error::{FatalError, LineError},
    projectq::ProjectqToQutip,
    qutip::QutipToProjectq,
    scope::{FunctionContext, MetaScope, Placement, ScopeTracker},
    syntax::leading_whitespace,
};

/// Annotation placed above a line that could not be translated.
pub const UNTRANSLATED_MARK: &str =
    "# *!* ERROR - COULD NOT TRANSFER LINE BELOW COMMENT. PLEASE CHECK MANUALLY: *!*";

/// Annotation placed above a translated line whose meaning may have shifted.
pub const ADVISORY: &str = "# Unknown formatting of below line: Please manually check";

/// Replaces a `return` of names that no longer exist after conversion.
pub const RETURN_PLACEHOLDER: &str = "# Originally returned variables, no longer needed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Write annotation comments into the output
    pub mark: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { mark: true }
    }
}

/// A line copied through untranslated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationError {
    /// 1-based line number in the input
    pub line: usize,
    pub text: String,
}

impl TranslationError {
    /// Entry written to the error log.
    pub fn log_entry(&self) -> String {
        format!("{} - {}", self.line, self.text.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub preamble: Vec<String>,
    pub body: Vec<String>,
    pub postamble: Vec<String>,
    pub errors: Vec<TranslationError>,
}

/// The output of one translated gate line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub lines: Vec<String>,
    pub advisory: Option<&'static str>,
}

/// One direction of conversion. Implementations hold whatever they learnt
/// from a whole-file scan; the pass itself holds the per-line state.
pub trait Translator {
    fn syntax(&self) -> &Syntax;

    /// Lines emitted after the banner and before the body.
    fn preamble(&self) -> Vec<String>;

    fn postamble(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether an assignment only sets up the source dialect and is dropped.
    fn suppresses_assignment(&self, body: &str) -> bool;

    /// Whether `with` meta-scopes exist in the source dialect.
    fn supports_meta_scopes(&self) -> bool;

    fn translate_gate(&self, body: &str, scope: Option<&MetaScope>) -> Result<Translation, LineError>;
}

/// Convert a whole script from `source` to `target`.
pub fn convert(
    lines: &[SourceLine],
    source: Dialect,
    target: Dialect,
    options: ConvertOptions,
) -> Result<Conversion, FatalError> {
    match (source, target) {
        (Dialect::ProjectQ, Dialect::Qutip) => Ok(run(&ProjectqToQutip::new(lines), lines, options)),
        (Dialect::Qutip, Dialect::ProjectQ) => Ok(run(&QutipToProjectq::new(lines)?, lines, options)),
        _ if source == target => Err(FatalError::MatchingFormats),
        _ => Err(FatalError::Unsupported {
            input: source,
            output: target,
        }),
    }
}

/// Run the line pass with an already constructed translator.
pub fn run<T: Translator>(translator: &T, lines: &[SourceLine], options: ConvertOptions) -> Conversion {
    let mut pass = Pass {
        translator,
        options,
        scope: ScopeTracker::default(),
        function: FunctionContext::default(),
        body: Vec::with_capacity(lines.len()),
        errors: Vec::new(),
    };
    for line in lines {
        pass.line(line);
    }
    if let Some(scope) = pass.scope.pending() {
        debug!("Meta-scope {:?} still pending at end of input", scope);
    }

    Conversion {
        preamble: translator.preamble(),
        body: pass.body,
        postamble: translator.postamble(),
        errors: pass.errors,
    }
}

struct Pass<'a, T> {
    translator: &'a T,
    options: ConvertOptions,
    scope: ScopeTracker,
    function: FunctionContext,
    body: Vec<String>,
    errors: Vec<TranslationError>,
}

impl<T: Translator> Pass<'_, T> {
    fn line(&mut self, line: &SourceLine) {
        let category = classify(&line.text, self.translator.syntax());
        if category == LineCategory::Empty {
            self.body.push(String::new());
            return;
        }
        info!("{}: {} ({})", line.number, line.text.trim_end(), category);

        let source_indent = leading_whitespace(&line.text);
        let body = line.text.trim();
        if category.is_inert() {
            let indent = self.scope.place_comment(source_indent);
            self.emit(&indent, body);
            return;
        }

        let (indent, placement) = self.scope.place(source_indent);
        if placement == Placement::AfterApplied {
            self.untranslatable(line, &indent, LineError::ScopeBody);
            return;
        }

        let scope = match category {
            LineCategory::MetaScopeOpen(_) => None,
            _ => self.scope.take_pending(),
        };
        if scope.is_some() && category != LineCategory::GateApplication {
            self.untranslatable(line, &indent, LineError::ScopeNotApplicable);
            return;
        }

        if let Err(reason) = self.handle(&category, body, source_indent, &indent, scope) {
            self.untranslatable(line, &indent, reason);
        }
    }

    fn handle(
        &mut self,
        category: &LineCategory,
        body: &str,
        source_indent: &str,
        indent: &str,
        scope: Option<MetaScope>,
    ) -> Result<(), LineError> {
        match category {
            LineCategory::Empty | LineCategory::Import => self.body.push(String::new()),
            LineCategory::Comment
            | LineCategory::Conditional
            | LineCategory::PrintCall
            | LineCategory::BareCall => self.emit(indent, body),
            LineCategory::Definition => {
                self.function.enter(body);
                self.emit(indent, body);
            }
            LineCategory::Assignment => {
                self.function.bind(body);
                if self.translator.suppresses_assignment(body) {
                    debug!("Dropping source-only assignment");
                    self.body.push(String::new());
                } else {
                    self.emit(indent, body);
                }
            }
            LineCategory::GateApplication => {
                let translation = self.translator.translate_gate(body, scope.as_ref())?;
                if let Some(advisory) = translation.advisory {
                    if self.options.mark {
                        self.emit(indent, advisory);
                    }
                }
                for translated in &translation.lines {
                    self.emit(indent, translated);
                }
            }
            LineCategory::MetaScopeOpen(kind) => {
                if !self.translator.supports_meta_scopes() {
                    return Err(LineError::NoCounterpart(body.to_string()));
                }
                self.scope.open(MetaScope::from(kind), source_indent, indent.to_string());
                self.body.push(String::new());
            }
            LineCategory::ReturnStatement => {
                if self.function.keeps_return(body) {
                    self.emit(indent, body);
                } else {
                    debug!(
                        "Return from {} no longer meaningful",
                        self.function.signature().unwrap_or("module scope")
                    );
                    self.emit(indent, RETURN_PLACEHOLDER);
                }
            }
            LineCategory::Unrecognized => return Err(LineError::Unrecognized),
        }
        Ok(())
    }

    fn emit(&mut self, indent: &str, text: &str) {
        self.body.push(format!("{indent}{text}"));
    }

    fn untranslatable(&mut self, line: &SourceLine, indent: &str, reason: LineError) {
        warn!("Line {} could not be translated: {}", line.number, reason);
        if self.options.mark {
            self.emit(indent, UNTRANSLATED_MARK);
        }
        self.emit(indent, line.text.trim());
        self.errors.push(TranslationError {
            line: line.number,
            text: line.text.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::split_source_lines;

    fn projectq(source: &str, mark: bool) -> Conversion {
        let lines = split_source_lines(source);
        convert(&lines, Dialect::ProjectQ, Dialect::Qutip, ConvertOptions { mark })
            .expect("ProjectQ to QuTiP never fails up front")
    }

    #[test]
    fn unsupported_pairs() {
        let lines = split_source_lines("H | q\n");
        let options = ConvertOptions::default();
        assert_eq!(
            Err(FatalError::MatchingFormats),
            convert(&lines, Dialect::Qutip, Dialect::Qutip, options)
        );
        assert_eq!(
            Err(FatalError::Unsupported {
                input: Dialect::Qiskit,
                output: Dialect::ProjectQ
            }),
            convert(&lines, Dialect::Qiskit, Dialect::ProjectQ, options)
        );
    }

    #[test]
    fn one_output_unit_per_line() {
        let conversion = projectq(
            "from projectq import MainEngine\neng = MainEngine()\nq = eng.allocate_qubit()\n\n# c\nH | q\nfoo bar\n",
            false,
        );
        assert_eq!(
            vec![
                "",
                "",
                "",
                "",
                "# c",
                "quantum_circuit.add_gate(\"SNOT\", 0)",
                "foo bar"
            ],
            conversion.body
        );
        assert_eq!(
            vec![TranslationError {
                line: 7,
                text: "foo bar".into()
            }],
            conversion.errors
        );
    }

    #[test]
    fn marks_are_optional() {
        let marked = projectq("q = eng.allocate_qubit()\n  Measure | q\n", true);
        assert_eq!(
            vec!["", format!("  {UNTRANSLATED_MARK}").as_str(), "  Measure | q"],
            marked.body
        );
        let unmarked = projectq("q = eng.allocate_qubit()\n  Measure | q\n", false);
        assert_eq!(vec!["", "  Measure | q"], unmarked.body);
        assert_eq!(marked.errors, unmarked.errors);
    }

    #[test]
    fn dagger_block_is_flattened() {
        let source = "\
def f(eng):
    a = eng.allocate_qubit()
    with Dagger(eng):
        Rx(0.5) | a
    H | a
";
        let conversion = projectq(source, true);
        assert_eq!(
            vec![
                "def f(eng):",
                "",
                "",
                "    quantum_circuit.add_gate(\"RX\", 0, None, -0.5)",
                "    quantum_circuit.add_gate(\"SNOT\", 0)",
            ],
            conversion.body
        );
        assert!(conversion.errors.is_empty());
    }

    #[test]
    fn later_lines_in_applied_block_are_flagged() {
        let source = "\
a = eng.allocate_qubit()
with Dagger(eng):
    # inverted
    H | a
    X | a
Y | a
";
        let conversion = projectq(source, false);
        assert_eq!(
            vec![
                "",
                "",
                "# inverted",
                "quantum_circuit.add_gate(\"SNOT\", 0)",
                "X | a",
                "quantum_circuit.add_gate(\"RY\", 0, None, pi)",
            ],
            conversion.body
        );
        assert_eq!(vec![5], conversion.errors.iter().map(|e| e.line).collect::<Vec<_>>());
    }

    #[test]
    fn shallow_comment_inside_a_block() {
        let source = "\
a = eng.allocate_qubit()
with Dagger(eng):
# note
    Rx(0.5) | a
H | a
";
        let conversion = projectq(source, true);
        assert_eq!(
            vec![
                "",
                "",
                "# note",
                "quantum_circuit.add_gate(\"RX\", 0, None, -0.5)",
                "quantum_circuit.add_gate(\"SNOT\", 0)",
            ],
            conversion.body
        );
        assert!(conversion.errors.is_empty());
    }

    #[test]
    fn scope_on_a_call_is_flagged() {
        let source = "with Control(eng, a):\n    do_work(a)\n";
        let conversion = projectq(source, false);
        assert_eq!(vec!["", "do_work(a)"], conversion.body);
        assert_eq!(2, conversion.errors[0].line);
    }

    #[test]
    fn returns_of_vanished_names() {
        let source = "\
def make(eng):
    b1 = eng.allocate_qubit()
    return b1
def other(eng):
    return q9
";
        let conversion = projectq(source, true);
        assert_eq!("    return b1", conversion.body[2]);
        assert_eq!(format!("    {RETURN_PLACEHOLDER}"), conversion.body[4]);
    }

    #[test]
    fn qutip_meta_scopes_are_untranslatable() -> Result<(), FatalError> {
        let lines = split_source_lines("circuit = QubitCircuit(1)\nwith Dagger(eng):\n");
        let conversion = convert(&lines, Dialect::Qutip, Dialect::ProjectQ, ConvertOptions { mark: false })?;
        assert_eq!(vec!["", "with Dagger(eng):"], conversion.body);
        assert_eq!(1, conversion.errors.len());
        Ok(())
    }
}
