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

//! Reading a script into numbered lines and assembling the converted file.

use crate::{
    dialect::Dialect,
    driver::{Conversion, TranslationError},
};

const BANNER_WIDTH: usize = 70;

const BANNER_NOTICE: [&str; 7] = [
    "This file has been auto-generated by qconvert",
    "There may be errors, mis-translations, or other mistakes",
    "This file is presented as-is, with no warranty of any kind",
    "Give it a careful read before running it",
    "",
    "For questions or comments, contact the qconvert maintainers",
    "",
];

/// One line of the input script, numbered from 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    /// The line with its terminator removed
    pub text: String,
}

/// Split a script into numbered lines. `\n`, `\r\n` and a lone `\r` all
/// terminate a line; a final terminator does not start a new line.
pub fn split_source_lines(source: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut rest = source;
    while !rest.is_empty() {
        let (text, next) = match rest.find(['\n', '\r']) {
            Some(i) if rest[i..].starts_with("\r\n") => (&rest[..i], &rest[i + 2..]),
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, ""),
        };
        lines.push(SourceLine {
            number: lines.len() + 1,
            text: text.to_string(),
        });
        rest = next;
    }
    lines
}

fn banner_row(text: &str) -> String {
    format!("# {:<width$}#", text, width = BANNER_WIDTH - 3)
}

/// The comment box placed at the top of every converted file.
pub fn banner(source: Dialect, target: Dialect) -> Vec<String> {
    let rule = "#".repeat(BANNER_WIDTH);
    let mut lines = vec![rule.clone()];
    lines.extend(BANNER_NOTICE.iter().map(|text| banner_row(text)));
    lines.push(banner_row(&format!("Input format: {source}")));
    lines.push(banner_row(&format!("Output format: {target}")));
    lines.push(banner_row(""));
    lines.push(rule);
    lines
}

/// The complete output file: banner, preamble, translated body, postamble.
pub fn render_document(source: Dialect, target: Dialect, conversion: &Conversion) -> String {
    let mut text = String::new();
    let sections = [
        banner(source, target),
        conversion.preamble.clone(),
        conversion.body.clone(),
        conversion.postamble.clone(),
    ];
    for line in sections.iter().flatten() {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Contents of the error log, one `<line> - <text>` entry per line.
pub fn format_error_log(errors: &[TranslationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}\n", e.log_entry()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        split_source_lines(source)
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn line_terminators() {
        assert_eq!(vec!["a", "b"], texts("a\nb\n"));
        assert_eq!(vec!["a", "b"], texts("a\r\nb"));
        assert_eq!(vec!["a", "", "b"], texts("a\r\rb"));
        assert_eq!(vec!["", "x"], texts("\nx"));
        assert!(texts("").is_empty());
    }

    #[test]
    fn numbering_starts_at_one() {
        let lines = split_source_lines("H | q\n\nX | q\n");
        let numbers: Vec<_> = lines.iter().map(|l| l.number).collect();
        assert_eq!(vec![1, 2, 3], numbers);
        assert_eq!("X | q", lines[2].text);
    }

    #[test]
    fn banner_rows_are_aligned() {
        let banner = banner(Dialect::ProjectQ, Dialect::Qutip);
        assert!(banner.iter().all(|row| row.len() == BANNER_WIDTH));
        assert_eq!("#".repeat(70), banner[0]);
        let notice = "This file has been auto-generated by qconvert";
        assert_eq!(
            format!("# {notice}{}#", " ".repeat(67 - notice.len())),
            banner[1]
        );
        assert!(banner.contains(&banner_row("Input format: ProjectQ")));
        assert!(banner.contains(&banner_row("Output format: QuTiP")));
        assert_eq!(Some(&banner[0]), banner.last());
    }

    #[test]
    fn document_sections_in_order() {
        let conversion = Conversion {
            preamble: vec!["from qutip import *".to_string()],
            body: vec!["quantum_circuit.add_gate(\"SNOT\", 0)".to_string()],
            postamble: vec!["# done".to_string()],
            errors: Vec::new(),
        };
        let text = render_document(Dialect::ProjectQ, Dialect::Qutip, &conversion);
        let tail: Vec<_> = text.lines().rev().take(3).collect();
        assert_eq!(
            vec![
                "# done",
                "quantum_circuit.add_gate(\"SNOT\", 0)",
                "from qutip import *"
            ],
            tail
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn error_log_entries() {
        let errors = vec![
            TranslationError {
                line: 7,
                text: "    Test  ".to_string(),
            },
            TranslationError {
                line: 12,
                text: "Measure | q".to_string(),
            },
        ];
        assert_eq!("7 - Test\n12 - Measure | q\n", format_error_log(&errors));
        assert_eq!("", format_error_log(&[]));
    }
}
