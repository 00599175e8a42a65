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

//! Light-weight lexical helpers shared by the classifier and the gate translators.
//!
//! Nothing here parses expressions. The helpers only track bracket depth and
//! string literals, which is enough to split call arguments, find top-level
//! operators, and recognise a bare call statement.

use std::{ops::ControlFlow, sync::LazyLock};

use regex::Regex;

static CALL_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\s*\.\s*[A-Za-z_][A-Za-z0-9_]*)*\s*\(")
        .expect("call head pattern should compile")
});

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern should compile")
});

/// Leading whitespace of a line.
pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Call `visit` with (byte index, char, bracket depth) for every character
/// outside string literals. Closing brackets report the depth they return to.
fn scan_code(text: &str, mut visit: impl FnMut(usize, char, usize) -> ControlFlow<()>) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                continue;
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if visit(i, c, depth).is_break() {
            return;
        }
        if matches!(c, '(' | '[' | '{') {
            depth += 1;
        }
    }
}

/// Byte index of the bracket closing the one that opens at `open`.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let tail = text.get(open..)?;
    if !tail.starts_with(['(', '[', '{']) {
        return None;
    }
    let mut found = None;
    scan_code(tail, |i, c, depth| {
        if i > 0 && depth == 0 && matches!(c, ')' | ']' | '}') {
            found = Some(open + i);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}

/// Text between the parenthesis at `open` and its matching close.
pub fn call_arguments(text: &str, open: usize) -> Option<&str> {
    let close = matching_close(text, open)?;
    Some(&text[open + 1..close])
}

/// Byte index of the first occurrence of `pattern` at bracket depth 0 and
/// outside string literals.
pub fn find_top_level(text: &str, pattern: &str) -> Option<usize> {
    let mut found = None;
    scan_code(text, |i, _, depth| {
        if depth == 0 && text[i..].starts_with(pattern) {
            found = Some(i);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}

/// Split a comma separated argument list at depth 0, trimming each element.
/// A trailing comma does not produce an empty element.
pub fn split_arguments(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    scan_code(text, |i, c, depth| {
        if depth == 0 && c == ',' {
            pieces.push(text[start..i].trim().to_string());
            start = i + 1;
        }
        ControlFlow::Continue(())
    });
    let last = text[start..].trim();
    if !last.is_empty() {
        pieces.push(last.to_string());
    }
    pieces
}

/// Strip one pair of enclosing `(...)` or `[...]` if they wrap the whole text.
pub fn unwrap_group(text: &str) -> &str {
    let text = text.trim();
    let wraps = match (text.chars().next(), text.chars().last()) {
        (Some('('), Some(')')) | (Some('['), Some(']')) => {
            matching_close(text, 0) == Some(text.len() - 1)
        }
        _ => false,
    };
    if wraps { text[1..text.len() - 1].trim() } else { text }
}

/// Remove one layer of matching string quotes.
pub fn unquote(text: &str) -> Option<&str> {
    let text = text.trim();
    let text = text.strip_prefix(['r', 'u']).unwrap_or(text);
    ['"', '\''].iter().find_map(|q| {
        text.strip_prefix(*q)
            .and_then(|rest| rest.strip_suffix(*q))
    })
}

/// Whether the line is an identifier dot-chain followed by one balanced
/// argument list and nothing else, e.g. `eng.flush()`.
pub fn is_bare_call(line: &str) -> bool {
    let line = line.trim();
    let Some(head) = CALL_HEAD.find(line) else {
        return false;
    };
    matching_close(line, head.end() - 1) == Some(line.len() - 1)
}

/// Identifiers appearing in `text`, including those inside string literals.
pub fn identifiers(text: &str) -> impl Iterator<Item = &str> {
    IDENTIFIER.find_iter(text).map(|m| m.as_str())
}
