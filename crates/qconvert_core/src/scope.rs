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

//! State carried from one line to the next during a conversion pass.
//!
//! [`ScopeTracker`] remembers a `with Dagger(...)`/`with Control(...)` line
//! until the gate it applies to shows up, and re-indents the block body so the
//! output stays well formed once the `with` line is dropped.
//! [`FunctionContext`] remembers which names the current function binds, so
//! that `return` statements can be judged.

use log::debug;

use crate::{
    classify::MetaKind,
    syntax::{find_top_level, identifiers, split_arguments, unwrap_group},
};

/// A deferred transform waiting for the next gate line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaScope {
    Inversion,
    /// The control qubit as written in the source
    ControlledBy(String),
}

impl From<&MetaKind> for MetaScope {
    fn from(kind: &MetaKind) -> Self {
        match kind {
            MetaKind::Inversion => MetaScope::Inversion,
            MetaKind::ControlledBy(qubit) => MetaScope::ControlledBy(qubit.clone()),
        }
    }
}

/// Where a line sits relative to the innermost open `with` block
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Placement {
    Outside,
    /// Inside the block, nothing transformed yet
    Body,
    /// Inside the block, after the line that consumed the scope
    AfterApplied,
}

#[derive(Debug)]
struct ScopeBlock {
    /// Width of the `with` line's indentation in the input
    opened_at: usize,
    /// Indentation the `with` line would have had in the output
    outer: String,
    /// Indentation of the first body line in the input
    body: Option<String>,
    applied: bool,
}

#[derive(Debug, Default)]
pub struct ScopeTracker {
    pending: Option<MetaScope>,
    block: Option<ScopeBlock>,
}

impl ScopeTracker {
    /// Locate a non-empty line with leading whitespace `indent`, closing the
    /// block if the line dedents out of it. Returns the indentation to emit.
    pub fn place(&mut self, indent: &str) -> (String, Placement) {
        let Some(block) = &mut self.block else {
            return (indent.to_string(), Placement::Outside);
        };

        if indent.len() <= block.opened_at {
            if let Some(scope) = self.pending.take() {
                debug!("Meta-scope {:?} closed before any line consumed it", scope);
            }
            self.block = None;
            return (indent.to_string(), Placement::Outside);
        }

        let body = block.body.get_or_insert_with(|| indent.to_string());
        let nested = indent.strip_prefix(body.as_str()).unwrap_or("");
        let placement = if block.applied {
            Placement::AfterApplied
        } else {
            Placement::Body
        };
        (format!("{}{}", block.outer, nested), placement)
    }

    /// Indentation to emit for a comment. Comments are free to sit at any
    /// depth inside a block, so they never close it or fix its body indent.
    pub fn place_comment(&self, indent: &str) -> String {
        match &self.block {
            Some(block) if indent.len() > block.opened_at => {
                let body = block.body.as_deref().unwrap_or(indent);
                format!("{}{}", block.outer, indent.strip_prefix(body).unwrap_or(""))
            }
            _ => indent.to_string(),
        }
    }

    /// Open a block at input indentation `indent`. A scope that is still
    /// pending is replaced.
    pub fn open(&mut self, scope: MetaScope, indent: &str, emitted_indent: String) {
        if let Some(previous) = self.pending.replace(scope) {
            debug!("Meta-scope {:?} replaced before use", previous);
        }
        self.block = Some(ScopeBlock {
            opened_at: indent.len(),
            outer: emitted_indent,
            body: None,
            applied: false,
        });
    }

    /// Consume the pending scope, if any, for the current line.
    pub fn take_pending(&mut self) -> Option<MetaScope> {
        let scope = self.pending.take();
        if scope.is_some() {
            if let Some(block) = &mut self.block {
                block.applied = true;
            }
        }
        scope
    }

    pub fn pending(&self) -> Option<&MetaScope> {
        self.pending.as_ref()
    }
}

/// The enclosing function definition and the names bound since it began
#[derive(Debug, Default)]
pub struct FunctionContext {
    signature: Option<String>,
    variables: Vec<String>,
}

impl FunctionContext {
    pub fn enter(&mut self, signature: &str) {
        self.signature = Some(signature.trim().to_string());
        self.variables.clear();
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Record the names on the left of an assignment such as `a, b = f()`.
    pub fn bind(&mut self, assignment: &str) {
        let Some(split) = find_top_level(assignment, " = ") else {
            return;
        };
        for name in split_arguments(unwrap_group(&assignment[..split])) {
            if !self.variables.contains(&name) {
                self.variables.push(name);
            }
        }
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }

    /// Whether a `return` statement still means something after conversion.
    pub fn keeps_return(&self, statement: &str) -> bool {
        let expression = statement
            .trim()
            .strip_prefix("return")
            .unwrap_or_default()
            .trim();
        expression.is_empty()
            || is_literal(expression)
            || identifiers(expression).any(|name| self.is_bound(name))
    }
}

fn is_literal(expression: &str) -> bool {
    matches!(expression, "True" | "False" | "None") || expression.parse::<f64>().is_ok()
}
