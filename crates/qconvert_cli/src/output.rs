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

//! Files written next to the converted script.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use qconvert_core::{Dialect, TranslationError, format_error_log};
use serde::Serialize;

pub const ERROR_LOG_NAME: &str = "error_log.txt";

/// Summary of one run, written by `--report`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub input_format: Dialect,
    pub output_format: Dialect,
    /// Number of input lines
    pub lines: usize,
    pub untranslated: &'a [TranslationError],
}

/// Ensure that the parent directory of `path` exists, creating it and any
/// intermediate directories if necessary. A bare file name needs nothing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create output directory '{}': {e}", dir.display())),
        _ => Ok(()),
    }
}

/// The error log lives in the same directory as the converted script.
pub fn error_log_path(output: &Path) -> PathBuf {
    output.with_file_name(ERROR_LOG_NAME)
}

/// Write the error log. The file is written even when nothing failed.
pub fn write_error_log(path: &Path, errors: &[TranslationError]) -> io::Result<()> {
    fs::write(path, format_error_log(errors))
}

pub fn write_report(path: &Path, report: &Report) -> io::Result<()> {
    let mut text = serde_json::to_string_pretty(report)?;
    text.push('\n');
    fs::write(path, text)
}
