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

use std::path::{Path, PathBuf};

use crate::{dialect::Dialect, error::FatalError};

/// Output name used when none is given.
pub const DEFAULT_OUTPUT_NAME: &str = "convertqc_result";

const FORBIDDEN_CHARACTERS: [char; 10] = ['/', '<', '>', ':', '"', '\\', '|', '.', '?', '*'];

/// Check a requested conversion before anything is read, returning the
/// output path. Checks run in a fixed order, so the reported error is stable
/// when several apply.
pub fn preflight(
    input: &Path,
    source: Dialect,
    target: Dialect,
    output_name: Option<&str>,
) -> Result<PathBuf, FatalError> {
    if source == target {
        return Err(FatalError::MatchingFormats);
    }
    if !source.converts_to(target) {
        return Err(FatalError::Unsupported {
            input: source,
            output: target,
        });
    }
    if !input.is_file() {
        return Err(FatalError::InputNotFound(input.to_path_buf()));
    }

    let name = output_name.unwrap_or(DEFAULT_OUTPUT_NAME);
    if name.is_empty() || name.contains(FORBIDDEN_CHARACTERS) {
        return Err(FatalError::InvalidOutputName(name.to_string()));
    }
    Ok(PathBuf::from(format!("{name}.{}", target.extension())))
}
