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

use std::{path::Path, process::Command};

use log::{debug, warn};

const FORMATTER: &str = "autopep8";
const FORMATTER_ARGS: [&str; 3] = ["--in-place", "--aggressive", "--aggressive"];

/// Run autopep8 over the converted file. Failure only costs the formatting.
pub fn format_in_place(path: &Path) -> bool {
    run_formatter(FORMATTER, path)
}

fn run_formatter(program: &str, path: &Path) -> bool {
    match Command::new(program).arg(path).args(FORMATTER_ARGS).status() {
        Ok(status) if status.success() => {
            debug!("Formatted {} with {}", path.display(), program);
            true
        }
        Ok(status) => {
            warn!("{program} exited with {status}, {} left unformatted", path.display());
            false
        }
        Err(e) => {
            warn!("Could not run {program} ({e}), {} left unformatted", path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_formatter_is_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
        let file = tempfile::NamedTempFile::new()?;
        std::fs::write(file.path(), "x=1\n")?;
        assert!(!run_formatter("qconvert-no-such-formatter", file.path()));
        assert_eq!("x=1\n", std::fs::read_to_string(file.path())?);
        Ok(())
    }
}
