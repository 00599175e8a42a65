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

mod formatter;
mod output;

use std::{error, fs, path::PathBuf, process};

use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use qconvert_core::{
    ConvertOptions, Dialect, FatalError, convert, preflight, render_document, split_source_lines,
};

use output::Report;

/// Convert a quantum circuit script from one Python library's dialect to another.
#[derive(Parser)]
#[command(version, about, long_about=None)]
struct Cli {
    /// Script to convert
    input_filename: PathBuf,
    /// Dialect of the input script
    input_format: Dialect,
    /// Dialect to convert to
    output_format: Dialect,
    /// Name of the converted file, without extension
    #[arg(short, long)]
    output_filename: Option<String>,
    /// Trace every line as it is converted
    #[arg(short, long)]
    verbose: bool,
    /// Do not annotate untranslated or doubtful lines in the output
    #[arg(short = 'm', long)]
    no_mark: bool,
    /// Do not write error_log.txt
    #[arg(short = 'e', long)]
    no_error_log: bool,
    /// Like --verbose, with internal detail
    #[arg(short, long)]
    debug: bool,
    /// Skip running autopep8 on the converted file
    #[arg(long)]
    no_format: bool,
    /// Also write a JSON summary of the run to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }

    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            mark: !self.no_mark,
        }
    }
}

fn fatal(error: FatalError) -> ! {
    eprintln!("{}", error.report());
    process::exit(error.code())
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG still takes precedence over the flags.
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    let output_path = preflight(
        &cli.input_filename,
        cli.input_format,
        cli.output_format,
        cli.output_filename.as_deref(),
    )
    .unwrap_or_else(|e| fatal(e));

    info!(
        "Converting {} from {} to {}",
        cli.input_filename.display(),
        cli.input_format,
        cli.output_format
    );
    let source = fs::read_to_string(&cli.input_filename)?;
    let lines = split_source_lines(&source);
    let conversion = convert(&lines, cli.input_format, cli.output_format, cli.options())
        .unwrap_or_else(|e| fatal(e));

    let document = render_document(cli.input_format, cli.output_format, &conversion);
    fs::write(&output_path, document)?;
    info!("Wrote {}", output_path.display());

    if cli.no_format {
        debug!("Skipping formatter");
    } else {
        formatter::format_in_place(&output_path);
    }

    if !cli.no_error_log {
        let log_path = output::error_log_path(&output_path);
        output::write_error_log(&log_path, &conversion.errors)?;
        info!(
            "Wrote {} untranslated line(s) to {}",
            conversion.errors.len(),
            log_path.display()
        );
    }

    if let Some(report_path) = &cli.report {
        output::ensure_parent_dir(report_path)?;
        let report = Report {
            input: &cli.input_filename,
            output: &output_path,
            input_format: cli.input_format,
            output_format: cli.output_format,
            lines: lines.len(),
            untranslated: &conversion.errors,
        };
        output::write_report(report_path, &report)?;
    }

    Ok(())
}
