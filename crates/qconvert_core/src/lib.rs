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

pub mod classify;
pub mod dialect;
pub mod document;
pub mod driver;
pub mod error;
pub mod gate;
mod preflight;
pub mod projectq;
pub mod qutip;
pub mod resolver;
pub mod scope;
mod syntax;

pub use dialect::Dialect;
pub use document::{SourceLine, banner, format_error_log, render_document, split_source_lines};
pub use driver::{ConvertOptions, Conversion, TranslationError, convert};
pub use error::{FatalError, LineError};
pub use preflight::{DEFAULT_OUTPUT_NAME, preflight};
