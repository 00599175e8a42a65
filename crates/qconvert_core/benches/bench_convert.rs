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

//! Benchmarks for the conversion pass.
//!
//! Measures line classification on its own and whole-script conversion in
//! both directions, over the sample scripts and over a long synthetic script.
//!
//! Run with:
//!
//! ```sh
//! cargo bench --package qconvert_core --bench bench_convert
//! ```

use std::hint::black_box;
use std::time::{Duration, Instant};

use qconvert_core::{
    ConvertOptions, Dialect,
    classify::{Syntax, classify},
    convert, render_document, split_source_lines,
};

const TELEPORT: &str = include_str!("../tests/data/teleport.py");
const CIRCUIT: &str = include_str!("../tests/data/circuit_qutip.py");

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Call `f` in batches until `min_duration` has passed, print the mean time
/// of one call and return it.
fn bench<F: FnMut()>(label: &str, batch: u32, min_duration: Duration, mut f: F) -> Duration {
    (0..batch.min(5)).for_each(|_| f());

    let mut calls: u32 = 0;
    let start = Instant::now();
    while start.elapsed() < min_duration {
        (0..batch).for_each(|_| f());
        calls += batch;
    }
    let elapsed = start.elapsed();
    let per_call = elapsed / calls.max(1);
    println!("  {label:<50} {per_call:>10.2?}/call  ({calls} calls in {elapsed:.2?})");
    per_call
}

/// A ProjectQ script with `qubits` allocations followed by `layers` layers of
/// gates touching every qubit.
fn synthetic_projectq(qubits: usize, layers: usize) -> String {
    let mut script = String::from("from projectq import MainEngine\neng = MainEngine()\n");
    for q in 0..qubits {
        script.push_str(&format!("q{q} = eng.allocate_qubit()\n"));
    }
    for layer in 0..layers {
        script.push_str(&format!("# layer {layer}\n"));
        for q in 0..qubits {
            script.push_str(&format!("H | q{q}\n"));
            script.push_str(&format!("Rz(pi / {}) | q{q}\n", layer + 2));
            script.push_str(&format!("CNOT | (q{q}, q{})\n", (q + 1) % qubits));
        }
        script.push_str("with Dagger(eng):\n    Rx(0.25) | q0\n");
    }
    script.push_str("eng.flush()\n");
    script
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let min = Duration::from_secs(2);
    let options = ConvertOptions::default();

    println!("\n=== Classification ===");
    let teleport_lines = split_source_lines(TELEPORT);
    let syntax = Syntax::projectq();
    bench("classify teleport.py", 1000, min, || {
        for line in &teleport_lines {
            black_box(classify(black_box(&line.text), &syntax));
        }
    });

    println!("\n=== ProjectQ to QuTiP ===");
    bench("convert teleport.py", 1000, min, || {
        let _ = black_box(convert(
            black_box(&teleport_lines),
            Dialect::ProjectQ,
            Dialect::Qutip,
            options,
        ));
    });

    for (qubits, layers) in [(8, 10), (32, 50)] {
        let lines = split_source_lines(&synthetic_projectq(qubits, layers));
        let label = format!("convert synthetic {qubits} qubits x {layers} layers ({} lines)", lines.len());
        let per_call = bench(&label, 10, min, || {
            let _ = black_box(convert(
                black_box(&lines),
                Dialect::ProjectQ,
                Dialect::Qutip,
                options,
            ));
        });
        let rate = lines.len() as f64 / per_call.as_secs_f64();
        println!("  {:<50} {rate:>10.0} lines/s", "");
    }

    println!("\n=== QuTiP to ProjectQ ===");
    let circuit_lines = split_source_lines(CIRCUIT);
    bench("convert circuit_qutip.py", 1000, min, || {
        let _ = black_box(convert(
            black_box(&circuit_lines),
            Dialect::Qutip,
            Dialect::ProjectQ,
            options,
        ));
    });

    println!("\n=== Rendering ===");
    if let Ok(conversion) = convert(&teleport_lines, Dialect::ProjectQ, Dialect::Qutip, options) {
        bench("render teleport.py", 1000, min, || {
            black_box(render_document(
                Dialect::ProjectQ,
                Dialect::Qutip,
                black_box(&conversion),
            ));
        });
    }

    println!();
}
