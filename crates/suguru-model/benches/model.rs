//! Benchmarks for constraint-model construction and solving.
//!
//! Measures the two halves of a single experiment iteration on a synthetic
//! box-partitioned grid:
//!
//! - **`build_model`**: translating puzzle + areas + hints into the binary
//!   constraint model.
//! - **`solve_model`**: encoding the model to CNF and running the external
//!   feasibility solver.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench model
//! ```

use std::fmt::Write as _;
use std::hint;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use suguru_core::{AreaIndex, Puzzle};
use suguru_model::{CspModel, solve};

/// A `size`×`size` grid partitioned into 2×2 box areas with a blank
/// reference grid. `size` must be even.
fn box_puzzle(size: usize) -> Puzzle {
    let mut text = format!("{size} {size}\n");
    for _ in 0..size {
        for col in 0..size {
            let sep = if col + 1 == size { '\n' } else { ' ' };
            write!(text, "0{sep}").unwrap();
        }
    }
    for row in 0..size {
        for col in 0..size {
            let id = (row / 2) * (size / 2) + col / 2 + 1;
            let sep = if col + 1 == size { '\n' } else { ' ' };
            write!(text, "{id}{sep}").unwrap();
        }
    }
    Puzzle::parse(&text).unwrap()
}

fn bench_build_model(c: &mut Criterion) {
    for size in [6, 10, 16] {
        let puzzle = box_puzzle(size);
        let areas = AreaIndex::new(&puzzle);
        c.bench_with_input(
            BenchmarkId::new("build_model", format!("{size}x{size}")),
            &(&puzzle, &areas),
            |b, (puzzle, areas)| {
                b.iter(|| CspModel::build(hint::black_box(puzzle), areas, &[]));
            },
        );
    }
}

fn bench_solve_model(c: &mut Criterion) {
    for size in [6, 10] {
        let puzzle = box_puzzle(size);
        let areas = AreaIndex::new(&puzzle);
        let model = CspModel::build(&puzzle, &areas, &[]);
        c.bench_with_input(
            BenchmarkId::new("solve_model", format!("{size}x{size}")),
            &(&model, &areas),
            |b, (model, areas)| {
                b.iter(|| solve(hint::black_box(model), areas).unwrap());
            },
        );
    }
}

criterion_group!(benches, bench_build_model, bench_solve_model);
criterion_main!(benches);
