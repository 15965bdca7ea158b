//! Core data model for Suguru puzzles.
//!
//! A Suguru grid is partitioned into fixed irregular regions ("areas"). Each
//! area of size `s` must contain every label `1..=s` exactly once, and no two
//! 8-directionally adjacent cells (edges or corners) may carry the same
//! label.
//!
//! This crate owns the puzzle text format, the area membership index derived
//! from it, and the solution type with its validity checks. Model building
//! and solving live in `suguru-model`; the progressive experiment driver
//! lives in `suguru-experiment`.

mod area;
mod cell;
mod puzzle;
mod solution;

pub use self::{
    area::{Area, AreaIndex},
    cell::{Cell, adjacent_pairs},
    puzzle::{Hint, ParseError, Puzzle},
    solution::{Assignment, Solution},
};
