//! Binary constraint-satisfaction model for Suguru puzzles.
//!
//! [`CspModel::build`] translates a puzzle, its area index, and a hint subset
//! into binary variables and four constraint families; [`solve`] hands the
//! finished model to an external black-box feasibility solver and decodes the
//! verdict. There is no objective and no search logic here: the model is a
//! pure feasibility problem, built declaratively and solved whole.

mod model;
mod solve;

pub use self::{
    model::{Constraint, ConstraintCounts, CspModel, VarId},
    solve::{SolveError, SolveOutcome, SolveStatus, solve},
};
