use suguru_core::{AreaIndex, Solution};
use varisat::{CnfFormula, ExtendFormula as _, Lit, Solver};

use crate::{Constraint, CspModel};

/// Classified verdict of the external feasibility solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SolveStatus {
    /// The solver produced a satisfying assignment.
    #[display("feasible")]
    Feasible,
    /// The solver proved no satisfying assignment exists.
    #[display("infeasible")]
    Infeasible,
    /// The solver failed to reach a verdict. Treated as "no solution", not
    /// as an error.
    #[display("unknown")]
    Unknown,
}

/// The outcome of one solve: the classified status plus the decoded
/// solution when the status is [`SolveStatus::Feasible`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    /// Classified solver verdict.
    pub status: SolveStatus,
    /// The decoded labeling; `Some` exactly when `status` is `Feasible`.
    pub solution: Option<Solution>,
}

/// Fatal internal-consistency failures of the solve.
///
/// These indicate the model and the solver disagree, which is strictly worse
/// than an ordinary infeasible verdict; the solve aborts rather than guess.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    /// A cell had zero or several labels set despite a feasible verdict.
    #[display("cell ({row}, {col}) has {set} labels set; expected exactly one")]
    LabelContract {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// Number of labels the solver marked true for the cell.
        set: usize,
    },
}

/// Submits `model` to the black-box feasibility solver and decodes the
/// verdict.
///
/// Exactly-one constraints are encoded as one positive clause plus pairwise
/// exclusion clauses; fixations become unit clauses; adjacency exclusions
/// become binary negative clauses. The whole formula is handed to the solver
/// in one batch.
///
/// A non-feasible verdict is a valid outcome, not an error: the returned
/// [`SolveOutcome`] carries no solution and the status says why.
///
/// # Errors
///
/// Returns [`SolveError::LabelContract`] when a feasible assignment marks
/// zero or several labels for some cell, meaning the solver and the model
/// disagree about the encoding.
pub fn solve(model: &CspModel, areas: &AreaIndex) -> Result<SolveOutcome, SolveError> {
    let mut solver = Solver::new();
    let lits: Vec<Lit> = (0..model.variable_count())
        .map(|_| Lit::from_var(solver.new_var(), true))
        .collect();

    let mut formula = CnfFormula::new();
    for constraint in model.constraints() {
        match constraint {
            Constraint::ExactlyOne(vars) => {
                let clause: Vec<Lit> = vars.iter().map(|v| lits[v.index()]).collect();
                formula.add_clause(&clause);
                for (i, &a) in clause.iter().enumerate() {
                    for &b in &clause[i + 1..] {
                        formula.add_clause(&[!a, !b]);
                    }
                }
            }
            Constraint::FixTrue(var) => formula.add_clause(&[lits[var.index()]]),
            Constraint::AtMostOneOf(a, b) => {
                formula.add_clause(&[!lits[a.index()], !lits[b.index()]]);
            }
        }
    }
    solver.add_formula(&formula);

    let feasible = match solver.solve() {
        Ok(feasible) => feasible,
        // Solver failure is classified as "unknown", per the status contract.
        Err(_) => return Ok(no_solution(SolveStatus::Unknown)),
    };
    if !feasible {
        return Ok(no_solution(SolveStatus::Infeasible));
    }
    let Some(assignment) = solver.model() else {
        return Ok(no_solution(SolveStatus::Unknown));
    };

    let solution = decode(model, areas, &assignment)?;
    Ok(SolveOutcome {
        status: SolveStatus::Feasible,
        solution: Some(solution),
    })
}

fn no_solution(status: SolveStatus) -> SolveOutcome {
    SolveOutcome {
        status,
        solution: None,
    }
}

/// Reads the satisfying assignment back into a label grid, area by area in
/// index order so the resulting solution matches the assignment-event
/// ordering.
fn decode(
    model: &CspModel,
    areas: &AreaIndex,
    assignment: &[Lit],
) -> Result<Solution, SolveError> {
    let mut truth = vec![false; model.variable_count()];
    for lit in assignment {
        let index = lit.var().index();
        if lit.is_positive() && index < truth.len() {
            truth[index] = true;
        }
    }

    let mut labels = vec![0_u32; model.rows() * model.cols()];
    for area in areas.areas() {
        for &cell in area.cells() {
            let mut set = 0_usize;
            let mut found = 0_u32;
            for label in 1..=u32::try_from(area.size()).unwrap_or(u32::MAX) {
                let var = model.var(cell, label).ok_or(SolveError::LabelContract {
                    row: cell.row,
                    col: cell.col,
                    set: 0,
                })?;
                if truth[var.index()] {
                    set += 1;
                    found = label;
                }
            }
            if set != 1 {
                return Err(SolveError::LabelContract {
                    row: cell.row,
                    col: cell.col,
                    set,
                });
            }
            labels[cell.row * model.cols() + cell.col] = found;
        }
    }
    Ok(Solution::from_labels(model.rows(), model.cols(), labels))
}
