use suguru_core::{AreaIndex, Cell, Hint, Puzzle, adjacent_pairs};

/// Identifier of one binary variable `x[cell, label]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Dense index of the variable, `0..variable_count`.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One constraint of the model.
///
/// Every family of the Suguru encoding reduces to these three shapes:
/// cell totality and area-label uniqueness are [`Constraint::ExactlyOne`],
/// hint fixation is [`Constraint::FixTrue`], and adjacency exclusion is
/// [`Constraint::AtMostOneOf`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Exactly one of the listed variables is set.
    ExactlyOne(Vec<VarId>),
    /// The variable is forced to 1.
    FixTrue(VarId),
    /// At most one of the two variables is set.
    AtMostOneOf(VarId, VarId),
}

/// Constraint counts broken down by family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintCounts {
    /// One per cell: the cell carries exactly one label.
    pub cell_totality: usize,
    /// One per `(area, label)` pair: the label appears exactly once.
    pub area_uniqueness: usize,
    /// One per imposed hint.
    pub hint_fixation: usize,
    /// One per `(adjacent pair, shared label)` combination.
    pub adjacency_exclusion: usize,
}

impl ConstraintCounts {
    /// Total constraint count across all families.
    #[must_use]
    pub fn total(self) -> usize {
        self.cell_totality + self.area_uniqueness + self.hint_fixation + self.adjacency_exclusion
    }
}

/// A binary feasibility model of one Suguru solve.
///
/// For every cell `c` in an area of size `s` there is one variable
/// `x[c, k]` per label `k` in `1..=s`, meaning "cell `c` carries label `k`".
/// Labels outside a cell's area size have no variable at all, so constraints
/// are only ever emitted over defined variables.
///
/// # Example
///
/// ```
/// use suguru_core::{AreaIndex, Puzzle};
/// use suguru_model::CspModel;
///
/// let puzzle = Puzzle::parse("1 3\n1 2 1\n1 1 2\n").unwrap();
/// let areas = AreaIndex::new(&puzzle);
/// let model = CspModel::build(&puzzle, &areas, &[]);
///
/// // Two cells of a size-2 area plus one single-cell area.
/// assert_eq!(model.variable_count(), 5);
/// assert_eq!(model.counts().hint_fixation, 0);
/// ```
#[derive(Debug, Clone)]
pub struct CspModel {
    rows: usize,
    cols: usize,
    // Variables are laid out cell-major in row-major cell order; labels of
    // one cell are contiguous. `cell_offsets` has one sentinel entry at the
    // end so a cell's domain size is the offset difference.
    cell_offsets: Vec<usize>,
    variable_count: usize,
    constraints: Vec<Constraint>,
    counts: ConstraintCounts,
}

impl CspModel {
    /// Builds the model for `puzzle` with the given hint subset imposed.
    ///
    /// Constraint families are emitted in a fixed order: cell totality,
    /// area-label uniqueness, hint fixation, adjacency exclusion. Adjacent
    /// pairs are enumerated once each in canonical orientation, and the
    /// shared-label range is truncated to the smaller of the two area
    /// sizes, since the larger labels do not exist on one side.
    ///
    /// # Panics
    ///
    /// Panics if a hint's value is not a valid label for its cell's area.
    /// Hints drawn from [`Puzzle::all_hints`] on a well-formed puzzle always
    /// are.
    #[must_use]
    pub fn build(puzzle: &Puzzle, areas: &AreaIndex, hints: &[Hint]) -> Self {
        let rows = puzzle.rows();
        let cols = puzzle.cols();

        let mut cell_offsets = Vec::with_capacity(puzzle.cell_count() + 1);
        let mut variable_count = 0;
        for cell in puzzle.cells() {
            cell_offsets.push(variable_count);
            variable_count += areas.size_of(cell);
        }
        cell_offsets.push(variable_count);

        let mut this = Self {
            rows,
            cols,
            cell_offsets,
            variable_count,
            constraints: Vec::new(),
            counts: ConstraintCounts::default(),
        };

        for cell in puzzle.cells() {
            let vars = this.cell_vars(cell).collect();
            this.constraints.push(Constraint::ExactlyOne(vars));
            this.counts.cell_totality += 1;
        }

        for area in areas.areas() {
            let size = u32::try_from(area.size()).unwrap_or(u32::MAX);
            for label in 1..=size {
                let vars = area
                    .cells()
                    .iter()
                    .map(|&cell| this.expect_var(cell, label))
                    .collect();
                this.constraints.push(Constraint::ExactlyOne(vars));
                this.counts.area_uniqueness += 1;
            }
        }

        for hint in hints {
            let var = this.expect_var(hint.cell, hint.value);
            this.constraints.push(Constraint::FixTrue(var));
            this.counts.hint_fixation += 1;
        }

        for (a, b) in adjacent_pairs(rows, cols) {
            let shared = areas.size_of(a).min(areas.size_of(b));
            for label in 1..=u32::try_from(shared).unwrap_or(u32::MAX) {
                let constraint =
                    Constraint::AtMostOneOf(this.expect_var(a, label), this.expect_var(b, label));
                this.constraints.push(constraint);
                this.counts.adjacency_exclusion += 1;
            }
        }

        this
    }

    /// The variable for `x[cell, label]`, or `None` when `label` lies
    /// outside the cell's area-sized domain.
    #[must_use]
    pub fn var(&self, cell: Cell, label: u32) -> Option<VarId> {
        let idx = cell.row * self.cols + cell.col;
        let offset = self.cell_offsets[idx];
        let size = self.cell_offsets[idx + 1] - offset;
        let label = label as usize;
        (1..=size).contains(&label).then(|| VarId(offset + label - 1))
    }

    /// Number of grid rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of binary variables.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Total number of constraints across all families.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Constraint counts broken down by family.
    #[must_use]
    pub fn counts(&self) -> ConstraintCounts {
        self.counts
    }

    /// All constraints in emission order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The label domain of `cell` as variables, in label order.
    fn cell_vars(&self, cell: Cell) -> impl Iterator<Item = VarId> {
        let idx = cell.row * self.cols + cell.col;
        (self.cell_offsets[idx]..self.cell_offsets[idx + 1]).map(VarId)
    }

    fn expect_var(&self, cell: Cell, label: u32) -> VarId {
        self.var(cell, label)
            .unwrap_or_else(|| panic!("label {label} out of domain for cell {cell:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE4: &str = "\
4 4
1 2 3 4
3 4 1 2
1 2 3 4
3 4 1 2
1 1 2 2
1 1 2 2
3 3 4 4
3 3 4 4
";

    fn square4() -> (Puzzle, AreaIndex) {
        let puzzle = Puzzle::parse(SQUARE4).unwrap();
        let areas = AreaIndex::new(&puzzle);
        (puzzle, areas)
    }

    #[test]
    fn test_variable_and_family_counts() {
        let (puzzle, areas) = square4();
        let model = CspModel::build(&puzzle, &areas, &[]);

        // 16 cells, each in a size-4 area.
        assert_eq!(model.variable_count(), 64);
        let counts = model.counts();
        assert_eq!(counts.cell_totality, 16);
        // Four areas, four labels each.
        assert_eq!(counts.area_uniqueness, 16);
        assert_eq!(counts.hint_fixation, 0);
        // 42 adjacent pairs, all with shared label range 1..=4.
        assert_eq!(counts.adjacency_exclusion, 42 * 4);
        assert_eq!(model.constraint_count(), counts.total());
    }

    #[test]
    fn test_hint_count_grows_by_one_per_hint() {
        let (puzzle, areas) = square4();
        let all = puzzle.all_hints();

        let mut previous = CspModel::build(&puzzle, &areas, &[]);
        for k in 1..=all.len() {
            let model = CspModel::build(&puzzle, &areas, &all[..k]);
            assert_eq!(
                model.counts().hint_fixation,
                previous.counts().hint_fixation + 1
            );
            // The other families do not depend on the hint subset.
            assert_eq!(model.counts().cell_totality, previous.counts().cell_totality);
            assert_eq!(
                model.counts().area_uniqueness,
                previous.counts().area_uniqueness
            );
            assert_eq!(
                model.counts().adjacency_exclusion,
                previous.counts().adjacency_exclusion
            );
            previous = model;
        }
    }

    #[test]
    fn test_adjacency_truncates_to_smaller_area() {
        // Areas of size 2, 2, 1 along a single row: the pair touching the
        // single-cell area shares only label 1.
        let puzzle = Puzzle::parse("1 3\n1 2 1\n1 1 2\n").unwrap();
        let areas = AreaIndex::new(&puzzle);
        let model = CspModel::build(&puzzle, &areas, &[]);

        assert_eq!(model.variable_count(), 5);
        assert_eq!(model.counts().adjacency_exclusion, 2 + 1);

        // No variable exists for label 2 on the single-cell area.
        assert!(model.var(Cell::new(0, 2), 1).is_some());
        assert!(model.var(Cell::new(0, 2), 2).is_none());
        assert!(model.var(Cell::new(0, 1), 2).is_some());
    }

    #[test]
    fn test_var_ids_are_dense_and_distinct() {
        let (puzzle, areas) = square4();
        let model = CspModel::build(&puzzle, &areas, &[]);

        let mut seen = vec![false; model.variable_count()];
        for cell in puzzle.cells() {
            for label in 1..=4 {
                let var = model.var(cell, label).unwrap();
                assert!(!seen[var.index()]);
                seen[var.index()] = true;
            }
        }
        assert!(seen.iter().all(|&b| b));
    }

    #[test]
    #[should_panic(expected = "out of domain")]
    fn test_out_of_domain_hint_panics() {
        let puzzle = Puzzle::parse("1 3\n1 2 1\n1 1 2\n").unwrap();
        let areas = AreaIndex::new(&puzzle);
        let bad = Hint {
            cell: Cell::new(0, 2),
            value: 2,
        };
        let _ = CspModel::build(&puzzle, &areas, &[bad]);
    }
}
