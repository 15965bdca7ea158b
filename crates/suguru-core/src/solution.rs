use crate::{AreaIndex, Cell, Puzzle, adjacent_pairs};

/// A complete labeling of the grid, one label per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    rows: usize,
    cols: usize,
    labels: Vec<u32>,
}

/// One `(cell, label)` event of the decoded-assignment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// The assigned cell.
    pub cell: Cell,
    /// The label the cell carries.
    pub label: u32,
}

impl Solution {
    /// Creates a solution from a row-major label vector.
    ///
    /// # Panics
    ///
    /// Panics if `labels.len() != rows * cols`.
    #[must_use]
    pub fn from_labels(rows: usize, cols: usize, labels: Vec<u32>) -> Self {
        assert_eq!(labels.len(), rows * cols);
        Self { rows, cols, labels }
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

    /// The label carried by `cell`.
    #[must_use]
    pub fn label(&self, cell: Cell) -> u32 {
        self.labels[cell.row * self.cols + cell.col]
    }

    /// Whether every area's member labels form a permutation of
    /// `1..=size(area)`.
    #[must_use]
    pub fn areas_are_permutations(&self, areas: &AreaIndex) -> bool {
        areas.areas().iter().all(|area| {
            let size = area.size();
            let mut seen = vec![false; size];
            area.cells().iter().all(|&cell| {
                let label = self.label(cell) as usize;
                if label == 0 || label > size || seen[label - 1] {
                    return false;
                }
                seen[label - 1] = true;
                true
            })
        })
    }

    /// Whether every pair of 8-adjacent cells carries distinct labels.
    #[must_use]
    pub fn adjacent_labels_distinct(&self) -> bool {
        adjacent_pairs(self.rows, self.cols).all(|(a, b)| self.label(a) != self.label(b))
    }

    /// Whether this labeling satisfies all of the puzzle's constraints.
    #[must_use]
    pub fn satisfies(&self, puzzle: &Puzzle, areas: &AreaIndex) -> bool {
        self.rows == puzzle.rows()
            && self.cols == puzzle.cols()
            && self.areas_are_permutations(areas)
            && self.adjacent_labels_distinct()
    }

    /// The ordered, finite sequence of `(cell, label)` assignment events:
    /// area by area in index order, cell by cell in member order.
    ///
    /// The sequence is restartable (call again for a fresh pass) and defines
    /// ordering only; a presentation consumer drains it at its own pace.
    pub fn assignments<'a>(&'a self, areas: &'a AreaIndex) -> impl Iterator<Item = Assignment> + 'a {
        areas.areas().iter().flat_map(move |area| {
            area.cells().iter().map(move |&cell| Assignment {
                cell,
                label: self.label(cell),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square4() -> (Puzzle, AreaIndex) {
        // 4x4 grid split into four 2x2 areas, reference grid valid.
        let text = "\
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
        let puzzle = Puzzle::parse(text).unwrap();
        let areas = AreaIndex::new(&puzzle);
        (puzzle, areas)
    }

    #[test]
    fn test_reference_solution_is_valid() {
        let (puzzle, areas) = square4();
        let solution = puzzle.reference_solution().unwrap();
        assert!(solution.areas_are_permutations(&areas));
        assert!(solution.adjacent_labels_distinct());
        assert!(solution.satisfies(&puzzle, &areas));
    }

    #[test]
    fn test_duplicate_label_in_area_rejected() {
        let (puzzle, areas) = square4();
        let mut labels: Vec<u32> = puzzle.cells().map(|c| puzzle.reference_value(c)).collect();
        // Duplicate label 2 within the first area.
        labels[0] = 2;
        let solution = Solution::from_labels(4, 4, labels);
        assert!(!solution.areas_are_permutations(&areas));
        assert!(!solution.satisfies(&puzzle, &areas));
    }

    #[test]
    fn test_adjacent_duplicates_rejected() {
        // Areas are fine (two single-cell areas of label 1) but the cells
        // touch, so the adjacency check must fail.
        let puzzle = Puzzle::parse("1 2\n1 1\n1 2\n").unwrap();
        let areas = AreaIndex::new(&puzzle);
        let solution = Solution::from_labels(1, 2, vec![1, 1]);
        assert!(solution.areas_are_permutations(&areas));
        assert!(!solution.adjacent_labels_distinct());
    }

    #[test]
    fn test_assignment_events_follow_area_order() {
        let (puzzle, areas) = square4();
        let solution = puzzle.reference_solution().unwrap();

        let events: Vec<_> = solution.assignments(&areas).collect();
        assert_eq!(events.len(), 16);

        // Events come area by area in index order, members in encounter
        // order; the first area is the top-left 2x2 block.
        let head: Vec<_> = events[..4].iter().map(|a| a.cell).collect();
        assert_eq!(
            head,
            [
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1)
            ]
        );
        assert!(events.iter().all(|a| a.label == solution.label(a.cell)));

        // Restartable: a second pass yields the same sequence.
        let second: Vec<_> = solution.assignments(&areas).collect();
        assert_eq!(events, second);
    }
}
