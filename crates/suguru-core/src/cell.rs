/// A cell coordinate on the puzzle grid.
///
/// Ordering is row-major: `(row, col)` pairs compare lexicographically, which
/// gives every unordered cell pair a canonical orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Row index (0-based, top to bottom).
    pub row: usize,
    /// Column index (0-based, left to right).
    pub col: usize,
}

impl Cell {
    /// Creates a cell coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns all cells 8-directionally adjacent to `self` within a
    /// `rows` × `cols` grid.
    ///
    /// Edge and corner cells yield fewer than eight neighbors.
    pub fn neighbors(self, rows: usize, cols: usize) -> impl Iterator<Item = Cell> {
        (-1..=1).flat_map(move |dr: isize| {
            (-1..=1).filter_map(move |dc: isize| {
                if dr == 0 && dc == 0 {
                    return None;
                }
                let nr = self.row.checked_add_signed(dr)?;
                let nc = self.col.checked_add_signed(dc)?;
                (nr < rows && nc < cols).then_some(Cell::new(nr, nc))
            })
        })
    }
}

/// Returns every unordered pair of 8-adjacent cells in a `rows` × `cols`
/// grid, each pair exactly once with the row-major smaller cell first.
///
/// # Example
///
/// ```
/// use suguru_core::adjacent_pairs;
///
/// // A 2x2 grid has 4 edge adjacencies and 2 diagonal ones.
/// assert_eq!(adjacent_pairs(2, 2).count(), 6);
/// ```
pub fn adjacent_pairs(rows: usize, cols: usize) -> impl Iterator<Item = (Cell, Cell)> {
    // Offsets pointing strictly forward in row-major order, so each
    // unordered pair is emitted from its smaller endpoint only.
    const FORWARD: [(isize, isize); 4] = [(0, 1), (1, -1), (1, 0), (1, 1)];

    (0..rows).flat_map(move |row| {
        (0..cols).flat_map(move |col| {
            let cell = Cell::new(row, col);
            FORWARD.iter().filter_map(move |&(dr, dc)| {
                let nr = row.checked_add_signed(dr)?;
                let nc = col.checked_add_signed(dc)?;
                (nr < rows && nc < cols).then_some((cell, Cell::new(nr, nc)))
            })
        })
    })
}
