use crate::{Cell, Solution};

/// A loaded Suguru puzzle.
///
/// Holds the grid dimensions, the reference solution grid (`0` marking a cell
/// with no recorded ground-truth value), and the region-id matrix that
/// partitions the grid into areas. Region ids are opaque and need not be
/// contiguous; every cell belongs to exactly one region.
///
/// The reference grid doubles as the pool of ground-truth clues: see
/// [`Puzzle::all_hints`]. The subset of hints actually imposed on a solve is
/// tracked by the caller, never written back into the puzzle.
///
/// # Text format
///
/// ```text
/// line 1:        <rows> <cols>
/// next <rows>:   <cols> integers per line - reference grid, 0 = blank
/// next <rows>:   <cols> integers per line - region-id matrix
/// ```
///
/// # Example
///
/// ```
/// use suguru_core::{Cell, Puzzle};
///
/// let puzzle = Puzzle::parse("1 3\n1 2 1\n1 1 2\n").unwrap();
/// assert_eq!(puzzle.rows(), 1);
/// assert_eq!(puzzle.cols(), 3);
/// assert_eq!(puzzle.reference_value(Cell::new(0, 1)), 2);
/// assert_eq!(puzzle.area_id(Cell::new(0, 2)), 2);
/// assert_eq!(puzzle.all_hints().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    rows: usize,
    cols: usize,
    reference: Vec<u32>,
    area_ids: Vec<u32>,
}

/// A ground-truth clue: a cell pre-filled with its reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hint {
    /// The pre-filled cell.
    pub cell: Cell,
    /// The label imposed on the cell. Always a valid label for the cell's
    /// area when drawn from [`Puzzle::all_hints`] on a well-formed puzzle.
    pub value: u32,
}

/// Errors produced while parsing puzzle text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    /// The input is empty.
    #[display("missing `rows cols` header line")]
    MissingHeader,
    /// The header line does not consist of exactly two tokens.
    #[display("expected `rows cols` header, found {found} tokens")]
    HeaderShape {
        /// Number of tokens found on the header line.
        found: usize,
    },
    /// One of the declared dimensions is zero.
    #[display("grid dimensions must be positive, found {rows}x{cols}")]
    EmptyDimensions {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
    },
    /// Fewer lines are present than the header demands.
    #[display("expected {expected} lines, found {found}")]
    Truncated {
        /// Required line count (`2 * rows + 1`).
        expected: usize,
        /// Lines actually present.
        found: usize,
    },
    /// A grid line holds the wrong number of values.
    #[display("line {line}: expected {expected} values, found {found}")]
    RowShape {
        /// 1-based line number.
        line: usize,
        /// Expected value count (`cols`).
        expected: usize,
        /// Values actually present.
        found: usize,
    },
    /// A token is not a non-negative integer.
    #[display("line {line}: `{token}` is not an integer")]
    InvalidToken {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
}

impl Puzzle {
    /// Parses puzzle text into a [`Puzzle`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the header does not hold exactly two
    /// integers, a dimension is zero, fewer than `2 * rows + 1` lines are
    /// present, a grid line holds a number of values other than `cols`, or
    /// any token fails to parse as a non-negative integer. On error no
    /// puzzle is produced, so the caller retains whatever state it had.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = text.lines().collect();
        let header = *lines.first().ok_or(ParseError::MissingHeader)?;

        let tokens: Vec<&str> = header.split_whitespace().collect();
        let [rows, cols] = tokens[..] else {
            return Err(ParseError::HeaderShape { found: tokens.len() });
        };
        let rows = parse_dimension(rows)?;
        let cols = parse_dimension(cols)?;
        if rows == 0 || cols == 0 {
            return Err(ParseError::EmptyDimensions { rows, cols });
        }

        let expected = 2 * rows + 1;
        if lines.len() < expected {
            return Err(ParseError::Truncated {
                expected,
                found: lines.len(),
            });
        }

        let reference = parse_matrix(&lines[1..=rows], 2, rows, cols)?;
        let area_ids = parse_matrix(&lines[rows + 1..=2 * rows], rows + 2, rows, cols)?;

        Ok(Self {
            rows,
            cols,
            reference,
            area_ids,
        })
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

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// The recorded ground-truth value of `cell`, `0` meaning "none".
    #[must_use]
    pub fn reference_value(&self, cell: Cell) -> u32 {
        self.reference[self.index(cell)]
    }

    /// The region id of `cell`.
    #[must_use]
    pub fn area_id(&self, cell: Cell) -> u32 {
        self.area_ids[self.index(cell)]
    }

    /// Every cell with a recorded ground-truth value, as hints, in row-major
    /// encounter order. This is the full pool a hint subset is drawn from.
    #[must_use]
    pub fn all_hints(&self) -> Vec<Hint> {
        self.cells()
            .filter_map(|cell| {
                let value = self.reference_value(cell);
                (value != 0).then_some(Hint { cell, value })
            })
            .collect()
    }

    /// The reference grid as a [`Solution`], or `None` if any cell lacks a
    /// recorded value.
    #[must_use]
    pub fn reference_solution(&self) -> Option<Solution> {
        if self.reference.contains(&0) {
            return None;
        }
        Some(Solution::from_labels(
            self.rows,
            self.cols,
            self.reference.clone(),
        ))
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(cell.row < self.rows && cell.col < self.cols);
        cell.row * self.cols + cell.col
    }
}

fn parse_matrix(
    lines: &[&str],
    first_line_no: usize,
    rows: usize,
    cols: usize,
) -> Result<Vec<u32>, ParseError> {
    let mut values = Vec::with_capacity(rows * cols);
    for (offset, line) in lines.iter().enumerate() {
        let line_no = first_line_no + offset;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != cols {
            return Err(ParseError::RowShape {
                line: line_no,
                expected: cols,
                found: tokens.len(),
            });
        }
        for token in tokens {
            values.push(parse_token(line_no, token)?);
        }
    }
    Ok(values)
}

fn parse_dimension(token: &str) -> Result<usize, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidToken {
        line: 1,
        token: token.to_owned(),
    })
}

fn parse_token(line: usize, token: &str) -> Result<u32, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidToken {
        line,
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
2 3
1 2 1
2 1 3
1 1 2
1 2 2
";

    #[test]
    fn test_parse_small_puzzle() {
        let puzzle = Puzzle::parse(SMALL).unwrap();
        assert_eq!(puzzle.rows(), 2);
        assert_eq!(puzzle.cols(), 3);
        assert_eq!(puzzle.reference_value(Cell::new(1, 2)), 3);
        assert_eq!(puzzle.area_id(Cell::new(0, 0)), 1);
        assert_eq!(puzzle.area_id(Cell::new(1, 1)), 2);
    }

    #[test]
    fn test_all_hints_in_encounter_order() {
        let puzzle = Puzzle::parse("1 3\n1 0 2\n1 1 2\n").unwrap();
        let hints = puzzle.all_hints();
        assert_eq!(
            hints,
            vec![
                Hint {
                    cell: Cell::new(0, 0),
                    value: 1
                },
                Hint {
                    cell: Cell::new(0, 2),
                    value: 2
                },
            ]
        );
    }

    #[test]
    fn test_reference_solution_requires_full_grid() {
        let full = Puzzle::parse("1 2\n1 2\n1 1\n").unwrap();
        assert!(full.reference_solution().is_some());

        let partial = Puzzle::parse("1 2\n1 0\n1 1\n").unwrap();
        assert!(partial.reference_solution().is_none());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Puzzle::parse(""), Err(ParseError::MissingHeader));
    }

    #[test]
    fn test_bad_header_token_count() {
        assert_eq!(
            Puzzle::parse("2 3 4\n"),
            Err(ParseError::HeaderShape { found: 3 })
        );
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Puzzle::parse("0 3\n"),
            Err(ParseError::EmptyDimensions { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn test_truncated_input() {
        // Header declares 5 rows but only 4 grid rows follow.
        let text = "5 1\n1\n2\n3\n4\n";
        assert_eq!(
            Puzzle::parse(text),
            Err(ParseError::Truncated {
                expected: 11,
                found: 5
            })
        );
    }

    #[test]
    fn test_short_row_rejected() {
        let text = "2 3\n1 2 1\n2 1\n1 1 2\n1 2 2\n";
        assert_eq!(
            Puzzle::parse(text),
            Err(ParseError::RowShape {
                line: 3,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_non_integer_token_rejected() {
        let text = "2 3\n1 2 1\n2 1 x\n1 1 2\n1 2 2\n";
        assert_eq!(
            Puzzle::parse(text),
            Err(ParseError::InvalidToken {
                line: 3,
                token: "x".to_owned()
            })
        );
    }

    #[test]
    fn test_area_matrix_errors_use_absolute_line_numbers() {
        let text = "2 3\n1 2 1\n2 1 3\n1 1 2\n1 2\n";
        assert_eq!(
            Puzzle::parse(text),
            Err(ParseError::RowShape {
                line: 5,
                expected: 3,
                found: 2
            })
        );
    }
}
