use crate::{Cell, Puzzle};

/// One region of the puzzle partition.
///
/// A valid solution assigns each member cell a label in `1..=size`, each
/// label used exactly once within the area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    id: u32,
    cells: Vec<Cell>,
}

impl Area {
    /// The region id from the puzzle's region-id matrix.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Member cells in row-major encounter order.
    ///
    /// The order is stable: it drives both label decoding and the
    /// assignment-event sequence handed to presentation consumers.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of member cells, which is also the largest valid label.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Region membership derived from a [`Puzzle`].
///
/// Groups cells by region id, keeping areas in first-encounter order of a
/// row-major scan, and answers cell → area lookups in O(1).
///
/// # Example
///
/// ```
/// use suguru_core::{AreaIndex, Cell, Puzzle};
///
/// let puzzle = Puzzle::parse("1 3\n1 2 1\n1 1 2\n").unwrap();
/// let areas = AreaIndex::new(&puzzle);
/// assert_eq!(areas.areas().len(), 2);
/// assert_eq!(areas.size_of(Cell::new(0, 0)), 2);
/// assert_eq!(areas.size_of(Cell::new(0, 2)), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AreaIndex {
    areas: Vec<Area>,
    area_of: Vec<usize>,
    cols: usize,
}

impl AreaIndex {
    /// Builds the index by scanning the puzzle's region-id matrix.
    #[must_use]
    pub fn new(puzzle: &Puzzle) -> Self {
        let mut areas: Vec<Area> = Vec::new();
        let mut area_of = Vec::with_capacity(puzzle.cell_count());
        for cell in puzzle.cells() {
            let id = puzzle.area_id(cell);
            let slot = match areas.iter().position(|area| area.id == id) {
                Some(slot) => slot,
                None => {
                    areas.push(Area {
                        id,
                        cells: Vec::new(),
                    });
                    areas.len() - 1
                }
            };
            areas[slot].cells.push(cell);
            area_of.push(slot);
        }
        Self {
            areas,
            area_of,
            cols: puzzle.cols(),
        }
    }

    /// All areas in first-encounter order.
    #[must_use]
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// The area containing `cell`.
    #[must_use]
    pub fn area_of(&self, cell: Cell) -> &Area {
        &self.areas[self.area_of[cell.row * self.cols + cell.col]]
    }

    /// The size of the area containing `cell`.
    #[must_use]
    pub fn size_of(&self, cell: Cell) -> usize {
        self.area_of(cell).size()
    }
}
