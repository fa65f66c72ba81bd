//! The fixed-size walkability grid and its validated cell index

use crate::TileState;

/// Number of grid rows
pub const GRID_ROWS: usize = 29;
/// Number of grid columns
pub const GRID_COLS: usize = 31;
/// Total cell count (flat row-major storage)
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

/// A validated (row, col) index into a [`WalkGrid`].
///
/// Can only be constructed through [`CellIndex::new`], which bounds-checks
/// both axes, so `get`/`set` never see an out-of-range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex {
    row: usize,
    col: usize,
}

impl CellIndex {
    /// Create an index, or `None` if either axis is out of range.
    pub fn new(row: usize, col: usize) -> Option<CellIndex> {
        if row < GRID_ROWS && col < GRID_COLS {
            Some(CellIndex { row, col })
        } else {
            None
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Flat row-major offset into the cell array
    fn flat(&self) -> usize {
        self.row * GRID_COLS + self.col
    }
}

/// The walkability grid: exactly `GRID_ROWS x GRID_COLS` cells, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct WalkGrid {
    cells: [TileState; GRID_CELLS],
}

impl WalkGrid {
    /// Grid with every cell set to `state`
    pub fn filled(state: TileState) -> WalkGrid {
        WalkGrid {
            cells: [state; GRID_CELLS],
        }
    }

    /// Get the state at a validated index
    pub fn get(&self, cell: CellIndex) -> TileState {
        self.cells[cell.flat()]
    }

    /// Return a grid with exactly one cell changed; all others unchanged.
    #[must_use]
    pub fn set(&self, cell: CellIndex, state: TileState) -> WalkGrid {
        let mut next = self.clone();
        next.cells[cell.flat()] = state;
        next
    }

    /// Row-major rows of tile states (`GRID_ROWS` outer, `GRID_COLS` inner)
    pub fn to_rows(&self) -> Vec<Vec<TileState>> {
        self.cells
            .chunks(GRID_COLS)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Row-major rows of wire tokens, for archive metadata
    pub fn to_token_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(GRID_COLS)
            .map(|row| row.iter().map(|t| t.token().to_string()).collect())
            .collect()
    }

    /// Build a grid from wire-token rows.
    ///
    /// Shape is validated strictly: the outer sequence must have exactly
    /// `GRID_ROWS` entries and every inner sequence exactly `GRID_COLS`. On
    /// any violation the whole input is discarded and the default
    /// all-Blocked grid is returned instead - a deliberate
    /// lossy-but-available recovery, never a partial merge. Token values
    /// themselves cannot fail (unknown tokens decode to Blocked).
    pub fn from_token_rows(rows: &[Vec<String>]) -> WalkGrid {
        if rows.len() != GRID_ROWS || rows.iter().any(|r| r.len() != GRID_COLS) {
            log::warn!(
                "tile grid shape mismatch ({} rows, expected {}); substituting default grid",
                rows.len(),
                GRID_ROWS
            );
            return WalkGrid::default();
        }

        let mut cells = [TileState::Blocked; GRID_CELLS];
        for (r, row) in rows.iter().enumerate() {
            for (c, token) in row.iter().enumerate() {
                cells[r * GRID_COLS + c] = TileState::from_token(token);
            }
        }
        WalkGrid { cells }
    }

    /// Iterate all valid indices in row-major order
    pub fn indices() -> impl Iterator<Item = CellIndex> {
        (0..GRID_ROWS)
            .flat_map(|row| (0..GRID_COLS).map(move |col| CellIndex { row, col }))
    }
}

impl Default for WalkGrid {
    /// The default grid is all-Blocked
    fn default() -> Self {
        WalkGrid::filled(TileState::Blocked)
    }
}

impl std::fmt::Debug for WalkGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let walkable = self
            .cells
            .iter()
            .filter(|t| **t == TileState::Walkable)
            .count();
        write!(
            f,
            "WalkGrid({}x{}, {} walkable)",
            GRID_ROWS, GRID_COLS, walkable
        )
    }
}
