//! Padded grid buffer shared by the horizontal and vertical edge views.
//!
//! The grid is stored the way it is drawn: one cell per printed character,
//! including dots and line ends, with one extra row of padding above and
//! below. Horizontal edges sit on even printed rows, vertical edges and box
//! centres on odd ones. A box centre's four edges are always at
//! `centre ± cols` (horizontal) and `centre ± 1` (vertical), and the padding
//! rows keep `edge ± cols` inside the buffer for the outermost horizontal
//! edges, so claiming a box never needs a bounds check.

use crate::types::{Dimensions, PlayerId, SetupError};
use serde::{Deserialize, Serialize};
use std::iter;
use tracing::{debug, instrument};

/// Which way an edge runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Orientation {
    /// Joins two dots in the same row.
    #[strum(serialize = "h")]
    Horizontal,
    /// Joins two dots in the same column.
    #[strum(serialize = "v")]
    Vertical,
}

impl Orientation {
    /// Parses the single-letter form used in moves (`h` or `v`).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'h' => Some(Orientation::Horizontal),
            b'v' => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// Character drawn for an edge of this orientation.
    pub fn marker(self) -> char {
        match self {
            Orientation::Horizontal => '-',
            Orientation::Vertical => '|',
        }
    }
}

/// One printed position of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cell {
    /// Outside the printed grid.
    Padding,
    /// A dot (`+`).
    Dot,
    /// End of a printed row.
    LineEnd,
    /// An edge slot.
    Edge {
        /// Direction of the edge.
        orientation: Orientation,
        /// Whether the edge has been drawn.
        drawn: bool,
    },
    /// A box centre and its owner, if claimed.
    Box(Option<PlayerId>),
}

impl Cell {
    fn blank(row: usize, col: usize, cols: usize) -> Self {
        if col == cols - 1 {
            return Cell::LineEnd;
        }
        match (row % 2 == 0, col % 2 == 0) {
            (true, true) => Cell::Dot,
            (true, false) => Cell::Edge {
                orientation: Orientation::Horizontal,
                drawn: false,
            },
            (false, true) => Cell::Edge {
                orientation: Orientation::Vertical,
                drawn: false,
            },
            (false, false) => Cell::Box(None),
        }
    }

    fn is_drawn_edge(self) -> bool {
        matches!(self, Cell::Edge { drawn: true, .. })
    }

    fn glyph(self) -> Option<char> {
        match self {
            Cell::Padding => None,
            Cell::Dot => Some('+'),
            Cell::LineEnd => Some('\n'),
            Cell::Edge {
                orientation,
                drawn: true,
            } => Some(orientation.marker()),
            Cell::Edge { drawn: false, .. } | Cell::Box(None) => Some(' '),
            Cell::Box(Some(owner)) => Some(owner.letter()),
        }
    }
}

/// Addressing scheme over the buffer for one edge orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    orientation: Orientation,
    origin: usize,
    rows: usize,
    per_row: usize,
    stride: usize,
    neighbor: usize,
}

impl View {
    /// Orientation of the edges in this view.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of rows of edges.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of edges in each row.
    pub fn per_row(&self) -> usize {
        self.per_row
    }

    /// Whether `(row, col)` names an edge of this view.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.per_row
    }

    fn index(&self, row: usize, col: usize) -> usize {
        self.origin + row * self.stride + 2 * col
    }
}

/// A bounds-checked reference to one edge slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    index: usize,
    orientation: Orientation,
}

impl EdgeRef {
    /// Orientation of the referenced edge.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// The cells one placement can change: its edge and the box slot on either
/// side, as they were when the footprint was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Footprint {
    edge: EdgeRef,
    cells: [(usize, Cell); 3],
}

impl Footprint {
    pub(crate) fn edge(&self) -> EdgeRef {
        self.edge
    }
}

/// Whether `now` keeps what `then` had: a drawn edge stays drawn and an
/// owned box keeps its owner.
fn keeps(now: &Cell, then: &Cell) -> bool {
    match then {
        Cell::Edge { drawn: true, .. } => now.is_drawn_edge(),
        Cell::Box(Some(owner)) => *now == Cell::Box(Some(*owner)),
        _ => true,
    }
}

/// The game grid: both edge views and box ownership in one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates a blank grid.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Allocation`] if the buffer cannot be reserved.
    #[instrument]
    pub fn new(dimensions: Dimensions) -> Result<Self, SetupError> {
        let cols = 2 * (dimensions.width() + 1);
        let printed_rows = 2 * dimensions.height() + 1;
        let len = (printed_rows + 2) * cols;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| SetupError::Allocation(len))?;

        cells.extend(iter::repeat_n(Cell::Padding, cols));
        for row in 0..printed_rows {
            cells.extend((0..cols).map(|col| Cell::blank(row, col, cols)));
        }
        cells.extend(iter::repeat_n(Cell::Padding, cols));

        debug!(len, cols, "Grid allocated");
        Ok(Self {
            dimensions,
            cols,
            cells,
        })
    }

    /// Grid size in boxes.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the view for one edge orientation.
    pub fn view(&self, orientation: Orientation) -> View {
        let (height, width) = (self.dimensions.height(), self.dimensions.width());
        match orientation {
            Orientation::Horizontal => View {
                orientation,
                origin: self.cols + 1,
                rows: height + 1,
                per_row: width,
                stride: 2 * self.cols,
                neighbor: self.cols,
            },
            Orientation::Vertical => View {
                orientation,
                origin: 2 * self.cols,
                rows: height,
                per_row: width + 1,
                stride: 2 * self.cols,
                neighbor: 1,
            },
        }
    }

    /// Looks up edge `(row, col)` of the given orientation.
    ///
    /// Returns `None` when the coordinates fall outside the view.
    pub fn edge(&self, orientation: Orientation, row: usize, col: usize) -> Option<EdgeRef> {
        let view = self.view(orientation);
        view.contains(row, col).then(|| EdgeRef {
            index: view.index(row, col),
            orientation,
        })
    }

    /// Whether the referenced edge has been drawn.
    pub fn is_drawn(&self, edge: EdgeRef) -> bool {
        self.cells[edge.index].is_drawn_edge()
    }

    /// Draws an edge. Returns `false` if it was already drawn.
    pub(crate) fn draw(&mut self, edge: EdgeRef) -> bool {
        match &mut self.cells[edge.index] {
            Cell::Edge { drawn, .. } if !*drawn => {
                *drawn = true;
                true
            }
            _ => false,
        }
    }

    /// Claims for `player` every box beside `edge` that is now enclosed.
    ///
    /// Returns the number of boxes claimed (0, 1 or 2).
    pub(crate) fn claim_beside(&mut self, edge: EdgeRef, player: PlayerId) -> usize {
        let offset = self.view(edge.orientation).neighbor;
        let before = self.try_claim(edge.index - offset, player);
        let after = self.try_claim(edge.index + offset, player);
        usize::from(before) + usize::from(after)
    }

    fn try_claim(&mut self, centre: usize, player: PlayerId) -> bool {
        if self.cells[centre] != Cell::Box(None) || !self.is_enclosed(centre) {
            return false;
        }
        self.cells[centre] = Cell::Box(Some(player));
        true
    }

    fn is_enclosed(&self, centre: usize) -> bool {
        [
            centre - self.cols,
            centre + self.cols,
            centre - 1,
            centre + 1,
        ]
        .into_iter()
        .all(|i| self.cells[i].is_drawn_edge())
    }

    fn box_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.dimensions.height() && col < self.dimensions.width())
            .then(|| (2 * row + 2) * self.cols + 2 * col + 1)
    }

    /// Owner of box `(row, col)`; `None` if unclaimed or out of range.
    pub fn box_owner(&self, row: usize, col: usize) -> Option<PlayerId> {
        match self.box_index(row, col).map(|i| self.cells[i]) {
            Some(Cell::Box(owner)) => owner,
            _ => None,
        }
    }

    /// Marks box `(row, col)` as owned, regardless of its edges.
    ///
    /// Returns `false` if the box is out of range or already owned.
    pub(crate) fn set_owner(&mut self, row: usize, col: usize, player: PlayerId) -> bool {
        match self.box_index(row, col) {
            Some(i) if self.cells[i] == Cell::Box(None) => {
                self.cells[i] = Cell::Box(Some(player));
                true
            }
            _ => false,
        }
    }

    /// Edge rows in printed order: horizontal row 0, vertical row 0,
    /// horizontal row 1, and so on down to the last horizontal row.
    pub fn edge_rows(&self) -> impl Iterator<Item = (Orientation, usize)> + use<> {
        let height = self.dimensions.height();
        (0..2 * height + 1).map(|printed| {
            let orientation = if printed % 2 == 0 {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            (orientation, printed / 2)
        })
    }

    /// Box owners in row-major order.
    pub fn owners(&self) -> impl Iterator<Item = Option<PlayerId>> + '_ {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Box(owner) => Some(*owner),
            _ => None,
        })
    }

    /// Number of edges drawn so far.
    pub fn drawn_edges(&self) -> usize {
        self.cells.iter().filter(|c| c.is_drawn_edge()).count()
    }

    /// Whether this grid only adds to `earlier`: every edge drawn there is
    /// drawn here and every box owned there has the same owner here.
    pub fn extends(&self, earlier: &Grid) -> bool {
        self.cols == earlier.cols
            && self.cells.len() == earlier.cells.len()
            && self
                .cells
                .iter()
                .zip(&earlier.cells)
                .all(|(now, then)| keeps(now, then))
    }

    /// Takes the footprint of `edge` before it is drawn.
    pub(crate) fn footprint(&self, edge: EdgeRef) -> Footprint {
        let offset = self.view(edge.orientation).neighbor;
        Footprint {
            edge,
            cells: [edge.index - offset, edge.index, edge.index + offset]
                .map(|i| (i, self.cells[i])),
        }
    }

    /// [`Grid::extends`] restricted to the cells of `earlier`.
    pub(crate) fn extends_footprint(&self, earlier: &Footprint) -> bool {
        earlier
            .cells
            .iter()
            .all(|(i, then)| keeps(&self.cells[*i], then))
    }

    /// Boxes in the footprint that were unowned then and belong to `player` now.
    pub(crate) fn claimed_since(&self, earlier: &Footprint, player: PlayerId) -> usize {
        earlier
            .cells
            .iter()
            .filter(|(i, then)| {
                *then == Cell::Box(None) && self.cells[*i] == Cell::Box(Some(player))
            })
            .count()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;

        let printed = &self.cells[self.cols..self.cells.len() - self.cols];
        for glyph in printed.iter().filter_map(|c| c.glyph()) {
            f.write_char(glyph)?;
        }
        Ok(())
    }
}
