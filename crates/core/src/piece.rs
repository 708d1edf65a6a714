//! Falling piece instance.

use crate::shape::{template, Shape};
use crate::types::{PieceKind, Rgb, BOARD_WIDTH};

/// A tetromino placed in board coordinates.
///
/// `x`/`y` locate the top-left corner of the shape's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece from its template, horizontally centered on row 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = template(kind);
        Self {
            kind,
            shape,
            x: Self::centered_x(&shape),
            y: 0,
        }
    }

    /// Column that centers `shape` on the board.
    pub fn centered_x(shape: &Shape) -> i8 {
        (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Absolute board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy of this piece shifted by `(dx, dy)`.
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
