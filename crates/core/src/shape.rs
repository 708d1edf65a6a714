//! Shape module - tetromino occupancy matrices
//!
//! Each piece kind has one template matrix (rows × cols, row-major). Rotation
//! produces a brand-new matrix with transposed dimensions; shapes are `Copy`,
//! so a rotated candidate never aliases the shape it was derived from.

use serde::Serialize;

use crate::types::PieceKind;

/// Largest bounding box any tetromino occupies in any orientation.
pub const MAX_SHAPE_DIM: usize = 4;

/// A small occupancy matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from row slices of `0`/`1`.
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4×4. Only used
    /// with the static templates and in tests.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM);
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM);

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape matrix");
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether `(col, row)` is occupied. Out-of-range is empty.
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        col < self.cols && row < self.rows && self.cells[row as usize][col as usize]
    }

    /// Occupied `(col, row)` offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.cells[r as usize][c as usize])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// 90° clockwise rotation.
    ///
    /// `rotated[c][rows - 1 - r] = original[r][c]`, so an `r × c` matrix
    /// becomes `c × r`.
    pub fn rotate_cw(&self) -> Shape {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..rows {
            for c in 0..cols {
                cells[c][rows - 1 - r] = self.cells[r][c];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Row-major `0`/`1` matrix, for snapshots and debugging.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|r| {
                (0..self.cols as usize)
                    .map(|c| u8::from(self.cells[r][c]))
                    .collect()
            })
            .collect()
    }
}

/// Spawn template for a piece kind.
pub fn template(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
    }
}

/// Horizontal wall-kick offsets tried in order after a rotation.
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(template(kind).cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn rotate_transposes_dimensions() {
        let t = template(PieceKind::T);
        let r = t.rotate_cw();
        assert_eq!((t.rows(), t.cols()), (2, 3));
        assert_eq!((r.rows(), r.cols()), (3, 2));
        assert_eq!(r.to_matrix(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn four_rotations_is_identity() {
        for kind in PieceKind::ALL {
            let s = template(kind);
            assert_eq!(s.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), s);
        }
    }

    #[test]
    fn rotation_leaves_source_untouched() {
        let original = template(PieceKind::L);
        let before = original;
        let _rotated = original.rotate_cw();
        assert_eq!(original, before);
    }

    #[test]
    fn i_piece_rotates_to_column() {
        let r = template(PieceKind::I).rotate_cw();
        assert_eq!((r.rows(), r.cols()), (4, 1));
        assert_eq!(r.cells().collect::<Vec<_>>(), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    }
}
