//! Framebuffer and style types for terminal rendering.

pub use crate::types::Rgb;

/// Text intensity. The game never needs bold and dim at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

/// Per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub weight: Weight,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            weight: Weight::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        self.with_weight(Weight::Bold)
    }

    pub const fn dim(self) -> Self {
        self.with_weight(Weight::Dim)
    }

    pub const fn with_weight(self, weight: Weight) -> Self {
        Self { weight, ..self }
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Row-major grid of styled cells. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions in place; the allocation is reused when it is large
    /// enough. Cell contents are unspecified afterwards.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    /// Row `y`, or an empty slice past the bottom edge.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        &self.cells[start..start + w]
    }

    fn row_mut(&mut self, y: u16) -> &mut [Cell] {
        if y >= self.height {
            return &mut [];
        }
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        &mut self.cells[start..start + w]
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.row(y).get(usize::from(x)).copied()
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.row_mut(y).get_mut(usize::from(x)) {
            *slot = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.into_cell(ch));
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let row = self.row_mut(y);
        let start = usize::from(x).min(row.len());
        for (slot, ch) in row[start..].iter_mut().zip(s.chars()) {
            *slot = style.into_cell(ch);
        }
    }

    /// Write a decimal number without allocating. Returns the digit count.
    pub fn put_u64(&mut self, x: u16, y: u16, n: u64, style: CellStyle) -> u16 {
        let mut digits = [0u8; 20];
        let mut start = digits.len();
        let mut rest = n;
        loop {
            start -= 1;
            digits[start] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        let text = &digits[start..];
        for (i, d) in text.iter().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, char::from(*d), style);
        }
        text.len() as u16
    }

    pub fn put_u32(&mut self, x: u16, y: u16, n: u32, style: CellStyle) -> u16 {
        self.put_u64(x, y, u64::from(n), style)
    }

    /// Fill a rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        let cell = style.into_cell(ch);
        let bottom = y.saturating_add(h).min(self.height);
        for ry in y..bottom {
            let row = self.row_mut(ry);
            let left = usize::from(x).min(row.len());
            let right = usize::from(x.saturating_add(w)).min(row.len());
            row[left..right].fill(cell);
        }
    }

    /// Row `y` as a string, mostly for tests.
    pub fn row_string(&self, y: u16) -> String {
        let mut s: String = self.row(y).iter().map(|c| c.ch).collect();
        let missing = usize::from(self.width).saturating_sub(s.chars().count());
        s.extend(std::iter::repeat(' ').take(missing));
        s
    }
}
