//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout: hold and stats on the left, the bordered well in the middle, the
//! five-piece preview on the right. Side panels are dropped when the viewport
//! is too narrow for them.

use crate::core::{template, GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb, Weight};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Width reserved for each side panel, in terminal columns.
pub const PANEL_WIDTH: u16 = 10;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left corner of the well border.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered well.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), WELL_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        // Background for play area.
        fb.fill_rect(
            origin.x + 1,
            origin.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );

        // Border.
        self.draw_border(fb, origin.x, origin.y, frame_w, frame_h, border);

        // Locked board cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_board_cell(fb, origin, x as u16, y as u16, *kind),
                    None => self.draw_empty_cell(fb, origin, x as u16, y as u16),
                }
            }
        }

        // Ghost piece, then the active piece on top of it.
        if let Some(ghost) = snap.ghost {
            let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
            self.draw_piece(fb, &ghost, |view, fb, x, y| {
                view.fill_cell_rect(fb, origin, x, y, '░', ghost_style);
            });
        }
        if let Some(active) = snap.active {
            self.draw_piece(fb, &active, |view, fb, x, y| {
                view.draw_board_cell(fb, origin, x, y, active.kind);
            });
        }

        self.draw_left_panel(fb, snap, origin);
        self.draw_right_panel(fb, snap, viewport, origin, frame_w);

        // Overlays.
        if snap.game_over {
            self.draw_overlay_text(fb, origin, frame_w, frame_h, 0, "GAME OVER");
            self.draw_overlay_text(fb, origin, frame_w, frame_h, 2, "R: restart");
        } else if snap.paused {
            self.draw_overlay_text(fb, origin, frame_w, frame_h, 0, "PAUSED");
            self.draw_overlay_text(fb, origin, frame_w, frame_h, 2, "P: resume");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Call `draw` for every on-board cell of `piece`.
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        piece: &PieceSnapshot,
        mut draw: impl FnMut(&Self, &mut FrameBuffer, u16, u16),
    ) {
        for (x, y) in piece.cells() {
            if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                draw(self, fb, x as u16, y as u16);
            }
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell_rect(fb, origin, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(kind.color(), WELL_BG).bold();
        self.fill_cell_rect(fb, origin, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin.x + 1 + cell_x * self.cell_w;
        let py = origin.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Small preview of a piece kind in its spawn orientation.
    fn draw_mini_piece(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dim: bool) {
        let weight = if dim { Weight::Dim } else { Weight::Bold };
        let style = CellStyle::new(kind.color(), SCREEN_BG).with_weight(weight);
        for (cx, cy) in template(kind).cells() {
            fb.fill_rect(x + cx as u16 * 2, y + cy as u16, 2, 1, '█', style);
        }
    }

    fn draw_left_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, origin: Origin) {
        if origin.x < PANEL_WIDTH + 2 {
            return;
        }
        let panel_x = origin.x - PANEL_WIDTH - 2;
        let (label, value) = panel_styles();

        let mut y = origin.y;
        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => self.draw_mini_piece(fb, panel_x, y, kind, !snap.can_hold),
            None => fb.put_str(panel_x, y, "-", value),
        }
        y += 3;

        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("COMBO", snap.combo),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "TIME", label);
        put_clock(fb, panel_x, y + 1, snap.elapsed_ms, value);
        y += 3;

        if snap.back_to_back {
            fb.put_str(panel_x, y, "B2B", label);
        }
    }

    fn draw_right_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(PANEL_WIDTH) > viewport.width {
            return;
        }
        let (label, _) = panel_styles();

        let mut y = origin.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for (i, kind) in snap.next_queue.iter().enumerate() {
            if y.saturating_add(2) > viewport.height {
                break;
            }
            self.draw_mini_piece(fb, panel_x, y, *kind, i > 0);
            y += 3;
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        frame_w: u16,
        frame_h: u16,
        row_offset: u16,
        text: &str,
    ) {
        let mid_y = origin.y.saturating_add(frame_h / 2).saturating_add(row_offset);
        let text_w = text.chars().count() as u16;
        let x = origin.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn panel_styles() -> (CellStyle, CellStyle) {
    let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
    let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
    (label, value)
}

/// `mm:ss` play time.
fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, elapsed_ms: u64, style: CellStyle) {
    let secs = elapsed_ms / 1000;
    let (m, s) = (secs / 60, secs % 60);
    let mut cx = x;
    if m < 10 {
        fb.put_char(cx, y, '0', style);
        cx += 1;
    }
    cx += fb.put_u64(cx, y, m, style);
    fb.put_char(cx, y, ':', style);
    cx += 1;
    if s < 10 {
        fb.put_char(cx, y, '0', style);
        cx += 1;
    }
    fb.put_u64(cx, y, s, style);
}
