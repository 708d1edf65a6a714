//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is compared row by row with the one already on screen. Changed
//! cells are grouped into spans, where a short run of unchanged cells is
//! reprinted instead of jumped over, and written through a pen that only
//! emits the colour, intensity and cursor escapes that actually change.
//!
//! On terminals that support the kitty keyboard protocol the renderer also
//! asks for key release events, so held movement keys can be released
//! precisely instead of by timeout.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};

/// Unchanged cells between two changes that are reprinted rather than
/// skipped; a cursor move costs about as many bytes.
const MERGE_GAP: usize = 4;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
    key_release_events: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(32 * 1024),
            key_release_events: false,
        }
    }

    /// Whether the terminal agreed to report key releases.
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        if self.key_release_events {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.key_release_events {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen; the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Bring the screen up to date with `fb`, then swap buffers.
    ///
    /// Afterwards `fb` holds a stale frame of the same size that the caller
    /// redraws into, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.shown.as_ref(), fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

        let mut spare = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(0, 0));
        spare.resize(fb.width(), fb.height());
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the escapes that turn `shown` into `next`.
///
/// With nothing on screen, or a screen of another size, the terminal is
/// cleared and every row is printed. Writes nothing when the frames match.
pub fn encode_frame(shown: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let shown = shown.filter(|s| (s.width(), s.height()) == (next.width(), next.height()));
    if shown.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        let row = next.row(y);
        match shown.map(|s| s.row(y)) {
            Some(old) if old == row => {}
            Some(old) => {
                for (start, end) in dirty_spans(old, row) {
                    pen.print(out, start, y, &row[start..end])?;
                }
            }
            None => pen.print(out, 0, y, row)?,
        }
    }
    pen.finish(out)
}

/// Terminal state left behind by the escapes written so far in a frame.
#[derive(Debug, Default)]
struct Pen {
    style: Option<CellStyle>,
    cursor: Option<(u16, u16)>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, x: usize, y: u16, cells: &[Cell]) -> Result<()> {
        let x = x as u16;
        if self.cursor != Some((x, y)) {
            out.queue(cursor::MoveTo(x, y))?;
        }
        for cell in cells {
            self.set_style(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        self.cursor = Some((x.saturating_add(cells.len() as u16), y));
        Ok(())
    }

    fn set_style(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        if prev == Some(style) {
            return Ok(());
        }
        if prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        if prev.map(|p| p.weight) != Some(style.weight) {
            out.queue(SetAttribute(Attribute::NormalIntensity))?;
            match style.weight {
                Weight::Normal => {}
                Weight::Bold => {
                    out.queue(SetAttribute(Attribute::Bold))?;
                }
                Weight::Dim => {
                    out.queue(SetAttribute(Attribute::Dim))?;
                }
            }
        }
        Ok(())
    }

    /// Leave the terminal with default colours if anything was styled.
    fn finish(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Half-open column spans where `old` and `new` differ. Changes separated by
/// at most `MERGE_GAP` unchanged cells share a span.
fn dirty_spans<'a>(old: &'a [Cell], new: &'a [Cell]) -> DirtySpans<'a> {
    DirtySpans { old, new, x: 0 }
}

struct DirtySpans<'a> {
    old: &'a [Cell],
    new: &'a [Cell],
    x: usize,
}

impl Iterator for DirtySpans<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (old, new) = (self.old, self.new);
        let len = old.len().min(new.len());
        let differs = |i: usize| old[i] != new[i];

        let start = (self.x..len).find(|&i| differs(i))?;
        let mut end = start + 1;
        let mut gap = 0;
        let mut i = end;
        while i < len && gap <= MERGE_GAP {
            if differs(i) {
                end = i + 1;
                gap = 0;
            } else {
                gap += 1;
            }
            i += 1;
        }
        self.x = end;
        Some((start, end))
    }
}
