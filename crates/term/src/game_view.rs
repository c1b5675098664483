//! GameView: maps an engine snapshot onto a [`Canvas`].
//!
//! Pure, no I/O. Board cells are drawn `cell_w` columns wide to roughly
//! square them up in a terminal.

use crate::canvas::{Canvas, Glyph, Tone};
use crate::core::{EngineSnapshot, PieceSnapshot};
use crate::types::{LegendEntry, PieceKind};

/// Columns between the board frame and the side panel
const PANEL_GAP: u16 = 3;
/// Width reserved for the side panel
const PANEL_W: u16 = 22;

const BLOCK: char = '█';
const DOT: char = '·';

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

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

/// Where the board frame landed on the canvas.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into a fresh canvas the size of `viewport`.
    pub fn render(
        &self,
        snap: &EngineSnapshot,
        legend: &[LegendEntry],
        viewport: Viewport,
    ) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, legend, viewport, &mut canvas);
        canvas
    }

    /// Render into an existing canvas, resizing it to `viewport` first.
    pub fn render_into(
        &self,
        snap: &EngineSnapshot,
        legend: &[LegendEntry],
        viewport: Viewport,
        canvas: &mut Canvas,
    ) {
        canvas.resize(viewport.width, viewport.height);
        canvas.clear();

        let frame_w = clamp_u16(snap.width)
            .saturating_mul(self.cell_w)
            .saturating_add(2);
        let frame_h = clamp_u16(snap.height).saturating_add(2);
        let total_w = frame_w.saturating_add(PANEL_GAP).saturating_add(PANEL_W);
        let frame = Frame {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        draw_border(canvas, frame);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                // Columns further right are off the canvas too.
                let Some(origin) = self.cell_origin(canvas, frame, x, y) else {
                    break;
                };
                match cell {
                    Some(kind) => self.draw_block(canvas, origin, *kind),
                    None => self.draw_empty(canvas, origin),
                }
            }
        }

        if let Some(current) = &snap.current {
            for (x, y) in current.cells() {
                // Cells above the top row are not drawn.
                let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                if x >= snap.width || y >= snap.height {
                    continue;
                }
                if let Some(origin) = self.cell_origin(canvas, frame, x, y) {
                    self.draw_block(canvas, origin, current.kind);
                }
            }
        }

        self.draw_side_panel(canvas, snap, legend, frame);

        if snap.game_over() {
            draw_game_over(canvas, frame);
        }
    }

    /// Canvas position of board cell `(x, y)`, `None` when it falls off the canvas.
    fn cell_origin(&self, canvas: &Canvas, frame: Frame, x: usize, y: usize) -> Option<(u16, u16)> {
        let px = usize::from(frame.x) + 1 + x.checked_mul(usize::from(self.cell_w))?;
        let py = usize::from(frame.y) + 1 + y;
        if px >= usize::from(canvas.width()) || py >= usize::from(canvas.height()) {
            return None;
        }
        Some((u16::try_from(px).ok()?, u16::try_from(py).ok()?))
    }

    fn draw_block(&self, canvas: &mut Canvas, (px, py): (u16, u16), kind: PieceKind) {
        canvas.fill(px, py, self.cell_w, 1, Glyph::new(BLOCK, Tone::Block(kind)));
    }

    fn draw_empty(&self, canvas: &mut Canvas, (px, py): (u16, u16)) {
        canvas.fill(px, py, self.cell_w, 1, Glyph::new(' ', Tone::Well));
        canvas.put(px, py, Glyph::new(DOT, Tone::Well));
    }

    fn draw_side_panel(
        &self,
        canvas: &mut Canvas,
        snap: &EngineSnapshot,
        legend: &[LegendEntry],
        frame: Frame,
    ) {
        let x = frame.x.saturating_add(frame.w).saturating_add(PANEL_GAP);
        if x >= canvas.width() {
            return;
        }
        let desc_x = x.saturating_add(7);

        let mut y = frame.y;
        for (label, value) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            canvas.text(x, y, label, Tone::Label);
            canvas.text(x, y.saturating_add(1), &value.to_string(), Tone::Value);
            y = y.saturating_add(3);
        }

        canvas.text(x, y, "NEXT", Tone::Label);
        y = y.saturating_add(1);
        let used = self.draw_preview(canvas, &snap.next, x, y);
        y = y.saturating_add(used).saturating_add(1);

        canvas.text(x, y, "CONTROLS", Tone::Label);
        y = y.saturating_add(1);
        for entry in legend {
            let (key, tone) = match &entry.key {
                Some(key) => (key.as_str(), Tone::Value),
                None => ("?", Tone::Muted),
            };
            canvas.text(x, y, key, tone);
            canvas.text(desc_x, y, entry.action.description(), Tone::Plain);
            y = y.saturating_add(1);
        }
        canvas.text(x, y, "R", Tone::Value);
        canvas.text(desc_x, y, "Restart", Tone::Plain);
        y = y.saturating_add(1);
        canvas.text(x, y, "Q/Esc", Tone::Value);
        canvas.text(desc_x, y, "Quit", Tone::Plain);
    }

    /// Draw the next piece's matrix; returns the rows used.
    fn draw_preview(&self, canvas: &mut Canvas, piece: &PieceSnapshot, x: u16, y: u16) -> u16 {
        for (dy, row) in piece.shape.iter().enumerate() {
            for (dx, &v) in row.iter().enumerate() {
                if v != 0 {
                    let px = x.saturating_add(clamp_u16(dx).saturating_mul(self.cell_w));
                    canvas.fill(
                        px,
                        y.saturating_add(clamp_u16(dy)),
                        self.cell_w,
                        1,
                        Glyph::new(BLOCK, Tone::Block(piece.kind)),
                    );
                }
            }
        }
        clamp_u16(piece.shape.len())
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn draw_border(canvas: &mut Canvas, frame: Frame) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);

    let put = |canvas: &mut Canvas, cx, cy, ch| canvas.put(cx, cy, Glyph::new(ch, Tone::Frame));
    put(canvas, x, y, '┌');
    put(canvas, right, y, '┐');
    put(canvas, x, bottom, '└');
    put(canvas, right, bottom, '┘');
    // Only the part that can land on the canvas.
    let span_w = (w - 1).min(canvas.width().saturating_sub(x));
    let span_h = (h - 1).min(canvas.height().saturating_sub(y));
    for dx in 1..span_w {
        put(canvas, x + dx, y, '─');
        put(canvas, x + dx, bottom, '─');
    }
    for dy in 1..span_h {
        put(canvas, x, y + dy, '│');
        put(canvas, right, y + dy, '│');
    }
}

fn draw_game_over(canvas: &mut Canvas, frame: Frame) {
    let lines = ["GAME OVER", "", "R  restart", "Q  quit"];
    let box_w = 14.min(frame.w.saturating_sub(2));
    let box_h = clamp_u16(lines.len()) + 2;
    let bx = frame.x.saturating_add(frame.w.saturating_sub(box_w) / 2);
    let by = frame.y.saturating_add(frame.h.saturating_sub(box_h) / 2);

    canvas.fill(bx, by, box_w, box_h, Glyph::new(' ', Tone::Banner));
    for (i, line) in lines.iter().enumerate() {
        let lx = bx.saturating_add(box_w.saturating_sub(clamp_u16(line.chars().count())) / 2);
        let ly = by.saturating_add(1).saturating_add(clamp_u16(i));
        canvas.text(lx, ly, line, Tone::Banner);
    }
}
