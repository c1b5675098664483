//! TerminalRenderer: flushes canvases to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; later frames only rewrite runs of changed glyphs.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Tone};

const BACKDROP: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const WELL: Color = Color::Rgb { r: 30, g: 30, b: 40 };

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Canvas>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        self.last = None;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `canvas`, diffing against the previous frame when sizes match.
    pub fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if prev.width() == canvas.width() && prev.height() == canvas.height() => {
                encode_diff_into(prev, canvas, &mut self.buf)?;
            }
            _ => encode_full_into(canvas, &mut self.buf)?,
        }
        self.flush_buf()?;

        match &mut self.last {
            Some(prev) => prev.clone_from(canvas),
            None => self.last = Some(canvas.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<Tone> = None;
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let glyph = canvas.get(x, y).unwrap_or_default();
            if current != Some(glyph.tone) {
                apply_tone_into(out, glyph.tone)?;
                current = Some(glyph.tone);
            }
            out.queue(Print(glyph.ch))?;
        }
        if y + 1 < canvas.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed runs of `next` relative to `prev` into `out`.
pub fn encode_diff_into(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<Tone> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            if current != Some(glyph.tone) {
                apply_tone_into(out, glyph.tone)?;
                current = Some(glyph.tone);
            }
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Foreground, background and boldness of a tone.
fn tone_style(tone: Tone) -> (Color, Color, bool) {
    match tone {
        Tone::Plain => (Color::Rgb { r: 200, g: 200, b: 200 }, BACKDROP, false),
        Tone::Frame => (Color::Rgb { r: 200, g: 200, b: 200 }, BACKDROP, false),
        Tone::Well => (Color::Rgb { r: 90, g: 90, b: 100 }, WELL, false),
        Tone::Block(kind) => {
            let (r, g, b) = kind.rgb();
            (Color::Rgb { r, g, b }, WELL, true)
        }
        Tone::Label => (Color::Rgb { r: 220, g: 220, b: 220 }, BACKDROP, true),
        Tone::Value => (Color::Rgb { r: 240, g: 240, b: 240 }, BACKDROP, false),
        Tone::Muted => (Color::Rgb { r: 110, g: 110, b: 120 }, BACKDROP, false),
        Tone::Banner => (Color::Rgb { r: 255, g: 255, b: 255 }, Color::Rgb { r: 120, g: 0, b: 0 }, true),
    }
}

fn apply_tone_into(out: &mut Vec<u8>, tone: Tone) -> Result<()> {
    let (fg, bg, bold) = tone_style(tone);
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(fg))?;
    out.queue(SetBackgroundColor(bg))?;
    if bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn for_each_changed_run(
    prev: &Canvas,
    next: &Canvas,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    for y in 0..next.height() {
        let mut x = 0;
        while x < next.width() {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < next.width() && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
