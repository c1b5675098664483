//! Character canvas with semantic tones.
//!
//! Glyphs carry a [`Tone`] rather than concrete colours; the renderer decides
//! how a tone looks on the terminal.

use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    /// Board border
    Frame,
    /// Empty board cell
    Well,
    /// Locked or falling block of a kind
    Block(PieceKind),
    Label,
    Value,
    /// Hidden or secondary text
    Muted,
    /// Overlay text
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub tone: Tone,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        tone: Tone::Plain,
    };

    pub const fn new(ch: char, tone: Tone) -> Self {
        Self { ch, tone }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Row-major grid of glyphs. Writes outside the canvas are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are unspecified
    /// afterwards; callers clear before painting.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(width as usize * height as usize, Glyph::BLANK);
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::BLANK);
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write `s` left to right starting at `(x, y)`.
    pub fn text(&mut self, x: u16, y: u16, s: &str, tone: Tone) {
        for (i, ch) in s.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16) else {
                break;
            };
            self.put(cx, y, Glyph::new(ch, tone));
        }
    }

    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, glyph: Glyph) {
        for dy in 0..h {
            for dx in 0..w {
                self.put(x.saturating_add(dx), y.saturating_add(dy), glyph);
            }
        }
    }

    /// One row as text (test and debugging aid).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}
