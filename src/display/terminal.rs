//! Terminal rasterizer.
//!
//! The 800×600 field is downsampled onto the terminal: every cell shows two
//! stacked "dots" with the upper-half block `▀` (foreground = upper dot,
//! background = lower dot).  Text goes into a separate per-cell overlay that
//! is drawn on top and cleared after each `present`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    QueueableCommand,
};

use super::{Canvas, Font, FontStyle, Rgb};
use crate::entities::{HEIGHT, WIDTH};
use crate::error::{GameError, Result};

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 15;

const HALF_BLOCK: char = '▀';

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    color: Rgb,
    bold: bool,
}

pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    /// `cols × 2·rows` dots, row-major.
    dots: Vec<Rgb>,
    /// `cols × rows` text cells, row-major.
    text: Vec<Option<Glyph>>,
    color: Rgb,
    font: Font,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16) -> Result<Self> {
        check_size(cols, rows)?;
        let mut canvas = TerminalCanvas {
            cols,
            rows,
            dots: Vec::new(),
            text: Vec::new(),
            color: Rgb::WHITE,
            font: Font::HUD,
        };
        canvas.allocate();
        Ok(canvas)
    }

    /// Adopt a new terminal size.  On failure the old size is kept.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        check_size(cols, rows)?;
        self.cols = cols;
        self.rows = rows;
        self.allocate();
        Ok(())
    }

    fn allocate(&mut self) {
        let cells = self.cols as usize * self.rows as usize;
        self.dots = vec![Rgb::BLACK; cells * 2];
        self.text = vec![None; cells];
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn dot_cols(&self) -> i32 {
        self.cols as i32
    }

    fn dot_rows(&self) -> i32 {
        self.rows as i32 * 2
    }

    /// Colour of the dot at dot coordinates `(dx, dy)`.
    pub fn dot(&self, dx: usize, dy: usize) -> Rgb {
        self.dots[dy * self.cols as usize + dx]
    }

    /// Text character at cell `(col, row)`, if any was drawn this frame.
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        self.text[row * self.cols as usize + col].map(|g| g.ch)
    }

    /// Text of one cell row, with blanks where nothing was drawn.
    pub fn text_row(&self, row: usize) -> String {
        let start = row * self.cols as usize;
        self.text[start..start + self.cols as usize]
            .iter()
            .map(|g| g.map_or(' ', |g| g.ch))
            .collect()
    }

    /// Pixel x → dot column, rounding down.
    fn dot_x(&self, px: i32) -> i32 {
        (px * self.dot_cols()).div_euclid(WIDTH)
    }

    /// Pixel y → dot row, rounding down.
    fn dot_y(&self, py: i32) -> i32 {
        (py * self.dot_rows()).div_euclid(HEIGHT)
    }

    /// Pixel span `[p, p + len)` → dot span, covering every touched dot.
    fn dot_span(p: i32, len: i32, dots: i32, extent: i32) -> (i32, i32) {
        let lo = (p * dots).div_euclid(extent);
        let hi = ((p + len) * dots + extent - 1).div_euclid(extent);
        (lo.clamp(0, dots), hi.clamp(0, dots))
    }

    fn put_dot(&mut self, dx: i32, dy: i32) {
        if (0..self.dot_cols()).contains(&dx) && (0..self.dot_rows()).contains(&dy) {
            let i = dy as usize * self.cols as usize + dx as usize;
            self.dots[i] = self.color;
        }
    }

    /// Write the frame to `out` and flush.  The text overlay is consumed.
    pub fn present<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let cols = self.cols as usize;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        let mut bold = false;

        for row in 0..self.rows as usize {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..cols {
                let upper = self.dots[2 * row * cols + col];
                let lower = self.dots[(2 * row + 1) * cols + col];

                let (ch, want_fg, want_bg, want_bold) = match self.text[row * cols + col] {
                    Some(g) => (g.ch, g.color, Rgb::BLACK, g.bold),
                    None => (HALF_BLOCK, upper, lower, false),
                };

                if fg != Some(want_fg) {
                    out.queue(style::SetForegroundColor(want_fg.into()))?;
                    fg = Some(want_fg);
                }
                if bg != Some(want_bg) {
                    out.queue(style::SetBackgroundColor(want_bg.into()))?;
                    bg = Some(want_bg);
                }
                if bold != want_bold {
                    let attr = if want_bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    out.queue(style::SetAttribute(attr))?;
                    bold = want_bold;
                }
                out.queue(Print(ch))?;
            }
        }

        out.queue(style::SetAttribute(Attribute::Reset))?;
        out.queue(style::ResetColor)?;
        out.flush()?;

        self.text.iter_mut().for_each(|g| *g = None);
        Ok(())
    }
}

fn check_size(cols: u16, rows: u16) -> Result<()> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    Ok(())
}

// ── Canvas ────────────────────────────────────────────────────────────────────

impl Canvas for TerminalCanvas {
    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x0, x1) = Self::dot_span(x, w, self.dot_cols(), WIDTH);
        let (y0, y1) = Self::dot_span(y, h, self.dot_rows(), HEIGHT);
        for dy in y0..y1 {
            for dx in x0..x1 {
                self.put_dot(dx, dy);
            }
        }
    }

    fn fill_oval(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x0, x1) = Self::dot_span(x, w, self.dot_cols(), WIDTH);
        let (y0, y1) = Self::dot_span(y, h, self.dot_rows(), HEIGHT);

        let cx = x as f32 + w as f32 / 2.0;
        let cy = y as f32 + h as f32 / 2.0;
        let rx = w as f32 / 2.0;
        let ry = h as f32 / 2.0;
        let dot_w = WIDTH as f32 / self.dot_cols() as f32;
        let dot_h = HEIGHT as f32 / self.dot_rows() as f32;

        let mut filled = false;
        for dy in y0..y1 {
            for dx in x0..x1 {
                let px = (dx as f32 + 0.5) * dot_w;
                let py = (dy as f32 + 0.5) * dot_h;
                let nx = (px - cx) / rx;
                let ny = (py - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.put_dot(dx, dy);
                    filled = true;
                }
            }
        }

        // Smaller than a dot: still mark the dot under the centre.
        if !filled {
            let (dx, dy) = (self.dot_x(cx as i32), self.dot_y(cy as i32));
            self.put_dot(dx, dy);
        }
    }

    fn string_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * WIDTH / self.dot_cols()
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        // Glyphs sit above the baseline; use the middle of the em box.
        let row = ((y - self.font.size / 2) * self.rows as i32).div_euclid(HEIGHT);
        if !(0..self.rows as i32).contains(&row) {
            return;
        }
        let start_col = self.dot_x(x);
        let glyph_color = self.color;
        let bold = self.font.style == FontStyle::Bold;
        let cols = self.cols as i32;

        for (i, ch) in text.chars().enumerate() {
            let col = start_col + i as i32;
            if col < 0 {
                continue;
            }
            if col >= cols {
                break;
            }
            self.text[(row * cols + col) as usize] = Some(Glyph {
                ch,
                color: glyph_color,
                bold,
            });
        }
    }
}
