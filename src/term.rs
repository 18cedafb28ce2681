use std::io::{stdout, Stdout, Write};

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{cursor, execute, queue, terminal};
use log::warn;

use crate::error::GameError;
use crate::present::{Colour, Sprite, Surface, TextSprite, SURFACE_HEIGHT, SURFACE_WIDTH, TEXEL_HEIGHT, TEXEL_WIDTH};
use crate::{Coords, Px};

const CAPTION: &str = "Snake Game";

const COLUMNS: usize = (SURFACE_WIDTH / TEXEL_WIDTH) as usize;
const ROWS: usize = (SURFACE_HEIGHT / TEXEL_HEIGHT) as usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Texel {
    ch: char,
    fg: Colour,
    bg: Colour,
    bold: bool,
    italic: bool,
}

impl Texel {
    fn blank(bg: Colour) -> Self {
        Texel { ch: ' ', fg: bg, bg, bold: false, italic: false }
    }
}

/// Off-screen copy of the surface at texel resolution. Drawing outside it is clipped.
#[derive(Clone, Debug)]
struct Frame {
    texels: Vec<Texel>,
}

impl Frame {
    fn new() -> Self {
        Frame { texels: vec![Texel::blank(Colour(0, 0, 0)); COLUMNS * ROWS] }
    }

    fn get_mut(&mut self, column: Px, row: Px) -> Option<&mut Texel> {
        if column < 0 || row < 0 || column as usize >= COLUMNS || row as usize >= ROWS {
            return None;
        }
        self.texels.get_mut(row as usize * COLUMNS + column as usize)
    }

    fn fill(&mut self, colour: Colour) {
        self.texels.iter_mut().for_each(|t| *t = Texel::blank(colour));
    }

    fn blit(&mut self, sprite: &Sprite, (x, y): Coords) {
        let (column0, row0) = to_texel(x, y);
        let (columns, rows) = sprite.size();

        for row in 0..rows {
            for column in 0..columns {
                if let Some(t) = self.get_mut(column0 + column as Px, row0 + row as Px) {
                    *t = Texel::blank(sprite.texel(column, row));
                }
            }
        }
    }

    /// Glyphs take the text colour and style; the background shows through.
    fn blit_text(&mut self, text: &TextSprite, (x, y): Coords) {
        let (column0, row) = to_texel(x, y);

        for (i, ch) in text.text.chars().enumerate() {
            if let Some(t) = self.get_mut(column0 + i as Px, row) {
                t.ch = ch;
                t.fg = text.colour;
                t.bold = text.font.bold;
                t.italic = text.font.italic;
            }
        }
    }

    fn row(&self, row: usize) -> &[Texel] {
        &self.texels[row * COLUMNS..(row + 1) * COLUMNS]
    }
}

fn to_texel(x: Px, y: Px) -> (Px, Px) {
    (x.div_euclid(TEXEL_WIDTH), y.div_euclid(TEXEL_HEIGHT))
}

fn color(c: Colour) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// The terminal as a drawing surface. Holding one keeps the terminal in raw
/// mode on the alternate screen; dropping it puts everything back.
pub struct TermCanvas {
    stdout: Stdout,
    frame: Frame,
}

impl TermCanvas {
    pub fn new() -> Result<Self, GameError> {
        let (width, height) = terminal::size()?;
        if (width as usize) < COLUMNS || (height as usize) < ROWS {
            warn!("Terminal is {}x{}, the playfield needs {}x{} and will be clipped", width, height, COLUMNS, ROWS);
        }

        let mut stdout = stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, SetTitle(CAPTION), cursor::Hide, cursor::DisableBlinking)?;

        Ok(TermCanvas { stdout, frame: Frame::new() })
    }
}

impl Surface for TermCanvas {
    fn fill(&mut self, colour: Colour) {
        self.frame.fill(colour);
    }

    fn blit(&mut self, sprite: &Sprite, pos: Coords) {
        self.frame.blit(sprite, pos);
    }

    fn blit_text(&mut self, text: &TextSprite, pos: Coords) {
        self.frame.blit_text(text, pos);
    }

    fn flush(&mut self) -> Result<(), GameError> {
        for row in 0..ROWS {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;

            let mut last: Option<Texel> = None;
            for &t in self.frame.row(row) {
                // Only emit the escape codes that differ from the previous texel
                let style_changed = last.map_or(true, |l| (l.bold, l.italic) != (t.bold, t.italic));
                if style_changed {
                    queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                    if t.bold {
                        queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                    }
                    if t.italic {
                        queue!(self.stdout, SetAttribute(Attribute::Italic))?;
                    }
                }
                if style_changed || last.map_or(true, |l| l.bg != t.bg) {
                    queue!(self.stdout, SetBackgroundColor(color(t.bg)))?;
                }
                if style_changed || last.map_or(true, |l| l.fg != t.fg) {
                    queue!(self.stdout, SetForegroundColor(color(t.fg)))?;
                }
                queue!(self.stdout, Print(t.ch))?;
                last = Some(t);
            }

            queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermCanvas {
    fn drop(&mut self) {
        // Nothing useful can be done if restoring fails
        let _ = execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
