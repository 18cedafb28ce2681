//! Drawing primitives shared by the entities and the terminal backend.
//!
//! Positions are surface pixels. A backend samples everything at texel
//! resolution: one texel is a `TEXEL_WIDTH` x `TEXEL_HEIGHT` pixel patch, which
//! is what a single terminal character covers.

use std::path::Path;

use image::{ImageReader, RgbImage};
use log::info;

use crate::error::GameError;
use crate::{Coords, Px};

pub const SURFACE_WIDTH: Px = 1000;
pub const SURFACE_HEIGHT: Px = 800;

pub const TEXEL_WIDTH: Px = 20;
pub const TEXEL_HEIGHT: Px = 40;

pub const BLOCK_IMAGE: &str = "Resources/Images/block.jpg";
pub const APPLE_IMAGE: &str = "Resources/Images/apple.jpg";
pub const BACKGROUND_IMAGE: &str = "Resources/Images/background.jpg";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Colour(pub u8, pub u8, pub u8);

pub const BACKGROUND_COLOUR: Colour = Colour(110, 110, 5);
pub const MAIN_FONT_COLOUR: Colour = Colour(237, 237, 237);
pub const SECONDARY_FONT_COLOUR: Colour = Colour(156, 156, 156);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Font {
    pub family: &'static str,
    pub size: u16,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub const fn new(family: &'static str, size: u16) -> Self {
        Font { family, size, bold: false, italic: false }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn render(&self, text: &str, colour: Colour) -> TextSprite {
        TextSprite { text: text.to_owned(), font: *self, colour }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSprite {
    pub text: String,
    pub font: Font,
    pub colour: Colour,
}

/// An image sampled down to texels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    name: String,
    columns: usize,
    rows: usize,
    texels: Vec<Colour>,
}

impl Sprite {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let image = ImageReader::open(path)
            .map_err(|e| GameError::asset(path, e))?
            .with_guessed_format()
            .map_err(|e| GameError::asset(path, e))?
            .decode()
            .map_err(|e| GameError::asset(path, e))?
            .to_rgb8();

        let name = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let sprite = Sprite::from_image(name, &image);
        info!("Loaded {} from {} ({}x{} texels)", sprite.name(), path.display(), sprite.columns, sprite.rows);
        Ok(sprite)
    }

    /// Each texel takes the average colour of the pixel patch it covers.
    pub fn from_image(name: impl Into<String>, image: &RgbImage) -> Self {
        let (tw, th) = (TEXEL_WIDTH as u32, TEXEL_HEIGHT as u32);
        let columns = ceil_div(image.width(), tw).max(1);
        let rows = ceil_div(image.height(), th).max(1);
        let mut texels = Vec::with_capacity((columns * rows) as usize);

        for row in 0..rows {
            for column in 0..columns {
                let xs = column * tw..((column + 1) * tw).min(image.width());
                let ys = row * th..((row + 1) * th).min(image.height());
                let mut sum = [0u64; 3];
                let mut count = 0u64;

                for y in ys {
                    for x in xs.clone() {
                        let p = image.get_pixel(x, y);
                        for c in 0..3 {
                            sum[c] += p[c] as u64;
                        }
                        count += 1;
                    }
                }

                let avg = |c: usize| if count == 0 { 0 } else { (sum[c] / count) as u8 };
                texels.push(Colour(avg(0), avg(1), avg(2)));
            }
        }

        Sprite { name: name.into(), columns: columns as usize, rows: rows as usize, texels }
    }

    pub fn solid(name: impl Into<String>, width: Px, height: Px, colour: Colour) -> Self {
        let columns = ceil_div(width as u32, TEXEL_WIDTH as u32).max(1) as usize;
        let rows = ceil_div(height as u32, TEXEL_HEIGHT as u32).max(1) as usize;
        Sprite { name: name.into(), columns, rows, texels: vec![colour; columns * rows] }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn texel(&self, column: usize, row: usize) -> Colour {
        self.texels[row * self.columns + column]
    }
}

fn ceil_div(a: u32, b: u32) -> u32 {
    (a + b - 1) / b
}

/// The images the game draws, loaded once at start-up.
#[derive(Clone, Debug)]
pub struct Sprites {
    pub block: Sprite,
    pub apple: Sprite,
    pub background: Sprite,
}

impl Sprites {
    pub fn load() -> Result<Self, GameError> {
        Ok(Sprites {
            block: Sprite::load(BLOCK_IMAGE)?,
            apple: Sprite::load(APPLE_IMAGE)?,
            background: Sprite::load(BACKGROUND_IMAGE)?,
        })
    }
}

pub trait Surface {
    fn fill(&mut self, colour: Colour);
    fn blit(&mut self, sprite: &Sprite, pos: Coords);
    fn blit_text(&mut self, text: &TextSprite, pos: Coords);
    /// Presents everything drawn since the previous flush.
    fn flush(&mut self) -> Result<(), GameError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use pretty_assertions::assert_eq;

    #[test]
    fn cell_sprite_is_two_texels_wide() {
        let image = RgbImage::from_pixel(40, 40, Rgb([10, 20, 30]));
        let sprite = Sprite::from_image("block", &image);

        assert_eq!(sprite.size(), (2, 1));
        assert_eq!(sprite.texel(0, 0), Colour(10, 20, 30));
        assert_eq!(sprite.texel(1, 0), Colour(10, 20, 30));
    }

    #[test]
    fn background_covers_the_surface() {
        let image = RgbImage::from_pixel(SURFACE_WIDTH as u32, SURFACE_HEIGHT as u32, Rgb([1, 2, 3]));
        let sprite = Sprite::from_image("background", &image);
        assert_eq!(sprite.size(), (50, 20));
    }

    #[test]
    fn left_and_right_halves_keep_their_colours() {
        let image = RgbImage::from_fn(40, 40, |x, _| if x < 20 { Rgb([200, 0, 0]) } else { Rgb([0, 0, 200]) });
        let sprite = Sprite::from_image("split", &image);

        let Colour(r, _, b) = sprite.texel(0, 0);
        assert!(r > b);
        let Colour(r, _, b) = sprite.texel(1, 0);
        assert!(b > r);
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let err = Sprite::load("Resources/Images/does-not-exist.jpg").unwrap_err();
        assert!(matches!(err, GameError::AssetMissing { .. }));
    }

    #[test]
    fn fonts_carry_style() {
        let text = Font::new("sans", 30).bold().render("Score: 3", MAIN_FONT_COLOUR);
        assert_eq!(text.text, "Score: 3");
        assert!(text.font.bold);
        assert!(!text.font.italic);
        assert_eq!(text.font.size, 30);
    }
}
