use rand::Rng;

use crate::present::{Sprite, Surface, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::snake::CELL_PX;
use crate::Coords;

const COLUMNS: i32 = SURFACE_WIDTH / CELL_PX;
const ROWS: i32 = SURFACE_HEIGHT / CELL_PX;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Apple {
    position: Coords,
}

impl Apple {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut apple = Apple { position: (0, 0) };
        apple.reseat(rng);
        apple
    }

    #[cfg(test)]
    pub fn at(position: Coords) -> Self {
        Apple { position }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    /// Moves to a uniformly random cell. The snake is not consulted, so the
    /// apple may land on its body.
    pub fn reseat<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let x = rng.gen_range(0..COLUMNS) * CELL_PX;
        let y = rng.gen_range(0..ROWS) * CELL_PX;
        self.position = (x, y);
    }

    pub fn render(&self, surface: &mut impl Surface, sprite: &Sprite) {
        surface.blit(sprite, self.position);
    }
}
