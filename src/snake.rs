use crate::present::{Sprite, Surface};
use crate::{Coords, Px};
use Direction::*;

/// Edge length of one playfield cell, in pixels. Every entity position is a multiple of it.
pub const CELL_PX: Px = 40;

const START: Coords = (CELL_PX, CELL_PX);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Pixel offset of one step in this direction.
    pub fn offset(self) -> Coords {
        match self {
            Up => (0, -CELL_PX),
            Down => (0, CELL_PX),
            Left => (-CELL_PX, 0),
            Right => (CELL_PX, 0),
        }
    }
}

/// Head first: `body[0]` is the head, the last cell is the tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
}

impl Snake {
    pub fn new() -> Self {
        Snake { body: vec![START], direction: Down }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body, direction }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Every cell takes the place of the one ahead of it, then the head moves one cell on.
    pub fn step(&mut self) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = self.direction.offset();
        let head = &mut self.body[0];
        *head = (head.0 + dx, head.1 + dy);
    }

    /// The new cell starts as a copy of the tail; the next `step` moves it into place.
    pub fn grow(&mut self) {
        let tail = *self.body.last().unwrap_or(&START);
        self.body.push(tail);
    }

    /// Any direction is accepted, including a reversal onto the body.
    pub fn set_direction(&mut self, new_direction: Direction) {
        self.direction = new_direction;
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body[1..].iter().any(|&cell| is_colliding(head, cell))
    }

    pub fn render(&self, surface: &mut impl Surface, block: &Sprite) {
        for &cell in &self.body {
            surface.blit(block, cell);
        }
    }
}

/// True when `point` lies in the cell whose top-left corner is `cell`.
pub fn is_colliding(point: Coords, cell: Coords) -> bool {
    (cell.0..cell.0 + CELL_PX).contains(&point.0) && (cell.1..cell.1 + CELL_PX).contains(&point.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_as_one_cell_facing_down() {
        let snake = Snake::new();
        assert_eq!(snake.body(), &[(40, 40)]);
        assert_eq!(snake.direction(), Down);
    }

    #[test]
    fn single_cell_step_moves_only_the_head() {
        let mut snake = Snake::new();
        snake.step();
        assert_eq!(snake.body(), &[(40, 80)]);
    }

    #[test]
    fn step_shifts_body_and_advances_head() {
        let mut snake = Snake::from_body(vec![(80, 40), (40, 40), (0, 40)], Right);
        let before = snake.body().to_vec();
        snake.step();

        assert_eq!(snake.head(), (before[0].0 + CELL_PX, before[0].1));
        assert_eq!(&snake.body()[1..], &before[..2]);
    }

    #[test]
    fn every_direction_moves_one_cell() {
        for (dir, expected) in [(Up, (40, 0)), (Down, (40, 80)), (Left, (0, 40)), (Right, (80, 40))] {
            let mut snake = Snake::new();
            snake.set_direction(dir);
            snake.step();
            assert_eq!(snake.head(), expected, "{:?}", dir);
        }
    }

    #[test]
    fn grown_cell_lands_on_previous_tail() {
        let mut snake = Snake::from_body(vec![(40, 80), (40, 40)], Down);
        snake.grow();
        assert_eq!(snake.len(), 3);

        snake.step();
        assert_eq!(snake.body(), &[(40, 120), (40, 80), (40, 40)]);
    }

    #[test]
    fn single_cell_snake_grows_without_biting() {
        let mut snake = Snake::new();
        snake.step();
        assert!(!snake.bites_itself());

        snake.grow();
        snake.step();
        assert_eq!(snake.body(), &[(40, 120), (40, 80)]);
        assert!(!snake.bites_itself());
    }

    #[test]
    fn reversal_is_not_filtered() {
        let mut snake = Snake::from_body(vec![(40, 80), (40, 40), (40, 0)], Down);
        snake.set_direction(Up);
        assert_eq!(snake.direction(), Up);

        snake.step();
        assert!(snake.bites_itself());
    }

    #[test]
    fn leaves_the_surface_without_dying() {
        let mut snake = Snake::new();
        snake.set_direction(Left);
        snake.step();
        snake.step();
        assert_eq!(snake.head(), (-40, 40));
        assert!(!snake.bites_itself());
    }

    #[test]
    fn collision_box_is_half_open() {
        assert!(is_colliding((40, 40), (40, 40)));
        assert!(is_colliding((79, 79), (40, 40)));
        assert!(!is_colliding((80, 40), (40, 40)));
        assert!(!is_colliding((40, 80), (40, 40)));
        assert!(!is_colliding((39, 40), (40, 40)));
    }
}
