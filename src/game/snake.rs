//! Snake state: body, heading and liveness.

use std::collections::VecDeque;

use rand::Rng;
use serde::Serialize;

use crate::game::{Grid, Heading, Position};

/// Stable identifier for a snake (its index in the world plus one).
pub type SnakeId = u8;

/// A 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure red.
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    /// Pure blue.
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    /// Purple.
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);
    /// Yellow, used for food.
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    /// Green.
    pub const GREEN: Rgb = Rgb::new(0, 200, 0);
    /// Orange.
    pub const ORANGE: Rgb = Rgb::new(255, 140, 0);
    /// Cyan.
    pub const CYAN: Rgb = Rgb::new(0, 200, 200);
    /// Pink.
    pub const PINK: Rgb = Rgb::new(255, 105, 180);
    /// Light gray.
    pub const SILVER: Rgb = Rgb::new(192, 192, 192);

    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Snake colors in assignment order. The first three are the classic trio.
pub const PALETTE: [Rgb; 8] = [
    Rgb::RED,
    Rgb::BLUE,
    Rgb::PURPLE,
    Rgb::GREEN,
    Rgb::ORANGE,
    Rgb::CYAN,
    Rgb::PINK,
    Rgb::SILVER,
];

/// A single autonomous snake.
#[derive(Debug, Clone)]
pub struct Snake {
    id: SnakeId,
    color: Rgb,
    /// Segments from head (front) to tail (back). Never empty.
    body: VecDeque<Position>,
    heading: Heading,
    alive: bool,
}

impl Snake {
    /// Create a one-segment snake.
    #[must_use]
    pub fn new(id: SnakeId, color: Rgb, head: Position, heading: Heading) -> Self {
        Self {
            id,
            color,
            body: VecDeque::from([head]),
            heading,
            alive: true,
        }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// Returns `None` if `body` is empty.
    #[must_use]
    pub fn with_body(id: SnakeId, color: Rgb, body: Vec<Position>, heading: Heading) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self {
            id,
            color,
            body: VecDeque::from(body),
            heading,
            alive: true,
        })
    }

    /// Place a new snake at a random cell inset by `margin` from the border,
    /// with a random heading.
    ///
    /// The margin shrinks on grids too small to honor it.
    pub fn spawn<R: Rng + ?Sized>(
        id: SnakeId,
        color: Rgb,
        grid: &Grid,
        margin: u16,
        rng: &mut R,
    ) -> Self {
        let x = inset_coordinate(grid.width(), margin, rng);
        let y = inset_coordinate(grid.height(), margin, rng);
        let heading = Heading::ALL[rng.random_range(0..Heading::ALL.len())];
        Self::new(id, color, Position::new(x, y), heading)
    }

    /// Identifier of this snake.
    #[must_use]
    pub const fn id(&self) -> SnakeId {
        self.id
    }

    /// Display color of this snake.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Current heading.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Whether the snake is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// The head segment.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Number of segments.
    #[must_use]
    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// Segments from head to tail.
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Segments behind the head.
    pub fn tail_segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().skip(1).copied()
    }

    /// Check whether any segment, head included, covers `pos`.
    #[must_use]
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Probe `pos` against this snake's body and every snake in `snakes`.
    ///
    /// Heads count. This runs on pre-move state during decisions.
    #[must_use]
    pub fn is_collision(&self, pos: Position, snakes: &[Snake]) -> bool {
        self.occupies(pos) || snakes.iter().any(|other| other.occupies(pos))
    }

    /// Adopt `heading` unless it is the exact reverse of the current one.
    ///
    /// Returns `true` if the heading was adopted.
    pub fn set_heading(&mut self, heading: Heading) -> bool {
        if heading == self.heading.opposite() {
            return false;
        }
        self.heading = heading;
        true
    }

    /// Move one step along the current heading.
    ///
    /// The new head is pushed before the tail is dropped; with `grow` the tail
    /// is kept. Dead snakes do not move. Returns the new head.
    pub fn advance(&mut self, grid: &Grid, grow: bool) -> Option<Position> {
        if !self.alive {
            return None;
        }
        let new_head = grid.step(self.head(), self.heading);
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
        Some(new_head)
    }

    /// Mark the snake dead. Terminal.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

/// Uniform coordinate in `[margin, dim - margin - 1]`.
fn inset_coordinate<R: Rng + ?Sized>(dim: u16, margin: u16, rng: &mut R) -> u16 {
    let margin = margin.min((dim - 1) / 2);
    rng.random_range(margin..dim - margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid() -> Grid {
        Grid::new(30, 30).unwrap()
    }

    #[test]
    fn test_spawn_respects_margin() {
        let grid = grid();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for i in 0..200 {
            let snake = Snake::spawn(1, Rgb::RED, &grid, 5, &mut rng);
            let head = snake.head();
            assert!((5..=24).contains(&head.x), "spawn {i}: x = {}", head.x);
            assert!((5..=24).contains(&head.y), "spawn {i}: y = {}", head.y);
            assert_eq!(snake.length(), 1);
            assert!(snake.is_alive());
        }
    }

    #[test]
    fn test_spawn_margin_shrinks_on_small_grid() {
        let grid = Grid::new(3, 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let head = Snake::spawn(1, Rgb::RED, &grid, 5, &mut rng).head();
            assert_eq!(head, Position::new(1, 0));
        }
    }

    #[test]
    fn test_spawn_headings_vary() {
        let grid = grid();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(Snake::spawn(1, Rgb::RED, &grid, 5, &mut rng).heading());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_with_body_rejects_empty() {
        assert!(Snake::with_body(1, Rgb::RED, Vec::new(), Heading::Up).is_none());
    }

    #[test]
    fn test_set_heading_rejects_reversal() {
        let mut snake = Snake::new(1, Rgb::RED, Position::new(5, 5), Heading::Right);
        assert!(!snake.set_heading(Heading::Left));
        assert_eq!(snake.heading(), Heading::Right);
        assert!(snake.set_heading(Heading::Up));
        assert_eq!(snake.heading(), Heading::Up);
        assert!(snake.set_heading(Heading::Up));
        assert!(!snake.set_heading(Heading::Down));
        assert_eq!(snake.heading(), Heading::Up);
    }

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let grid = grid();
        let mut snake = Snake::with_body(
            1,
            Rgb::RED,
            vec![Position::new(2, 1), Position::new(1, 1), Position::new(0, 1)],
            Heading::Right,
        )
        .unwrap();
        assert_eq!(snake.advance(&grid, false), Some(Position::new(3, 1)));
        let body: Vec<_> = snake.body().collect();
        assert_eq!(
            body,
            vec![Position::new(3, 1), Position::new(2, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_advance_with_growth_keeps_tail() {
        let grid = grid();
        let mut snake = Snake::new(1, Rgb::RED, Position::new(29, 0), Heading::Right);
        assert_eq!(snake.advance(&grid, true), Some(Position::new(0, 0)));
        assert_eq!(snake.length(), 2);
        assert_eq!(snake.tail_segments().collect::<Vec<_>>(), vec![Position::new(29, 0)]);
    }

    #[test]
    fn test_dead_snake_does_not_move() {
        let grid = grid();
        let mut snake = Snake::new(1, Rgb::RED, Position::new(4, 4), Heading::Down);
        snake.kill();
        assert_eq!(snake.advance(&grid, true), None);
        assert_eq!(snake.head(), Position::new(4, 4));
        assert_eq!(snake.length(), 1);
    }

    #[test]
    fn test_is_collision_includes_heads() {
        let me = Snake::new(1, Rgb::RED, Position::new(1, 1), Heading::Right);
        let other = Snake::with_body(
            2,
            Rgb::BLUE,
            vec![Position::new(3, 1), Position::new(3, 2)],
            Heading::Up,
        )
        .unwrap();
        let snakes = vec![me.clone(), other];
        assert!(me.is_collision(Position::new(1, 1), &snakes));
        assert!(me.is_collision(Position::new(3, 1), &snakes));
        assert!(me.is_collision(Position::new(3, 2), &snakes));
        assert!(!me.is_collision(Position::new(2, 1), &snakes));
    }
}
