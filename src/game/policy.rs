//! Greedy food-seeking heading choice with a one-step safety check.
//!
//! The policy looks exactly one cell ahead:
//! 1. Prefer the horizontal and/or vertical heading that reduces the raw
//!    (unwrapped) coordinate difference to the food, picking one at random.
//! 2. With no preference, keep the current heading.
//! 3. If the chosen cell is occupied, try all four headings in random order
//!    and take the first free one; if none is free, keep the original choice.
//!
//! The result is only a request: `Snake::set_heading` may still reject it
//! as a reversal.

use std::cmp::Ordering;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::game::{Grid, Heading, Occupancy, Position, Snake};

/// Headings that move `head` closer to `food` along each axis.
///
/// Returns at most one horizontal heading followed by at most one vertical
/// one. Wraparound is ignored.
#[must_use]
pub fn preferred_headings(head: Position, food: Position) -> Vec<Heading> {
    let dx = i32::from(food.x) - i32::from(head.x);
    let dy = i32::from(food.y) - i32::from(head.y);
    let mut preferred = Vec::with_capacity(2);

    match dx.cmp(&0) {
        Ordering::Greater => preferred.push(Heading::Right),
        Ordering::Less => preferred.push(Heading::Left),
        Ordering::Equal => {}
    }
    match dy.cmp(&0) {
        Ordering::Greater => preferred.push(Heading::Down),
        Ordering::Less => preferred.push(Heading::Up),
        Ordering::Equal => {}
    }

    preferred
}

/// Choose the heading `snake` should request for its next move.
///
/// `occupied` is the pre-move snapshot of every snake's body, this snake
/// included.
pub fn decide_heading<R: Rng + ?Sized>(
    snake: &Snake,
    food: Position,
    occupied: &Occupancy,
    grid: &Grid,
    rng: &mut R,
) -> Heading {
    let head = snake.head();
    let chosen = preferred_headings(head, food)
        .choose(rng)
        .copied()
        .unwrap_or_else(|| snake.heading());

    if !occupied.contains(grid.step(head, chosen)) {
        return chosen;
    }

    let mut alternatives = Heading::ALL;
    alternatives.shuffle(rng);
    alternatives
        .into_iter()
        .find(|&alt| !occupied.contains(grid.step(head, alt)))
        .unwrap_or(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Rgb;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid() -> Grid {
        Grid::new(10, 10).unwrap()
    }

    #[test]
    fn test_preferred_headings() {
        let head = Position::new(5, 5);
        assert_eq!(
            preferred_headings(head, Position::new(8, 1)),
            vec![Heading::Right, Heading::Up]
        );
        assert_eq!(
            preferred_headings(head, Position::new(2, 9)),
            vec![Heading::Left, Heading::Down]
        );
        assert_eq!(preferred_headings(head, Position::new(5, 0)), vec![Heading::Up]);
        assert_eq!(preferred_headings(head, Position::new(9, 5)), vec![Heading::Right]);
        assert!(preferred_headings(head, head).is_empty());
    }

    #[test]
    fn test_preferred_headings_ignore_wraparound() {
        // Food one step away across the edge still pulls the long way round.
        assert_eq!(
            preferred_headings(Position::new(9, 4), Position::new(0, 4)),
            vec![Heading::Left]
        );
    }

    #[test]
    fn test_no_preference_keeps_heading() {
        let snake = Snake::new(1, Rgb::RED, Position::new(2, 2), Heading::Down);
        let occupied = Occupancy::from_snakes(std::slice::from_ref(&snake));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let heading = decide_heading(&snake, Position::new(2, 2), &occupied, &grid(), &mut rng);
        assert_eq!(heading, Heading::Down);
    }

    #[test]
    fn test_diagonal_food_picks_one_axis() {
        let snake = Snake::new(1, Rgb::RED, Position::new(2, 2), Heading::Up);
        let occupied = Occupancy::from_snakes(std::slice::from_ref(&snake));
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let heading =
                decide_heading(&snake, Position::new(6, 7), &occupied, &grid(), &mut rng);
            assert!(matches!(heading, Heading::Right | Heading::Down));
            seen.insert(heading);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_blocked_choice_takes_only_free_neighbor() {
        let me = Snake::new(1, Rgb::RED, Position::new(5, 5), Heading::Right);
        // Walls on right, up and down; only left stays free.
        let wall = Snake::with_body(
            2,
            Rgb::BLUE,
            vec![Position::new(6, 5), Position::new(5, 4), Position::new(5, 6)],
            Heading::Up,
        )
        .unwrap();
        let snakes = [me.clone(), wall];
        let occupied = Occupancy::from_snakes(&snakes);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let heading =
                decide_heading(&me, Position::new(8, 5), &occupied, &grid(), &mut rng);
            assert_eq!(heading, Heading::Left);
        }
    }

    #[test]
    fn test_blocked_choice_spreads_over_free_neighbors() {
        let me = Snake::new(1, Rgb::RED, Position::new(5, 5), Heading::Up);
        // Right and up are walled off; left and down stay free.
        let wall = Snake::with_body(
            2,
            Rgb::BLUE,
            vec![Position::new(6, 5), Position::new(5, 4)],
            Heading::Up,
        )
        .unwrap();
        let snakes = [me.clone(), wall];
        let occupied = Occupancy::from_snakes(&snakes);
        let mut seen = std::collections::HashSet::new();
        for seed in 0..40 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let heading =
                decide_heading(&me, Position::new(8, 5), &occupied, &grid(), &mut rng);
            assert!(matches!(heading, Heading::Left | Heading::Down));
            seen.insert(heading);
        }
        assert_eq!(seen, [Heading::Left, Heading::Down].into_iter().collect());
    }

    #[test]
    fn test_fully_blocked_keeps_original_choice() {
        let me = Snake::new(1, Rgb::RED, Position::new(5, 5), Heading::Up);
        let wall = Snake::with_body(
            2,
            Rgb::BLUE,
            vec![
                Position::new(6, 5),
                Position::new(5, 4),
                Position::new(5, 6),
                Position::new(4, 5),
            ],
            Heading::Up,
        )
        .unwrap();
        let snakes = [me.clone(), wall];
        let occupied = Occupancy::from_snakes(&snakes);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let heading = decide_heading(&me, Position::new(9, 5), &occupied, &grid(), &mut rng);
        assert_eq!(heading, Heading::Right);
    }

    #[test]
    fn test_own_tail_is_an_obstacle() {
        // Body trails off to the left, where the food is.
        let me = Snake::with_body(
            1,
            Rgb::RED,
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(4, 6)],
            Heading::Right,
        )
        .unwrap();
        let occupied = Occupancy::from_snakes(std::slice::from_ref(&me));
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let heading = decide_heading(&me, Position::new(0, 5), &occupied, &grid(), &mut rng);
            assert_ne!(heading, Heading::Left);
        }
    }
}
