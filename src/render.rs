//! Grid-to-screen mapping for renderers.
//!
//! Renderers never touch world internals: they ask for a [`scene`], a flat
//! draw list of colored rectangles, and paint it in order.

use crate::game::{Position, Rgb, World};

/// An axis-aligned rectangle in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// Size of one grid cell on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    /// Horizontal extent of a cell.
    pub width: u32,
    /// Vertical extent of a cell.
    pub height: u32,
}

impl CellSize {
    /// Square cells of the given side.
    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Map a grid cell to its screen rectangle.
#[must_use]
pub fn cell_rect(pos: Position, size: CellSize) -> ScreenRect {
    ScreenRect {
        x: u32::from(pos.x) * size.width,
        y: u32::from(pos.y) * size.height,
        width: size.width,
        height: size.height,
    }
}

/// One filled rectangle to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    /// Grid cell this sprite covers.
    pub cell: Position,
    /// Where to draw it.
    pub rect: ScreenRect,
    /// Fill color.
    pub color: Rgb,
}

/// Draw list for a world: the food first, then every living snake's body.
///
/// Dead snakes are not drawn.
#[must_use]
pub fn scene(world: &World, size: CellSize) -> Vec<Sprite> {
    let food = world.food().position();
    let mut sprites = vec![Sprite {
        cell: food,
        rect: cell_rect(food, size),
        color: Rgb::YELLOW,
    }];

    for snake in world.alive_snakes() {
        sprites.extend(snake.body().map(|cell| Sprite {
            cell,
            rect: cell_rect(cell, size),
            color: snake.color(),
        }));
    }

    sprites
}
