//! Board cursor for keyboard play.

use crate::types::{Direction, Position};

/// A cell selector clamped to the grid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
    width: u8,
    height: u8,
}

impl Cursor {
    /// Cursor at `start`, clamped into a `width` x `height` grid
    pub fn new(start: Position, width: u8, height: u8) -> Self {
        let mut cursor = Self {
            pos: start,
            width: width.max(1),
            height: height.max(1),
        };
        cursor.set(start);
        cursor
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Step one cell; stops at the edges
    pub fn step(&mut self, dir: Direction) {
        let next = self.pos.step(dir);
        self.set(next);
    }

    /// Jump to a cell (mouse click), clamped into the grid
    pub fn set(&mut self, pos: Position) {
        let max_x = (self.width - 1) as i8;
        let max_y = (self.height - 1) as i8;
        self.pos = Position::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_at_edges() {
        let mut cursor = Cursor::new(Position::new(0, 0), 7, 10);
        cursor.step(Direction::Left);
        cursor.step(Direction::Top);
        assert_eq!(cursor.position(), Position::new(0, 0));

        for _ in 0..20 {
            cursor.step(Direction::Right);
            cursor.step(Direction::Bottom);
        }
        assert_eq!(cursor.position(), Position::new(6, 9));
    }

    #[test]
    fn test_cursor_new_clamps_start() {
        let cursor = Cursor::new(Position::new(40, -3), 7, 10);
        assert_eq!(cursor.position(), Position::new(6, 0));
    }
}
