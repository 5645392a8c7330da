/// One board coordinate. Signed so that a step off the edge is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, c: Cell) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let b = Board::new(20, 15);
        assert!(b.contains(Cell::new(0, 0)));
        assert!(b.contains(Cell::new(19, 14)));
        assert!(!b.contains(Cell::new(20, 0)));
        assert!(!b.contains(Cell::new(0, 15)));
        assert!(!b.contains(Cell::new(-1, 3)));
        assert!(!b.contains(Cell::new(3, -1)));
    }

    #[test]
    fn center_of_default_board() {
        assert_eq!(Board::new(20, 15).center(), Cell::new(10, 7));
    }
}
