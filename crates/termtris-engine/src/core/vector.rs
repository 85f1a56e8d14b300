use std::ops::Add;

/// A 2D integer vector used both as a grid coordinate and as a translation.
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns)
/// - Y increases downward (rows), and may be negative above the visible top
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0, 0);
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);
    pub const DOWN: Self = Self::new(0, 1);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition_is_component_wise() {
        let v = Vector::new(3, -1) + Vector::new(-1, 2);
        assert_eq!(v, Vector::new(2, 1));
        assert_eq!(Vector::new(4, 0) + Vector::ZERO, Vector::new(4, 0));
    }

    #[test]
    fn test_unit_deltas() {
        let origin = Vector::new(5, 5);
        assert_eq!(origin + Vector::LEFT, Vector::new(4, 5));
        assert_eq!(origin + Vector::RIGHT, Vector::new(6, 5));
        assert_eq!(origin + Vector::DOWN, Vector::new(5, 6));
    }
}
