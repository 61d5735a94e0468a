use serde::{Deserialize, Serialize};

/// Integer 2D pair used for both tile coordinates and sizes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Loc {
    pub x: i32,
    pub y: i32,
}

impl Loc {
    pub const ORIGIN: Loc = Loc { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle: a room's drawn tile area or a grid cell span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Loc,
    pub size: Loc,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { origin: Loc::new(x, y), size: Loc::new(width, height) }
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// First column right of the rectangle.
    pub fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    /// First row below the rectangle.
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    pub fn contains(&self, loc: Loc) -> bool {
        loc.x >= self.origin.x
            && loc.x < self.right()
            && loc.y >= self.origin.y
            && loc.y < self.bottom()
    }

    /// Tile locations inside the rectangle in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Loc> + use<> {
        let rect = *self;
        (rect.origin.y..rect.bottom())
            .flat_map(move |y| (rect.origin.x..rect.right()).map(move |x| Loc::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_of_origin_exclusive_of_far_edges() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(rect.contains(Loc::new(2, 3)));
        assert!(rect.contains(Loc::new(5, 4)));
        assert!(!rect.contains(Loc::new(6, 3)));
        assert!(!rect.contains(Loc::new(2, 5)));
    }

    #[test]
    fn tiles_iterate_row_major_over_the_full_area() {
        let rect = Rect::new(1, 1, 2, 2);
        let tiles: Vec<Loc> = rect.tiles().collect();
        assert_eq!(tiles, vec![Loc::new(1, 1), Loc::new(2, 1), Loc::new(1, 2), Loc::new(2, 2)]);
    }
}
