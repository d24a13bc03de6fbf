use tactile_geometry::Point;

/// Direction a drag has to go in to be recognized.
///
/// `Horizontal` and `Vertical` accept either sign along their axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Rightwards,
    Leftwards,
    Downwards,
    Upwards,
    Horizontal,
    Vertical,
}

impl Direction {
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            Direction::Rightwards | Direction::Leftwards | Direction::Horizontal
        )
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    /// Whether only the axis matters, not the sign.
    #[inline]
    pub fn is_axis_agnostic(self) -> bool {
        matches!(self, Direction::Horizontal | Direction::Vertical)
    }

    /// Unit vector in local item coordinates (y grows downwards).
    pub fn local_vector(self) -> Point {
        match self {
            Direction::Upwards => Point::new(0.0, -1.0),
            Direction::Downwards | Direction::Vertical => Point::new(0.0, 1.0),
            Direction::Leftwards => Point::new(-1.0, 0.0),
            Direction::Rightwards | Direction::Horizontal => Point::new(1.0, 0.0),
        }
    }
}
