//! Flow space.
//!
//! Placement engines work in a direction-neutral space where `x` runs along
//! the primary (flow) axis and `y` across it. For top-to-bottom layouts the two
//! axes are swapped when converting to and from stage coordinates; the swap is
//! its own inverse, so the same methods convert both ways.

use stagehand_core::{
    geometry::{Bounds, Point, Size},
    options::Direction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flow {
    vertical: bool,
}

impl Flow {
    pub fn new(direction: Direction) -> Self {
        Self {
            vertical: direction.is_vertical(),
        }
    }

    pub fn is_vertical(self) -> bool {
        self.vertical
    }

    pub fn point(self, point: Point) -> Point {
        if self.vertical {
            Point::new(point.y(), point.x())
        } else {
            point
        }
    }

    pub fn size(self, size: Size) -> Size {
        if self.vertical {
            Size::new(size.height(), size.width())
        } else {
            size
        }
    }

    pub fn bounds(self, bounds: Bounds) -> Bounds {
        if self.vertical {
            Bounds::new_from_top_left(self.point(bounds.min_point()), self.size(bounds.to_size()))
        } else {
            bounds
        }
    }
}
