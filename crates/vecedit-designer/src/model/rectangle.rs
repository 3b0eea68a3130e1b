use super::{Bounds, Point, Stroke};

/// Axis-aligned rectangle in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct DesignRectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: Stroke,
}

impl DesignRectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64, stroke: Stroke) -> Self {
        Self {
            x,
            y,
            width,
            height,
            stroke,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Span the box defined by two corners; the corners may come in any order.
    pub fn update_geometry(&mut self, p1: Point, p2: Point) {
        self.x = p1.x.min(p2.x);
        self.y = p1.y.min(p2.y);
        self.width = (p2.x - p1.x).abs();
        self.height = (p2.y - p1.y).abs();
    }
}
