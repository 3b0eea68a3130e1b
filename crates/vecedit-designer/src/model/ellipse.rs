use super::{Bounds, Point, Stroke};

/// Ellipse inscribed in an axis-aligned box, in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct DesignEllipse {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: Stroke,
}

impl DesignEllipse {
    pub fn new(x: f64, y: f64, width: f64, height: f64, stroke: Stroke) -> Self {
        Self {
            x,
            y,
            width,
            height,
            stroke,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn update_geometry(&mut self, p1: Point, p2: Point) {
        self.x = p1.x.min(p2.x);
        self.y = p1.y.min(p2.y);
        self.width = (p2.x - p1.x).abs();
        self.height = (p2.y - p1.y).abs();
    }
}
