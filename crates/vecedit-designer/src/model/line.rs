use super::{Bounds, Point, Stroke};

/// Line segment with endpoints in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct DesignLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

impl DesignLine {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.start(), self.end())
    }

    /// Lines keep their endpoints as given, so direction survives.
    pub fn update_geometry(&mut self, p1: Point, p2: Point) {
        self.x1 = p1.x;
        self.y1 = p1.y;
        self.x2 = p2.x;
        self.y2 = p2.y;
    }
}
