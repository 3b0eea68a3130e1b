use super::{Bounds, DrawingObject, Point};

/// Composite shape; children are positioned relative to the group's origin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignGroup {
    pub children: Vec<DrawingObject>,
}

impl DesignGroup {
    pub fn new(children: Vec<DrawingObject>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.children
            .iter()
            .map(DrawingObject::bounds)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_else(|| Bounds::at_point(Point::default()))
    }
}
