//! Shape model: primitive and composite shapes with their style data.
//!
//! Every [`DrawingObject`] carries a position offset relative to its parent
//! (the scene for top-level objects, the enclosing group otherwise). Primitive
//! geometry is stored in the object's local space, relative to that offset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use vecedit_core::{DocumentError, GeometryError};

mod ellipse;
mod group;
mod line;
mod rectangle;

pub use ellipse::DesignEllipse;
pub use group::DesignGroup;
pub use line::DesignLine;
pub use rectangle::DesignRectangle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box spanned by two arbitrary corners, normalized so min <= max.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Zero-sized box at a point.
    pub fn at_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn origin(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Strict overlap test; boxes that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.min_x - tolerance
            && p.x <= self.max_x + tolerance
            && p.y >= self.min_y - tolerance
            && p.y <= self.max_y + tolerance
    }

    pub fn translate(&self, offset: Point) -> Bounds {
        Bounds::new(
            self.min_x + offset.x,
            self.min_y + offset.y,
            self.max_x + offset.x,
            self.max_y + offset.y,
        )
    }
}

/// Opaque RGB stroke color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DocumentError::InvalidColor {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("black") {
            return Ok(Color::BLACK);
        }
        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Stroke style of a primitive shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: Color,
    /// Whole units, at least 1
    pub width: u32,
}

impl Stroke {
    pub fn new(color: Color, width: u32) -> Self {
        Self { color, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    Rectangle,
    Line,
    Ellipse,
    Group,
}

impl ShapeType {
    /// Tag used in persisted documents
    pub fn tag(&self) -> &'static str {
        match self {
            ShapeType::Rectangle => "rect",
            ShapeType::Line => "line",
            ShapeType::Ellipse => "ellipse",
            ShapeType::Group => "group",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "rect" | "rectangle" => Some(ShapeType::Rectangle),
            "line" => Some(ShapeType::Line),
            "ellipse" => Some(ShapeType::Ellipse),
            "group" => Some(ShapeType::Group),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeType::Rectangle => "Rectangle",
            ShapeType::Line => "Line",
            ShapeType::Ellipse => "Ellipse",
            ShapeType::Group => "Group",
        };
        f.write_str(name)
    }
}

/// Shape kinds a creation tool can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Rectangle,
    Line,
    Ellipse,
}

impl PrimitiveKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            PrimitiveKind::Rectangle => ShapeType::Rectangle,
            PrimitiveKind::Line => ShapeType::Line,
            PrimitiveKind::Ellipse => ShapeType::Ellipse,
        }
    }

    /// Zero-sized shape of this kind at its local origin
    pub fn create(&self, stroke: Stroke) -> Shape {
        match self {
            PrimitiveKind::Rectangle => {
                Shape::Rectangle(DesignRectangle::new(0.0, 0.0, 0.0, 0.0, stroke))
            }
            PrimitiveKind::Line => Shape::Line(DesignLine::new(0.0, 0.0, 0.0, 0.0, stroke)),
            PrimitiveKind::Ellipse => {
                Shape::Ellipse(DesignEllipse::new(0.0, 0.0, 0.0, 0.0, stroke))
            }
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.shape_type().fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(DesignRectangle),
    Line(DesignLine),
    Ellipse(DesignEllipse),
    Group(DesignGroup),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Rectangle(_) => ShapeType::Rectangle,
            Shape::Line(_) => ShapeType::Line,
            Shape::Ellipse(_) => ShapeType::Ellipse,
            Shape::Group(_) => ShapeType::Group,
        }
    }

    /// Bounds in the shape's own local space.
    ///
    /// A group's extent is the union of its children's bounds; an empty group
    /// collapses to its origin.
    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Rectangle(r) => r.bounds(),
            Shape::Line(l) => l.bounds(),
            Shape::Ellipse(e) => e.bounds(),
            Shape::Group(g) => g.bounds(),
        }
    }

    /// Re-derive local geometry from two corner points.
    ///
    /// Groups have no geometry of their own; returns false for them.
    pub fn update_geometry(&mut self, p1: Point, p2: Point) -> bool {
        match self {
            Shape::Rectangle(r) => r.update_geometry(p1, p2),
            Shape::Line(l) => l.update_geometry(p1, p2),
            Shape::Ellipse(e) => e.update_geometry(p1, p2),
            Shape::Group(_) => return false,
        }
        true
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    pub fn as_group(&self) -> Option<&DesignGroup> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut DesignGroup> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    fn stroke(&self) -> Option<&Stroke> {
        match self {
            Shape::Rectangle(r) => Some(&r.stroke),
            Shape::Line(l) => Some(&l.stroke),
            Shape::Ellipse(e) => Some(&e.stroke),
            Shape::Group(_) => None,
        }
    }

    fn stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            Shape::Rectangle(r) => Some(&mut r.stroke),
            Shape::Line(l) => Some(&mut l.stroke),
            Shape::Ellipse(e) => Some(&mut e.stroke),
            Shape::Group(_) => None,
        }
    }
}

/// A shape placed in the scene tree
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingObject {
    /// Stable identity, unique across the whole tree
    pub id: u64,
    /// Offset from the parent's origin
    pub position: Point,
    /// Only ever set on top-level objects
    pub selected: bool,
    pub shape: Shape,
}

impl DrawingObject {
    /// Creates a new drawing object at its parent's origin.
    pub fn new(id: u64, shape: Shape) -> Self {
        Self {
            id,
            position: Point::default(),
            selected: false,
            shape,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape.shape_type()
    }

    /// Display name used in history labels and inspectors
    pub fn name(&self) -> String {
        self.shape_type().to_string()
    }

    /// Bounds in the parent's coordinate space
    pub fn bounds(&self) -> Bounds {
        self.shape.bounds().translate(self.position)
    }

    pub fn is_group(&self) -> bool {
        self.shape.is_group()
    }

    pub fn children(&self) -> &[DrawingObject] {
        match &self.shape {
            Shape::Group(g) => &g.children,
            _ => &[],
        }
    }

    /// Depth-first search of this object and its descendants
    pub fn find(&self, id: u64) -> Option<&DrawingObject> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut DrawingObject> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.shape {
            Shape::Group(g) => g.children.iter_mut().find_map(|c| c.find_mut(id)),
            _ => None,
        }
    }

    /// Identities of this object and every descendant
    pub fn ids(&self) -> Vec<u64> {
        let mut ids = vec![self.id];
        for child in self.children() {
            ids.extend(child.ids());
        }
        ids
    }

    /// Check the geometry of this object and its descendants against a policy
    pub fn validate(&self, policy: &ValidationPolicy) -> Result<(), GeometryError> {
        policy.check(&self.shape)?;
        for child in self.children() {
            child.validate(policy)?;
        }
        Ok(())
    }
}

/// Position access shared by every shape
pub trait Movable {
    fn position(&self) -> Point;

    fn set_position(&mut self, position: Point);

    fn translate(&mut self, dx: f64, dy: f64) {
        let p = self.position();
        self.set_position(Point::new(p.x + dx, p.y + dy));
    }
}

impl Movable for DrawingObject {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// Captured style of a shape tree, shaped like the tree itself
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSnapshot<T> {
    Leaf(T),
    Group(Vec<StyleSnapshot<T>>),
}

/// Stroke style access; groups delegate to every descendant
pub trait Colorable {
    fn stroke_color(&self) -> Color;
    fn set_stroke_color(&mut self, color: Color);
    fn stroke_width(&self) -> u32;
    fn set_stroke_width(&mut self, width: u32);
    fn capture_colors(&self) -> StyleSnapshot<Color>;
    fn restore_colors(&mut self, snapshot: &StyleSnapshot<Color>);
    fn capture_widths(&self) -> StyleSnapshot<u32>;
    fn restore_widths(&mut self, snapshot: &StyleSnapshot<u32>);
}

impl Colorable for Shape {
    /// A group reports its first descendant's color.
    fn stroke_color(&self) -> Color {
        match self {
            Shape::Group(g) => g
                .children
                .first()
                .map(|c| c.shape.stroke_color())
                .unwrap_or_default(),
            leaf => leaf.stroke().map(|s| s.color).unwrap_or_default(),
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        match self {
            Shape::Group(g) => {
                for child in &mut g.children {
                    child.shape.set_stroke_color(color);
                }
            }
            leaf => {
                if let Some(stroke) = leaf.stroke_mut() {
                    stroke.color = color;
                }
            }
        }
    }

    fn stroke_width(&self) -> u32 {
        match self {
            Shape::Group(g) => g
                .children
                .first()
                .map(|c| c.shape.stroke_width())
                .unwrap_or_else(|| Stroke::default().width),
            leaf => leaf.stroke().map(|s| s.width).unwrap_or_default(),
        }
    }

    fn set_stroke_width(&mut self, width: u32) {
        match self {
            Shape::Group(g) => {
                for child in &mut g.children {
                    child.shape.set_stroke_width(width);
                }
            }
            leaf => {
                if let Some(stroke) = leaf.stroke_mut() {
                    stroke.width = width;
                }
            }
        }
    }

    fn capture_colors(&self) -> StyleSnapshot<Color> {
        match self {
            Shape::Group(g) => StyleSnapshot::Group(
                g.children.iter().map(|c| c.shape.capture_colors()).collect(),
            ),
            leaf => StyleSnapshot::Leaf(leaf.stroke_color()),
        }
    }

    fn restore_colors(&mut self, snapshot: &StyleSnapshot<Color>) {
        match (self, snapshot) {
            (Shape::Group(g), StyleSnapshot::Group(children)) => {
                for (child, snap) in g.children.iter_mut().zip(children) {
                    child.shape.restore_colors(snap);
                }
            }
            (shape, StyleSnapshot::Leaf(color)) => shape.set_stroke_color(*color),
            (shape, StyleSnapshot::Group(_)) => {
                tracing::warn!("Color snapshot does not match {} structure", shape.shape_type());
            }
        }
    }

    fn capture_widths(&self) -> StyleSnapshot<u32> {
        match self {
            Shape::Group(g) => StyleSnapshot::Group(
                g.children.iter().map(|c| c.shape.capture_widths()).collect(),
            ),
            leaf => StyleSnapshot::Leaf(leaf.stroke_width()),
        }
    }

    fn restore_widths(&mut self, snapshot: &StyleSnapshot<u32>) {
        match (self, snapshot) {
            (Shape::Group(g), StyleSnapshot::Group(children)) => {
                for (child, snap) in g.children.iter_mut().zip(children) {
                    child.shape.restore_widths(snap);
                }
            }
            (shape, StyleSnapshot::Leaf(width)) => shape.set_stroke_width(*width),
            (shape, StyleSnapshot::Group(_)) => {
                tracing::warn!("Width snapshot does not match {} structure", shape.shape_type());
            }
        }
    }
}

impl Colorable for DrawingObject {
    fn stroke_color(&self) -> Color {
        self.shape.stroke_color()
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.shape.set_stroke_color(color);
    }

    fn stroke_width(&self) -> u32 {
        self.shape.stroke_width()
    }

    fn set_stroke_width(&mut self, width: u32) {
        self.shape.set_stroke_width(width);
    }

    fn capture_colors(&self) -> StyleSnapshot<Color> {
        self.shape.capture_colors()
    }

    fn restore_colors(&mut self, snapshot: &StyleSnapshot<Color>) {
        self.shape.restore_colors(snapshot);
    }

    fn capture_widths(&self) -> StyleSnapshot<u32> {
        self.shape.capture_widths()
    }

    fn restore_widths(&mut self, snapshot: &StyleSnapshot<u32>) {
        self.shape.restore_widths(snapshot);
    }
}

/// Optional strictness applied by callers that want well-formed geometry.
///
/// The model itself accepts degenerate shapes, since live creation starts
/// from a zero-sized one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub allow_degenerate: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allow_degenerate: true,
        }
    }
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self {
            allow_degenerate: false,
        }
    }

    pub fn check(&self, shape: &Shape) -> Result<(), GeometryError> {
        let kind = shape.shape_type();
        let fail = |reason: &str| GeometryError::InvalidGeometry {
            kind: kind.to_string(),
            reason: reason.to_string(),
        };

        let b = shape.bounds();
        if ![b.min_x, b.min_y, b.max_x, b.max_y]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(fail("coordinates must be finite"));
        }

        if self.allow_degenerate {
            return Ok(());
        }

        match shape {
            Shape::Rectangle(_) | Shape::Ellipse(_) if b.width() == 0.0 || b.height() == 0.0 => {
                Err(fail("width and height must be non-zero"))
            }
            Shape::Line(l) if l.length() == 0.0 => Err(fail("endpoints must differ")),
            Shape::Group(g) if g.children.is_empty() => Err(fail("group has no children")),
            _ => Ok(()),
        }
    }
}
