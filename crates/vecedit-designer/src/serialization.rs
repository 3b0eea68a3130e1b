//! Serialization and deserialization for design documents.
//!
//! A document is UTF-8 JSON wrapping the top-level shape list with a format
//! version and the canvas size:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "canvas_width": 800.0,
//!   "canvas_height": 600.0,
//!   "shapes": [
//!     { "type": "rect", "pos": [10.0, 10.0],
//!       "props": { "x": 0.0, "y": 0.0, "w": 50.0, "h": 50.0,
//!                  "color": "#000000", "stroke_width": 2 } },
//!     { "type": "group", "pos": [0.0, 0.0], "children": [ ... ] }
//!   ]
//! }
//! ```
//!
//! Shape identities are not persisted; loading assigns fresh ones.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use vecedit_core::DocumentError;

use crate::model::{
    Color, Colorable, DesignEllipse, DesignGroup, DesignLine, DesignRectangle, DrawingObject,
    Point, Shape, ShapeType, Stroke,
};
use crate::scene::Scene;

/// Design file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Major format version this build reads
const SUPPORTED_MAJOR: &str = "1";

/// Complete design file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,
    #[serde(default)]
    pub shapes: Vec<ShapeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DesignMetadata>,
}

/// Design metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

/// Serialized shape record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    #[serde(rename = "type")]
    pub shape_type: String,
    #[serde(default)]
    pub pos: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<ShapeProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ShapeData>>,
}

/// Geometry and style of a primitive; every field is optional on input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<u32>,
}

fn default_version() -> String {
    FILE_FORMAT_VERSION.to_string()
}
fn default_canvas_width() -> f64 {
    800.0
}
fn default_canvas_height() -> f64 {
    600.0
}

/// Conversion of a shape tree to its persisted record
pub trait Serializable {
    fn to_data(&self) -> ShapeData;
}

impl Serializable for DrawingObject {
    fn to_data(&self) -> ShapeData {
        let stroke = |s: &Stroke| ShapeProps {
            color: Some(s.color.to_string()),
            stroke_width: Some(s.width),
            ..ShapeProps::default()
        };

        let (props, children) = match &self.shape {
            Shape::Rectangle(r) => (
                Some(ShapeProps {
                    x: Some(r.x),
                    y: Some(r.y),
                    w: Some(r.width),
                    h: Some(r.height),
                    ..stroke(&r.stroke)
                }),
                None,
            ),
            Shape::Ellipse(e) => (
                Some(ShapeProps {
                    x: Some(e.x),
                    y: Some(e.y),
                    w: Some(e.width),
                    h: Some(e.height),
                    ..stroke(&e.stroke)
                }),
                None,
            ),
            Shape::Line(l) => (
                Some(ShapeProps {
                    x1: Some(l.x1),
                    y1: Some(l.y1),
                    x2: Some(l.x2),
                    y2: Some(l.y2),
                    ..stroke(&l.stroke)
                }),
                None,
            ),
            Shape::Group(g) => (None, Some(g.children.iter().map(|c| c.to_data()).collect())),
        };

        ShapeData {
            shape_type: self.shape_type().tag().to_string(),
            pos: [self.position.x, self.position.y],
            props,
            children,
        }
    }
}

impl ShapeData {
    /// Rebuild a shape tree, drawing identities from `next_id`.
    ///
    /// Missing fields take per-field defaults: coordinates `0.0`, color
    /// `#000000`, stroke width `2`.
    pub fn to_object(&self, next_id: &mut u64) -> std::result::Result<DrawingObject, DocumentError> {
        let shape_type =
            ShapeType::from_tag(&self.shape_type).ok_or_else(|| DocumentError::UnknownShapeType {
                type_name: self.shape_type.clone(),
            })?;

        let id = *next_id;
        *next_id += 1;

        let props = self.props.clone().unwrap_or_default();
        let stroke = || -> std::result::Result<Stroke, DocumentError> {
            let defaults = Stroke::default();
            let color = match &props.color {
                Some(value) => value.parse::<Color>()?,
                None => defaults.color,
            };
            let width = props.stroke_width.unwrap_or(defaults.width);
            if width == 0 {
                return Err(DocumentError::InvalidStrokeWidth { width });
            }
            Ok(Stroke::new(color, width))
        };
        let num = |v: Option<f64>| v.unwrap_or(0.0);

        let shape = match shape_type {
            ShapeType::Rectangle => Shape::Rectangle(DesignRectangle::new(
                num(props.x),
                num(props.y),
                num(props.w),
                num(props.h),
                stroke()?,
            )),
            ShapeType::Ellipse => Shape::Ellipse(DesignEllipse::new(
                num(props.x),
                num(props.y),
                num(props.w),
                num(props.h),
                stroke()?,
            )),
            ShapeType::Line => Shape::Line(DesignLine::new(
                num(props.x1),
                num(props.y1),
                num(props.x2),
                num(props.y2),
                stroke()?,
            )),
            ShapeType::Group => {
                let children = self
                    .children
                    .iter()
                    .flatten()
                    .map(|c| c.to_object(next_id))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Shape::Group(DesignGroup::new(children))
            }
        };

        Ok(DrawingObject::new(id, shape).with_position(Point::new(self.pos[0], self.pos[1])))
    }
}

impl DesignFile {
    /// Create an empty design file for a canvas
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            canvas_width,
            canvas_height,
            shapes: Vec::new(),
            metadata: None,
        }
    }

    /// Snapshot the scene's shape tree
    pub fn from_scene(scene: &Scene) -> Self {
        let mut design = Self::new(scene.width(), scene.height());
        design.shapes = scene.objects().iter().map(|o| o.to_data()).collect();
        design
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let now = Utc::now();
        let metadata = self.metadata.get_or_insert_with(|| DesignMetadata {
            name: String::new(),
            created: now,
            modified: now,
        });
        metadata.name = name.into();
        metadata.modified = now;
        self
    }

    /// Parse and version-check a document without touching any scene
    pub fn parse(text: &str) -> std::result::Result<Self, DocumentError> {
        let design: DesignFile =
            serde_json::from_str(text).map_err(|e| DocumentError::Parse {
                reason: e.to_string(),
            })?;
        design.check_version()?;
        Ok(design)
    }

    pub fn check_version(&self) -> std::result::Result<(), DocumentError> {
        let major = self.version.split('.').next().unwrap_or_default().trim();
        if major == SUPPORTED_MAJOR {
            Ok(())
        } else {
            Err(DocumentError::UnsupportedVersion {
                version: self.version.clone(),
            })
        }
    }

    /// Convert every record to shapes with fresh identities starting at 1
    pub fn decode(&self) -> std::result::Result<Vec<DrawingObject>, DocumentError> {
        let mut next_id = 1;
        self.shapes
            .iter()
            .map(|data| data.to_object(&mut next_id))
            .collect()
    }

    /// Replace the scene's contents with this document.
    ///
    /// The whole document is decoded first; on failure the scene is untouched.
    pub fn apply_to(&self, scene: &mut Scene) -> std::result::Result<(), DocumentError> {
        let objects = self.decode()?;
        scene.set_size(self.canvas_width, self.canvas_height);
        scene.replace_all(objects);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize design")
    }

    /// Save design to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;

        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write design file {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Load design from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read design file {}", path.as_ref().display()))?;

        let design = Self::parse(&content).context("Failed to parse design file")?;

        Ok(design)
    }
}

/// Summary line for a shape, used by inspectors and the CLI
pub fn describe(object: &DrawingObject, absolute: Point) -> String {
    let b = object.shape.bounds().translate(absolute);
    format!(
        "{} #{} at ({}, {}) size {}x{} stroke {} {}",
        object.shape_type(),
        object.id,
        absolute.x,
        absolute.y,
        b.width(),
        b.height(),
        object.stroke_color(),
        object.stroke_width()
    )
}
