//! Typed tilemap objects.

use crate::object_type::ObjectType;
use crate::raw::RawProperties;
use lyon::algorithms::aabb::bounding_box;
use lyon::math::{point, vector, Angle, Box2D, Point};
use lyon::path::{Path, Winding};
use macroquad::prelude::*;
use std::fmt;

/// Storage for a poly object.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyShape {
    /// Never empty.
    pub points: Vec<Vec2>,
    pub position: Vec2,
    /// Bounding box of the outline path.
    pub bounds: Rect,
}

/// Per-kind geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectShape {
    Rectangle(Rect),
    Ellipse(Rect),
    Polyline(PolyShape),
    Polygon(PolyShape),
}

/// One object from a tilemap object layer.
///
/// `position`, `size` and `rect` are in the parent's coordinate frame.
/// `path` is always relative to the object's own origin.
#[derive(Debug, Clone)]
pub struct TilemapObject {
    name: Option<String>,
    properties: RawProperties,
    shape: ObjectShape,
    path: Path,
}

impl TilemapObject {
    /// Axis-aligned rectangle; the outline starts at the local origin.
    pub fn rectangle(
        name: Option<String>,
        properties: RawProperties,
        position: Vec2,
        size: Vec2,
    ) -> Self {
        let mut builder = Path::builder();
        builder.add_rectangle(&local_box(size), Winding::Positive);
        Self {
            name,
            properties,
            shape: ObjectShape::Rectangle(Rect::new(position.x, position.y, size.x, size.y)),
            path: builder.build(),
        }
    }

    /// Ellipse inscribed in the `size` box at the local origin.
    pub fn ellipse(
        name: Option<String>,
        properties: RawProperties,
        position: Vec2,
        size: Vec2,
    ) -> Self {
        let radii = vector(size.x / 2.0, size.y / 2.0);
        let mut builder = Path::builder();
        builder.add_ellipse(
            point(radii.x, radii.y),
            radii,
            Angle::radians(0.0),
            Winding::Positive,
        );
        Self {
            name,
            properties,
            shape: ObjectShape::Ellipse(Rect::new(position.x, position.y, size.x, size.y)),
            path: builder.build(),
        }
    }

    /// Open path through `points`.
    ///
    /// # Panics
    ///
    /// If `points` is empty.
    pub fn polyline(
        name: Option<String>,
        properties: RawProperties,
        points: Vec<Vec2>,
        position: Vec2,
    ) -> Self {
        let (poly, path) = poly_shape(points, position, false);
        Self {
            name,
            properties,
            shape: ObjectShape::Polyline(poly),
            path,
        }
    }

    /// Closed path through `points`.
    ///
    /// # Panics
    ///
    /// If `points` is empty.
    pub fn polygon(
        name: Option<String>,
        properties: RawProperties,
        points: Vec<Vec2>,
        position: Vec2,
    ) -> Self {
        let (poly, path) = poly_shape(points, position, true);
        Self {
            name,
            properties,
            shape: ObjectShape::Polygon(poly),
            path,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Flattened properties, including the coerced `x`/`y`/`width`/`height`.
    pub fn properties(&self) -> &RawProperties {
        &self.properties
    }

    pub fn shape(&self) -> &ObjectShape {
        &self.shape
    }

    pub fn kind(&self) -> ObjectType {
        match self.shape {
            ObjectShape::Rectangle(_) => ObjectType::Rectangle,
            ObjectShape::Ellipse(_) => ObjectType::Ellipse,
            ObjectShape::Polyline(_) => ObjectType::Polyline,
            ObjectShape::Polygon(_) => ObjectType::Polygon,
        }
    }

    /// For poly objects this is the position they were built with,
    /// normally their first point.
    pub fn position(&self) -> Vec2 {
        match &self.shape {
            ObjectShape::Rectangle(r) | ObjectShape::Ellipse(r) => r.point(),
            ObjectShape::Polyline(p) | ObjectShape::Polygon(p) => p.position,
        }
    }

    /// For poly objects, the size of the outline's bounding box.
    pub fn size(&self) -> Vec2 {
        self.rect().size()
    }

    /// Rectangle of the object; the bounding box for non-rectangular shapes.
    pub fn rect(&self) -> Rect {
        match &self.shape {
            ObjectShape::Rectangle(r) | ObjectShape::Ellipse(r) => *r,
            ObjectShape::Polyline(p) | ObjectShape::Polygon(p) => p.bounds,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the outline's last point connects back to its first.
    pub fn is_closed(&self) -> bool {
        !matches!(self.shape, ObjectShape::Polyline(_))
    }

    /// Points of a poly object, `None` for rectangles and ellipses.
    pub fn points(&self) -> Option<&[Vec2]> {
        match &self.shape {
            ObjectShape::Polyline(p) | ObjectShape::Polygon(p) => Some(&p.points),
            _ => None,
        }
    }
}

impl fmt::Display for TilemapObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.position();
        let size = self.size();
        write!(
            f,
            "<TilemapObject {}: name={}, position=({}, {}), size=({}, {}), properties={}>",
            self.kind(),
            self.name.as_deref().unwrap_or("(nil)"),
            pos.x,
            pos.y,
            size.x,
            size.y,
            self.properties.len(),
        )
    }
}

fn local_box(size: Vec2) -> Box2D {
    Box2D::new(point(0.0, 0.0), point(size.x, size.y))
}

fn to_point(v: Vec2) -> Point {
    point(v.x, v.y)
}

pub(crate) fn path_from_points(points: &[Vec2], closed: bool) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(to_point(*first));
        for p in rest {
            builder.line_to(to_point(*p));
        }
        builder.end(closed);
    }
    builder.build()
}

fn poly_shape(points: Vec<Vec2>, position: Vec2, closed: bool) -> (PolyShape, Path) {
    assert!(
        !points.is_empty(),
        "poly tilemap object cannot be built from an empty list of points"
    );
    let path = path_from_points(&points, closed);
    let b = bounding_box(path.iter());
    let bounds = Rect::new(b.min.x, b.min.y, b.width(), b.height());
    (
        PolyShape {
            points,
            position,
            bounds,
        },
        path,
    )
}
