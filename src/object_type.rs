use crate::raw::RawProperties;
use std::fmt;

/// Key holding a polygon's point string.
pub const POLYGON_POINTS_KEY: &str = "polygonPoints";
/// Key holding a polyline's point string.
pub const POLYLINE_POINTS_KEY: &str = "polylinePoints";
/// Key flagging an ellipse (`"1"`).
pub const ELLIPSE_KEY: &str = "ellipse";

/// Geometric kind of a tilemap object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Rectangle,
    Ellipse,
    Polyline,
    Polygon,
}

impl ObjectType {
    /// Classify a raw object.
    ///
    /// First match wins: ellipse flag, then polygon points, then polyline
    /// points. Anything else is a rectangle.
    pub fn classify(props: &RawProperties) -> Self {
        if props.get_i64(ELLIPSE_KEY) == Some(1) {
            ObjectType::Ellipse
        } else if props.get_str(POLYGON_POINTS_KEY).is_some() {
            ObjectType::Polygon
        } else if props.get_str(POLYLINE_POINTS_KEY).is_some() {
            ObjectType::Polyline
        } else {
            ObjectType::Rectangle
        }
    }

    /// Where the point string lives, for poly kinds.
    pub fn points_key(self) -> Option<&'static str> {
        match self {
            ObjectType::Polygon => Some(POLYGON_POINTS_KEY),
            ObjectType::Polyline => Some(POLYLINE_POINTS_KEY),
            ObjectType::Rectangle | ObjectType::Ellipse => None,
        }
    }

    pub fn is_poly(self) -> bool {
        self.points_key().is_some()
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectType::Rectangle => "Rectangle",
            ObjectType::Ellipse => "Ellipse",
            ObjectType::Polyline => "Polyline",
            ObjectType::Polygon => "Polygon",
        };
        f.write_str(s)
    }
}
