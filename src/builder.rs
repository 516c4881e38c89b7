use crate::error::{ObjectError, Parameter};
use crate::object::{path_from_points, TilemapObject};
use crate::object_type::ObjectType;
use crate::points::{lenient_f32, parse_point_string};
use crate::raw::{RawProperties, RawValue};
use lyon::path::Path;
use macroquad::prelude::*;

/// Staging area for one object: filled from a raw dictionary by
/// [`configure`](Self::configure), turned into a [`TilemapObject`] by
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    pub name: Option<String>,
    pub kind: Option<ObjectType>,
    pub position: Option<Vec2>,
    pub size: Option<Vec2>,
    pub properties: Option<RawProperties>,
    pub points: Option<Vec<Vec2>>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read everything the object needs from its raw dictionary.
    pub fn configure(&mut self, raw: &RawProperties) {
        let mut props = raw.flatten();

        self.kind = Some(ObjectType::classify(&props));
        self.name = props.get_str("name").map(str::to_owned);

        self.position = coerce_pair(&mut props, "x", "y");
        self.size = coerce_pair(&mut props, "width", "height");

        self.points = self
            .kind
            .and_then(ObjectType::points_key)
            .and_then(|key| props.get_str(key))
            .map(parse_point_string)
            .filter(|pts| !pts.is_empty());

        self.properties = Some(props);
    }

    pub fn build(&self) -> Result<TilemapObject, ObjectError> {
        let kind = self.kind.ok_or(ObjectError::UnknownType)?;
        let name = self.name.clone();
        let properties = self.properties.clone().unwrap_or_default();

        match kind {
            ObjectType::Rectangle | ObjectType::Ellipse => {
                let position = require(self.position, Parameter::Position)?;
                let size = require(self.size, Parameter::Size)?;
                Ok(if kind == ObjectType::Ellipse {
                    TilemapObject::ellipse(name, properties, position, size)
                } else {
                    TilemapObject::rectangle(name, properties, position, size)
                })
            }
            ObjectType::Polyline | ObjectType::Polygon => {
                let position = require(self.position, Parameter::Position)?;
                let points = require(self.points.clone(), Parameter::Points)?;
                Ok(if kind == ObjectType::Polygon {
                    TilemapObject::polygon(name, properties, points, position)
                } else {
                    TilemapObject::polyline(name, properties, points, position)
                })
            }
        }
    }
}

/// Configure a fresh builder and build.
pub fn build_object(raw: &RawProperties) -> Result<TilemapObject, ObjectError> {
    let mut builder = ObjectBuilder::new();
    builder.configure(raw);
    builder.build()
}

/// Outline path straight from a TMX point string.
pub fn path_from_point_string(s: &str, closed: bool) -> Result<Path, ObjectError> {
    let points = parse_point_string(s);
    if points.is_empty() {
        return Err(ObjectError::EmptyPoints);
    }
    Ok(path_from_points(&points, closed))
}

fn require<T>(value: Option<T>, param: Parameter) -> Result<T, ObjectError> {
    value.ok_or(ObjectError::MissingParameter(param))
}

// Both keys must be present; the coerced floats replace the raw values.
fn coerce_pair(props: &mut RawProperties, a: &str, b: &str) -> Option<Vec2> {
    let x = coerce(props.get(a)?);
    let y = coerce(props.get(b)?);
    props.insert(a, RawValue::Float(x as f64));
    props.insert(b, RawValue::Float(y as f64));
    Some(vec2(x, y))
}

fn coerce(value: &RawValue) -> f32 {
    match value {
        RawValue::String(s) => lenient_f32(s),
        other => other.as_f64().unwrap_or(0.0) as f32,
    }
}
