#![warn(missing_docs)]

//! Typed Tiled object layers for Macroquad.
//!
//! Every object layer of a map is parsed into rectangles, ellipses,
//! polylines and polygons, grouped under caller-defined layer keys.

mod builder;
mod config;
mod error;
mod group;
pub mod loader;
mod object;
mod object_type;
mod points;
mod raw;
pub mod render;
mod scene;
mod tilemap;

pub use builder::{build_object, path_from_point_string, ObjectBuilder};
pub use config::TilemapConfig;
pub use error::{MapError, ObjectError, Parameter};
pub use group::{LayerKey, ObjectGroup};
pub use object::{ObjectShape, PolyShape, TilemapObject};
pub use object_type::{ObjectType, ELLIPSE_KEY, POLYGON_POINTS_KEY, POLYLINE_POINTS_KEY};
pub use points::parse_point_string;
pub use raw::{LayerTile, RawMap, RawObjectGroup, RawProperties, RawValue, TileLayer};
pub use scene::SceneNode;
pub use tilemap::Tilemap;
