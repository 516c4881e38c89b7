//! Map readers. Each one turns a map file into a [`RawMap`] whose objects
//! are string-valued dictionaries, the shape the object builder expects.

pub mod json_loader;
pub mod tmx_loader;

use crate::error::MapError;
use crate::raw::RawMap;
use std::path::Path;

/// Read a map, picking the reader from the file extension.
pub fn load_raw_map(path: &Path) -> Result<RawMap, MapError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tmx") => tmx_loader::decode_tmx_map(path),
        Some("json") | Some("tmj") => json_loader::decode_json_map(path),
        _ => Err(MapError::UnsupportedFormat(path.display().to_string())),
    }
}

/// `"x,y x,y ..."`, the TMX `points` attribute format.
pub(crate) fn format_points(points: impl IntoIterator<Item = (f32, f32)>) -> String {
    points
        .into_iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}
