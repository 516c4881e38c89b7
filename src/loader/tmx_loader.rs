// src/loader/tmx_loader.rs
use crate::error::MapError;
use crate::loader::format_points;
use crate::object_type::{ELLIPSE_KEY, POLYGON_POINTS_KEY, POLYLINE_POINTS_KEY};
use crate::raw::*;
use std::path::Path;
use tiled::{FiniteTileLayer, LayerType, ObjectData, ObjectShape, Properties, PropertyValue};
use tracing::warn;

fn property_to_raw(value: &PropertyValue) -> RawValue {
    match value {
        PropertyValue::BoolValue(b) => RawValue::String(b.to_string()),
        PropertyValue::FloatValue(f) => RawValue::Float(*f as f64),
        PropertyValue::IntValue(i) => RawValue::Int(*i as i64),
        PropertyValue::ObjectValue(id) => RawValue::Int(*id as i64),
        PropertyValue::ColorValue(c) => RawValue::String(format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            c.alpha, c.red, c.green, c.blue
        )),
        PropertyValue::StringValue(s) | PropertyValue::FileValue(s) => RawValue::String(s.clone()),
        PropertyValue::ClassValue { properties, .. } => RawValue::Dict(properties_to_raw(properties)),
    }
}

fn properties_to_raw(props: &Properties) -> RawProperties {
    props
        .iter()
        .map(|(name, value)| (name.clone(), property_to_raw(value)))
        .collect()
}

/// Same keys the JSON reader reports; built-ins overwrite custom properties.
fn object_to_raw(object: &ObjectData) -> RawProperties {
    let mut raw = properties_to_raw(&object.properties);

    raw.insert("id", object.id().to_string());
    if !object.name.is_empty() {
        raw.insert("name", object.name.clone());
    }
    if !object.user_type.is_empty() {
        raw.insert("type", object.user_type.clone());
    }
    raw.insert("x", object.x.to_string());
    raw.insert("y", object.y.to_string());
    if object.rotation != 0.0 {
        raw.insert("rotation", object.rotation.to_string());
    }

    match &object.shape {
        ObjectShape::Rect { width, height } | ObjectShape::Text { width, height, .. } => {
            raw.insert("width", width.to_string());
            raw.insert("height", height.to_string());
        }
        ObjectShape::Ellipse { width, height } => {
            raw.insert("width", width.to_string());
            raw.insert("height", height.to_string());
            raw.insert(ELLIPSE_KEY, "1");
        }
        ObjectShape::Polygon { points } => {
            raw.insert(POLYGON_POINTS_KEY, format_points(points.iter().copied()));
        }
        ObjectShape::Polyline { points } => {
            raw.insert(POLYLINE_POINTS_KEY, format_points(points.iter().copied()));
        }
        ObjectShape::Point(_, _) => {}
    }

    raw
}

fn finite_layer(name: &str, layer: &FiniteTileLayer) -> TileLayer {
    let (width, height) = (layer.width(), layer.height());
    let mut tiles = Vec::with_capacity((width * height) as usize);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            tiles.push(layer.get_tile_data(x, y).map(|t| LayerTile {
                tileset_index: t.tileset_index(),
                id: t.id(),
            }));
        }
    }
    TileLayer {
        name: name.to_owned(),
        width,
        height,
        tiles,
    }
}

fn collect_layers<'map>(layers: impl Iterator<Item = tiled::Layer<'map>>, out: &mut RawMap) {
    for layer in layers {
        match layer.layer_type() {
            LayerType::Objects(group) => out.object_groups.push(RawObjectGroup {
                name: layer.name.clone(),
                objects: Some(group.objects().map(|o| object_to_raw(&o)).collect()),
            }),
            LayerType::Tiles(tiled::TileLayer::Finite(tiles)) => {
                out.tile_layers.push(finite_layer(&layer.name, &tiles))
            }
            LayerType::Tiles(tiled::TileLayer::Infinite(_)) => {
                warn!(layer = %layer.name, "skipping infinite tile layer");
            }
            LayerType::Group(group) => collect_layers(group.layers(), out),
            LayerType::Image(_) => {}
        }
    }
}

pub fn decode_tmx_map(path: &Path) -> Result<RawMap, MapError> {
    let map = tiled::Loader::new()
        .load_tmx_map(path)
        .map_err(|source| MapError::Tmx {
            path: path.to_path_buf(),
            source,
        })?;

    let mut raw = RawMap {
        width: map.width,
        height: map.height,
        tile_width: map.tile_width,
        tile_height: map.tile_height,
        ..RawMap::default()
    };
    collect_layers(map.layers(), &mut raw);
    Ok(raw)
}
