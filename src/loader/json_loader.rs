// src/loader/json_loader.rs
use crate::error::MapError;
use crate::loader::format_points;
use crate::object_type::{ELLIPSE_KEY, POLYGON_POINTS_KEY, POLYLINE_POINTS_KEY};
use crate::raw::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::Path;

const GID_MASK: u32 = 0x1FFF_FFFF; // lower 29 bits, flip flags cleared

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    // absent and empty are different things
    #[serde(default)]
    objects: Option<Vec<JsonObject>>,
    #[serde(default)]
    layers: Vec<JsonLayer>,
}

#[derive(Deserialize)]
struct JsonTilesetRef {
    firstgid: u32,
}

#[derive(Deserialize)]
struct JsonMap {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTilesetRef>,
}

#[derive(Deserialize)]
struct JsonProperty {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    value: JsonValue,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    rotation: f32,
    #[serde(default)]
    ellipse: bool,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    polygon: Option<Vec<JsonObjectPoint>>,
    #[serde(default)]
    polyline: Option<Vec<JsonObjectPoint>>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonObjectPoint {
    x: f32,
    y: f32,
}

fn json_value_to_raw(value: &JsonValue) -> Option<RawValue> {
    match value {
        JsonValue::Bool(b) => Some(RawValue::String(b.to_string())),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Some(RawValue::Int(i)),
            None => n.as_f64().map(RawValue::Float),
        },
        JsonValue::String(s) => Some(RawValue::String(s.clone())),
        JsonValue::Object(members) => Some(RawValue::Dict(
            members
                .iter()
                .filter_map(|(k, v)| json_value_to_raw(v).map(|v| (k.clone(), v)))
                .collect(),
        )),
        JsonValue::Array(_) | JsonValue::Null => None,
    }
}

fn json_property_to_raw(prop: JsonProperty) -> Result<Option<(String, RawValue)>, MapError> {
    let JsonProperty { name, kind, value } = prop;

    let parsed = match kind.as_deref() {
        Some("bool") => value.as_bool().map(|b| RawValue::String(b.to_string())),
        Some("int") | Some("object") => value.as_i64().map(RawValue::Int),
        Some("float") => value.as_f64().map(RawValue::Float),
        Some("string") | Some("file") | Some("color") => {
            value.as_str().map(|s| RawValue::String(s.to_owned()))
        }
        Some("class") => value.is_object().then(|| json_value_to_raw(&value)).flatten(),
        Some(other) => {
            return Err(MapError::UnsupportedPropertyType {
                name,
                kind: other.to_owned(),
            });
        }
        None => json_value_to_raw(&value),
    };

    Ok(parsed.map(|value| (name, value)))
}

fn properties_from_json(props: Vec<JsonProperty>) -> Result<RawProperties, MapError> {
    let mut out = RawProperties::new();
    for p in props {
        if let Some((name, value)) = json_property_to_raw(p)? {
            out.insert(name, value);
        }
    }
    Ok(out)
}

fn points_string(points: &[JsonObjectPoint]) -> String {
    format_points(points.iter().map(|p| (p.x, p.y)))
}

/// Same keys a TMX reader reports; built-ins overwrite custom properties.
fn object_to_raw(obj: JsonObject) -> Result<RawProperties, MapError> {
    let mut raw = properties_from_json(obj.properties)?;

    raw.insert("id", obj.id.to_string());
    if !obj.name.is_empty() {
        raw.insert("name", obj.name);
    }
    let class_name = if !obj.class.is_empty() {
        obj.class
    } else {
        obj.kind
    };
    if !class_name.is_empty() {
        raw.insert("type", class_name);
    }
    raw.insert("x", obj.x.to_string());
    raw.insert("y", obj.y.to_string());
    if obj.rotation != 0.0 {
        raw.insert("rotation", obj.rotation.to_string());
    }

    if let Some(points) = &obj.polygon {
        raw.insert(POLYGON_POINTS_KEY, points_string(points));
    } else if let Some(points) = &obj.polyline {
        raw.insert(POLYLINE_POINTS_KEY, points_string(points));
    } else if !obj.point {
        raw.insert("width", obj.width.to_string());
        raw.insert("height", obj.height.to_string());
        if obj.ellipse {
            raw.insert(ELLIPSE_KEY, "1");
        }
    }

    Ok(raw)
}

fn tile_layer(
    name: String,
    width: u32,
    height: u32,
    data: Vec<u32>,
    first_gids: &[u32],
) -> Result<TileLayer, MapError> {
    let tiles = data
        .into_iter()
        .map(|raw_gid| {
            let gid = raw_gid & GID_MASK;
            if gid == 0 {
                return Ok(None);
            }
            // first_gids is sorted; the owning tileset is the last one starting at or below gid
            let idx = first_gids.partition_point(|&first| first <= gid);
            if idx == 0 {
                return Err(MapError::InvalidTileGid {
                    layer: name.clone(),
                    gid,
                });
            }
            Ok(Some(LayerTile {
                tileset_index: idx - 1,
                id: gid - first_gids[idx - 1],
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TileLayer {
        name,
        width,
        height,
        tiles,
    })
}

fn collect_layers(layers: Vec<JsonLayer>, first_gids: &[u32], out: &mut RawMap) -> Result<(), MapError> {
    for l in layers {
        match l.kind.as_deref().unwrap_or("tilelayer") {
            "tilelayer" => out
                .tile_layers
                .push(tile_layer(l.name, l.width, l.height, l.data, first_gids)?),
            "objectgroup" => {
                let objects = match l.objects {
                    Some(objects) => Some(
                        objects
                            .into_iter()
                            .map(object_to_raw)
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                    None => None,
                };
                out.object_groups.push(RawObjectGroup {
                    name: l.name,
                    objects,
                });
            }
            "group" => collect_layers(l.layers, first_gids, out)?,
            _ => {}
        }
    }
    Ok(())
}

/// Parse Tiled JSON text. `path` is only used for error reporting.
pub fn parse_json_map(txt: &str, path: &Path) -> Result<RawMap, MapError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut first_gids: Vec<u32> = j.tilesets.iter().map(|t| t.firstgid).collect();
    first_gids.sort_unstable();

    let mut raw = RawMap {
        width: j.width,
        height: j.height,
        tile_width: j.tilewidth,
        tile_height: j.tileheight,
        ..RawMap::default()
    };
    collect_layers(j.layers, &first_gids, &mut raw)?;
    Ok(raw)
}

pub fn decode_json_map(path: &Path) -> Result<RawMap, MapError> {
    let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json_map(&txt, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<RawMap, MapError> {
        parse_json_map(json, Path::new("inline.json"))
    }

    #[test]
    fn objects_become_string_dictionaries() {
        let map = parse(
            r#"{
          "width": 2, "height": 2, "tilewidth": 16, "tileheight": 16,
          "layers": [
            {
              "type":"objectgroup",
              "name":"spawns",
              "objects":[
                {"id":1,"name":"door","x":10,"y":20,"width":30,"height":40,
                 "properties":[{"name":"locked","type":"bool","value":true},
                               {"name":"x","type":"int","value":999}]},
                {"id":2,"name":"pond","x":0,"y":0,"width":8,"height":8,"ellipse":true},
                {"id":3,"name":"wall","x":5,"y":5,"polygon":[{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":10}]},
                {"id":4,"name":"path","x":5,"y":5,"polyline":[{"x":0,"y":0},{"x":3,"y":4}]},
                {"id":5,"name":"spot","x":1,"y":1,"point":true}
              ]
            }
          ]
        }"#,
        )
        .expect("decode");

        let objects = map.object_groups[0].objects.as_ref().expect("objects");
        assert_eq!(objects.len(), 5);

        let door = &objects[0];
        assert_eq!(door.get_str("x"), Some("10"));
        assert_eq!(door.get_str("height"), Some("40"));
        assert_eq!(door.get_str("locked"), Some("true"));

        assert_eq!(objects[1].get_str("ellipse"), Some("1"));
        assert_eq!(objects[2].get_str("polygonPoints"), Some("0,0 10,0 10,10"));
        assert!(!objects[2].contains_key("width"));
        assert_eq!(objects[3].get_str("polylinePoints"), Some("0,0 3,4"));
        assert!(!objects[4].contains_key("width"));
    }

    #[test]
    fn object_layer_without_objects_key_is_absent() {
        let map = parse(
            r#"{"tilewidth":8,"tileheight":8,
                "layers":[{"type":"objectgroup","name":"empty","objects":[]},
                          {"type":"objectgroup","name":"bare"}]}"#,
        )
        .expect("decode");
        assert_eq!(map.object_groups[0].objects.as_ref().map(Vec::len), Some(0));
        assert!(map.object_groups[1].objects.is_none());
    }

    #[test]
    fn class_properties_nest_and_groups_recurse() {
        let map = parse(
            r#"{"tilewidth":8,"tileheight":8,
                "layers":[{"type":"group","name":"g","layers":[
                  {"type":"objectgroup","name":"inner","objects":[
                    {"id":1,"x":0,"y":0,"width":1,"height":1,
                     "properties":[{"name":"stats","type":"class","value":{"hp":3,"tag":"boss"}}]}
                  ]}
                ]}]}"#,
        )
        .expect("decode");
        assert_eq!(map.object_groups[0].name, "inner");
        let obj = &map.object_groups[0].objects.as_ref().expect("objects")[0];
        assert_eq!(obj.flatten().get_i64("stats.hp"), Some(3));
        assert!(!obj.contains_key("name"));
    }

    #[test]
    fn tile_gids_resolve_to_tilesets() {
        let map = parse(
            r#"{"width":2,"height":2,"tilewidth":8,"tileheight":8,
                "tilesets":[{"firstgid":1,"source":"a.json"},{"firstgid":11,"source":"b.json"}],
                "layers":[{"type":"tilelayer","name":"ground","width":2,"height":2,
                           "data":[0, 3, 12, 2147483659]}]}"#,
        )
        .expect("decode");
        let layer = &map.tile_layers[0];
        assert_eq!(layer.tile_at(0, 0), None);
        assert_eq!(layer.tile_at(1, 0), Some(LayerTile { tileset_index: 0, id: 2 }));
        assert_eq!(layer.tile_at(0, 1), Some(LayerTile { tileset_index: 1, id: 1 }));
        assert_eq!(layer.tile_at(1, 1), Some(LayerTile { tileset_index: 1, id: 0 }));
    }

    #[test]
    fn returns_typed_error_for_malformed_json() {
        assert!(matches!(parse("{ not json"), Err(MapError::Json { .. })));
    }

    #[test]
    fn returns_typed_error_for_unknown_property_type() {
        let err = parse(
            r#"{"tilewidth":8,"tileheight":8,"layers":[{"type":"objectgroup","name":"o","objects":[
                 {"id":1,"properties":[{"name":"mystery","type":"not_supported","value":"x"}]}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MapError::UnsupportedPropertyType { .. }));
    }

    #[test]
    fn returns_typed_error_for_gid_without_tileset() {
        let err = parse(
            r#"{"tilewidth":8,"tileheight":8,
                "layers":[{"type":"tilelayer","name":"ground","width":1,"height":1,"data":[5]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MapError::InvalidTileGid { gid: 5, .. }));
    }
}
