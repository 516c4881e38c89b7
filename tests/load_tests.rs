// tests/load_tests.rs

use macroquad::prelude::{vec2, Rect};
use macroquad_tiled_objects::{LayerKey, MapError, ObjectType, Tilemap, TilemapConfig};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, PartialEq)]
enum Layers {
    Ground,
}

impl LayerKey for Layers {
    fn from_layer_name(name: &str) -> Option<Self> {
        match name {
            "ground" => Some(Layers::Ground),
            _ => None,
        }
    }

    fn layer_name(&self) -> &str {
        match self {
            Layers::Ground => "ground",
        }
    }
}

#[derive(Debug, PartialEq)]
enum Groups {
    Spawns,
    Walls,
}

impl LayerKey for Groups {
    fn from_layer_name(name: &str) -> Option<Self> {
        match name {
            "spawns" => Some(Groups::Spawns),
            "walls" => Some(Groups::Walls),
            _ => None,
        }
    }

    fn layer_name(&self) -> &str {
        match self {
            Groups::Spawns => "spawns",
            Groups::Walls => "walls",
        }
    }
}

type Map = Tilemap<Layers, Groups>;

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("mq_tiled_objects_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn write_map(name: &str, contents: &str) -> PathBuf {
    let path = temp_dir().join(name);
    fs::write(&path, contents).expect("failed to write map");
    path
}

const TMX_MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="2" height="2" tilewidth="16" tileheight="16" infinite="0" nextlayerid="4" nextobjectid="7">
 <layer id="1" name="ground" width="2" height="2">
  <data encoding="csv">0,0,0,0</data>
 </layer>
 <objectgroup id="2" name="spawns">
  <object id="1" name="door" x="10" y="20" width="30" height="40">
   <properties>
    <property name="locked" type="bool" value="true"/>
   </properties>
  </object>
  <object id="2" name="pond" x="0" y="0" width="8" height="8">
   <ellipse/>
  </object>
  <object id="3" name="spot" x="4" y="4">
   <point/>
  </object>
  <object id="4" x="1" y="1" width="2" height="2"/>
 </objectgroup>
 <objectgroup id="3" name="walls">
  <object id="5" name="wall" x="0" y="0">
   <polygon points="0,0 10,0 10,10"/>
  </object>
  <object id="6" name="fence" x="0" y="0">
   <polyline points="0,0 10,0 10,10"/>
  </object>
 </objectgroup>
</map>
"#;

#[test]
fn loads_tmx_objects_by_group_key() {
    let path = write_map("map.tmx", TMX_MAP);
    let map = Map::load(&path).expect("tmx map should load");

    assert_eq!(map.grid_size(), (2, 2));
    assert_eq!(map.tile_size(), vec2(16.0, 16.0));

    let spawns = map.object_group(&Groups::Spawns).expect("spawns group");
    assert_eq!(spawns.group_name(), "spawns");
    // the point object has no size and is dropped
    assert_eq!(spawns.len(), 3);
    assert!(spawns.object_named("spot").is_none());

    let door = spawns.object_named("door").expect("door");
    assert_eq!(door.kind(), ObjectType::Rectangle);
    assert_eq!(door.rect(), Rect::new(10.0, 20.0, 30.0, 40.0));
    assert_eq!(door.properties().get_str("locked"), Some("true"));

    let pond = spawns.object_named("pond").expect("pond");
    assert_eq!(pond.kind(), ObjectType::Ellipse);

    let unnamed: Vec<_> = spawns.all_objects().filter(|o| o.name().is_none()).collect();
    assert_eq!(unnamed.len(), 1);

    let walls = map.object_group(&Groups::Walls).expect("walls group");
    let wall = walls.object_named("wall").expect("wall");
    let fence = walls.object_named("fence").expect("fence");
    assert_eq!(wall.kind(), ObjectType::Polygon);
    assert_eq!(fence.kind(), ObjectType::Polyline);
    assert!(wall.is_closed());
    assert!(!fence.is_closed());
    assert_eq!(wall.rect(), fence.rect());
    assert_eq!(wall.size(), vec2(10.0, 10.0));
    assert_eq!(wall.points().map(|p| p[2]), Some(vec2(10.0, -10.0)));

    let ground = map.tile_layer(&Layers::Ground).expect("ground layer");
    assert_eq!((ground.width, ground.height), (2, 2));
    assert!(ground.tiles.iter().all(Option::is_none));
}

#[test]
fn tmx_with_unknown_object_layer_fails_to_load() {
    let tmx = TMX_MAP.replace(r#"name="walls""#, r#"name="decor""#);
    let path = write_map("unknown.tmx", &tmx);
    let err = Map::load(&path).err().expect("load should fail");
    assert!(matches!(err, MapError::UnknownLayer { layer } if layer == "decor"));
}

const JSON_MAP: &str = r#"{
  "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
  "tilesets": [{"firstgid": 1, "source": "tiles.json"}],
  "layers": [
    {"type": "tilelayer", "name": "ground", "width": 1, "height": 1, "data": [1]},
    {"type": "objectgroup", "name": "spawns", "objects": [
      {"id": 1, "name": "a", "x": 1, "y": 2, "width": 3, "height": 4},
      {"id": 2, "name": "broken", "x": 0, "y": 0, "polyline": []},
      {"id": 3, "name": "b", "x": 5, "y": 6, "width": 7, "height": 8}
    ]}
  ]
}"#;

#[test]
fn loads_json_and_drops_bad_objects() -> anyhow::Result<()> {
    let path = write_map("map.json", JSON_MAP);
    let config = TilemapConfig::from_json_str(r#"{"game_objects_z": 2.0}"#)?;
    let map = Map::load_with_config(&path, &config)?;

    let spawns = map.object_group(&Groups::Spawns).expect("spawns");
    assert_eq!(spawns.len(), 2);
    assert!(spawns.object_named("a").is_some());
    assert!(spawns.object_named("b").is_some());
    assert!(spawns.object_named("broken").is_none());
    assert!(map.object_group(&Groups::Walls).is_none());

    let ground = map.tile_layer(&Layers::Ground).expect("ground");
    assert_eq!(ground.tile_at(0, 0).map(|t| t.id), Some(0));

    let objects_node = map.scene().find("game-objects").expect("objects node");
    assert_eq!(objects_node.z, 2.0);
    Ok(())
}

#[test]
fn json_object_layer_without_objects_is_fatal() {
    let json = r#"{"tilewidth": 8, "tileheight": 8,
                   "layers": [{"type": "objectgroup", "name": "walls"}]}"#;
    let path = write_map("bare.json", json);
    let err = Map::load(&path).err().expect("load should fail");
    assert!(matches!(err, MapError::MissingObjects { layer } if layer == "walls"));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = temp_dir().join("nope.json");
    assert!(matches!(Map::load(&path), Err(MapError::Io { .. })));
}

#[test]
fn unsupported_extension() {
    match Map::load("foo.txt") {
        Err(MapError::UnsupportedFormat(p)) => assert_eq!(p, "foo.txt"),
        Err(other) => panic!("expected UnsupportedFormat, got {other:?}"),
        Ok(_) => panic!("expected UnsupportedFormat"),
    }
}
