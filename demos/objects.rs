use macroquad::prelude::*;
use macroquad_tiled_objects::{render::draw_objects_debug, LayerKey, Tilemap};
use tracing_subscriber::EnvFilter;

// Object layers this demo knows about; any other object layer fails the load.
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

struct NoTileLayers;

impl LayerKey for NoTileLayers {
    fn from_layer_name(_: &str) -> Option<Self> {
        None
    }

    fn layer_name(&self) -> &str {
        ""
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Objects Example".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/map.tmx".to_owned());
    let map = match Tilemap::<NoTileLayers, Groups>::load(&path) {
        Ok(map) => map,
        Err(err) => {
            eprintln!("failed to load {path}: {err}");
            return;
        }
    };

    for group in [Groups::Spawns, Groups::Walls] {
        if let Some(g) = map.object_group(&group) {
            println!("{}: {} objects", g.group_name(), g.len());
            for object in g.all_objects() {
                println!("  {object}");
            }
        }
    }

    loop {
        clear_background(BLACK);

        draw_objects_debug(&map, vec2(40.0, 60.0), GREEN);

        draw_text("objects example", 20.0, 30.0, 32.0, WHITE);
        next_frame().await;
    }
}
