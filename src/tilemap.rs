use crate::config::TilemapConfig;
use crate::error::MapError;
use crate::group::{LayerKey, ObjectGroup};
use crate::loader::load_raw_map;
use crate::raw::{RawMap, TileLayer};
use crate::scene::{compose, SceneNode};
use macroquad::prelude::*;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, warn};

/// A loaded map with every object layer parsed into typed objects.
///
/// `L` names tile layers, `G` names object groups. Built once, never
/// changed afterwards.
pub struct Tilemap<L, G> {
    width: u32,
    height: u32,
    tile_w: u32,
    tile_h: u32,
    object_groups: HashMap<String, ObjectGroup<G>>,
    tile_layers: HashMap<String, TileLayer>,
    scene: SceneNode,
    _layers: PhantomData<fn() -> L>,
}

impl<L: LayerKey, G: LayerKey> Tilemap<L, G> {
    /// Load a `.tmx` or Tiled `.json` map with the default config.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        Self::load_with_config(path, &TilemapConfig::default())
    }

    pub fn load_with_config<P: AsRef<Path>>(
        path: P,
        config: &TilemapConfig,
    ) -> Result<Self, MapError> {
        let raw = load_raw_map(path.as_ref())?;
        Self::from_raw(raw, config)
    }

    /// Build every object group eagerly. Any fatal group error aborts.
    pub fn from_raw(raw: RawMap, config: &TilemapConfig) -> Result<Self, MapError> {
        let RawMap {
            width,
            height,
            tile_width,
            tile_height,
            object_groups: raw_groups,
            tile_layers: raw_layers,
        } = raw;

        let mut object_groups = HashMap::with_capacity(raw_groups.len());
        for raw_group in raw_groups {
            let group = ObjectGroup::<G>::from_raw(raw_group)?;
            let key = group.group_id().layer_name().to_owned();
            if object_groups.insert(key, group).is_some() {
                warn!("two object layers resolve to the same group, keeping the later one");
            }
        }

        let tile_layers: HashMap<String, TileLayer> = raw_layers
            .into_iter()
            .map(|layer| (layer.name.clone(), layer))
            .collect();

        debug!(
            object_groups = object_groups.len(),
            tile_layers = tile_layers.len(),
            "loaded tilemap"
        );

        Ok(Self {
            width,
            height,
            tile_w: tile_width,
            tile_h: tile_height,
            object_groups,
            tile_layers,
            scene: compose(&config.game_objects_layer, config.game_objects_z),
            _layers: PhantomData,
        })
    }

    pub fn object_group(&self, group: &G) -> Option<&ObjectGroup<G>> {
        self.object_groups.get(group.layer_name())
    }

    /// The reader's tile layer, untouched.
    pub fn tile_layer(&self, layer: &L) -> Option<&TileLayer> {
        self.tile_layers.get(layer.layer_name())
    }
}

impl<L, G> Tilemap<L, G> {
    pub fn object_groups(&self) -> impl Iterator<Item = &ObjectGroup<G>> {
        self.object_groups.values()
    }

    /// Map size in tiles.
    pub fn grid_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Tile size in pixels.
    pub fn tile_size(&self) -> Vec2 {
        vec2(self.tile_w as f32, self.tile_h as f32)
    }

    pub fn scene(&self) -> &SceneNode {
        &self.scene
    }
}
