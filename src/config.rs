use serde::Deserialize;

fn default_game_objects_z() -> f32 {
    1.0
}

fn default_game_objects_layer() -> String {
    "game-objects".to_owned()
}

/// Options for building a [`Tilemap`](crate::Tilemap).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TilemapConfig {
    /// Stacking order of the game-objects node; above the ground layers.
    #[serde(default = "default_game_objects_z")]
    pub game_objects_z: f32,
    /// Name of the game-objects node.
    #[serde(default = "default_game_objects_layer")]
    pub game_objects_layer: String,
}

impl Default for TilemapConfig {
    fn default() -> Self {
        Self {
            game_objects_z: default_game_objects_z(),
            game_objects_layer: default_game_objects_layer(),
        }
    }
}

impl TilemapConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = TilemapConfig::from_json_str("{}").expect("config");
        assert_eq!(config, TilemapConfig::default());
        assert_eq!(config.game_objects_z, 1.0);
        assert_eq!(config.game_objects_layer, "game-objects");
    }

    #[test]
    fn overrides_are_read() {
        let config = TilemapConfig::from_json_str(r#"{ "game_objects_z": 5.0, "unknown": 1 }"#)
            .expect("config");
        assert_eq!(config.game_objects_z, 5.0);
        assert_eq!(config.game_objects_layer, "game-objects");
    }
}
