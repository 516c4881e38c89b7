/// Node in the scene tree a tilemap is composed into.
///
/// Only the skeleton lives here; whoever turns tilemap objects into
/// renderable entities populates the game-objects node.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    /// Stacking order among siblings, higher draws on top.
    pub z: f32,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, z: f32) -> Self {
        Self {
            name: name.into(),
            z,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search by name, including `self`.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

/// `tilemap` → `map` → game-objects node at `objects_z`.
pub(crate) fn compose(objects_layer: &str, objects_z: f32) -> SceneNode {
    SceneNode::new("tilemap", 0.0)
        .with_child(SceneNode::new("map", 0.0).with_child(SceneNode::new(objects_layer, objects_z)))
}
