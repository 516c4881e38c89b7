use crate::builder::build_object;
use crate::error::MapError;
use crate::object::TilemapObject;
use crate::raw::RawObjectGroup;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Caller-defined identity of a tile layer or object group.
///
/// Usually an enum with one variant per layer the game knows about.
pub trait LayerKey: Sized {
    /// `None` when the name isn't part of the taxonomy.
    fn from_layer_name(name: &str) -> Option<Self>;
    /// The layer name in the map file.
    fn layer_name(&self) -> &str;
}

/// All objects of one object layer, by name.
///
/// Unnamed objects get a random key. It stays the same for as long as this
/// group lives but is different on every load, so don't persist it.
pub struct ObjectGroup<G> {
    group_id: G,
    name: String,
    objects: HashMap<String, TilemapObject>,
}

impl<G: LayerKey> ObjectGroup<G> {
    /// Build every object in `raw`.
    ///
    /// Objects that fail to build are logged and left out. An unknown layer
    /// name or a missing objects collection fails the whole group.
    pub fn from_raw(raw: RawObjectGroup) -> Result<Self, MapError> {
        let RawObjectGroup { name, objects } = raw;

        let Some(group_id) = G::from_layer_name(&name) else {
            error!(layer = %name, "no object group key for tilemap layer");
            return Err(MapError::UnknownLayer { layer: name });
        };
        let Some(raw_objects) = objects else {
            error!(layer = %name, "object group layer has no objects collection");
            return Err(MapError::MissingObjects { layer: name });
        };

        let total = raw_objects.len();
        let mut built = HashMap::with_capacity(total);
        for (index, raw_object) in raw_objects.iter().enumerate() {
            let object = match build_object(raw_object) {
                Ok(object) => object,
                Err(err) => {
                    warn!(layer = %name, index, error = %err, "dropping tilemap object");
                    continue;
                }
            };
            let key = match object.name() {
                Some(n) => n.to_owned(),
                None => Uuid::new_v4().to_string(),
            };
            if built.insert(key, object).is_some() {
                warn!(layer = %name, index, "duplicate object name, keeping the later object");
            }
        }

        debug!(layer = %name, built = built.len(), total, "built object group");

        Ok(Self {
            group_id,
            name,
            objects: built,
        })
    }
}

impl<G> ObjectGroup<G> {
    pub fn group_id(&self) -> &G {
        &self.group_id
    }

    /// Layer name as written in the map.
    pub fn group_name(&self) -> &str {
        &self.name
    }

    pub fn object_named(&self, name: &str) -> Option<&TilemapObject> {
        self.objects.get(name)
    }

    /// `(key, object)` pairs, in no particular order.
    pub fn objects(&self) -> impl Iterator<Item = (&str, &TilemapObject)> {
        self.objects.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn all_objects(&self) -> impl Iterator<Item = &TilemapObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<G> fmt::Debug for ObjectGroup<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectGroup")
            .field("name", &self.name)
            .field("objects", &self.objects.len())
            .finish()
    }
}
