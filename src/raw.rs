// src/raw.rs
use std::collections::BTreeMap;

/// Untyped value from a map reader's object dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Text. Every built-in TMX attribute arrives in this form.
    String(String),
    /// Integer custom property
    Int(i64),
    /// Float custom property
    Float(f64),
    /// Nested dictionary (class-typed custom properties)
    Dict(RawProperties),
}

impl RawValue {
    /// Numeric view of the value. Strings are parsed, dictionaries have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::String(s) => s.trim().parse().ok(),
            RawValue::Int(i) => Some(*i as f64),
            RawValue::Float(f) => Some(*f),
            RawValue::Dict(_) => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

/// String-keyed property bag, the shape every raw object arrives in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProperties(BTreeMap<String, RawValue>);

impl RawProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Only string values; numbers are not stringified.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            RawValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.0.get(key)?.as_f64().map(|v| v as f32)
    }

    /// Integer view; floats only count when they have no fractional part.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            RawValue::Int(i) => Some(*i),
            RawValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            RawValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Collapse nested dictionaries into one level, joining keys with `.`.
    pub fn flatten(&self) -> RawProperties {
        let mut out = RawProperties::new();
        flatten_into(&mut out, None, self);
        out
    }
}

fn flatten_into(out: &mut RawProperties, prefix: Option<&str>, props: &RawProperties) {
    for (key, value) in &props.0 {
        let full = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            RawValue::Dict(nested) => flatten_into(out, Some(&full), nested),
            scalar => {
                out.0.insert(full, scalar.clone());
            }
        }
    }
}

impl FromIterator<(String, RawValue)> for RawProperties {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        RawProperties(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RawProperties {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        RawProperties(
            iter.into_iter()
                .map(|(k, v)| (k.to_owned(), RawValue::from(v)))
                .collect(),
        )
    }
}

/// One object layer as a reader reports it.
#[derive(Debug, Clone)]
pub struct RawObjectGroup {
    pub name: String,
    /// `None` when the layer has no objects collection at all.
    pub objects: Option<Vec<RawProperties>>,
}

/// A placed tile: which tileset and which tile inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerTile {
    pub tileset_index: usize,
    pub id: u32,
}

/// Tile grid layer, handed back to callers as-is.
#[derive(Debug, Clone)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` entries; `None` is an empty cell.
    pub tiles: Vec<Option<LayerTile>>,
}

impl TileLayer {
    pub fn tile_at(&self, x: u32, y: u32) -> Option<LayerTile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles
            .get((y * self.width + x) as usize)
            .copied()
            .flatten()
    }
}

/// Canonical, format-agnostic map.
#[derive(Debug, Clone, Default)]
pub struct RawMap {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub object_groups: Vec<RawObjectGroup>,
    pub tile_layers: Vec<TileLayer>,
}
