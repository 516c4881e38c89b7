use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal error: the whole map load is aborted.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// File I/O error
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// Tiled JSON parse error
    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// TMX parse error reported by the `tiled` reader
    #[error("TMX parse error in {}: {source}", path.display())]
    Tmx {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        source: tiled::Error,
    },
    /// Map file extension is neither TMX nor JSON
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    /// A custom property declared a type we don't know how to read
    #[error("Unsupported property type '{kind}' for property '{name}'")]
    UnsupportedPropertyType {
        /// Property name
        name: String,
        /// Declared Tiled type
        kind: String,
    },
    /// A tile layer references a gid no tileset covers
    #[error("Invalid gid {gid} in layer '{layer}'")]
    InvalidTileGid {
        /// Layer name
        layer: String,
        /// Offending gid, flip flags cleared
        gid: u32,
    },
    /// An object layer whose name the caller's layer taxonomy doesn't know
    #[error("no object group key matches tilemap layer '{layer}'")]
    UnknownLayer {
        /// Raw layer name from the map
        layer: String,
    },
    /// An object layer without any objects collection (not even an empty one)
    #[error("couldn't get objects array for tilemap object group layer '{layer}'")]
    MissingObjects {
        /// Raw layer name from the map
        layer: String,
    },
}

/// A field an object needs before it can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// `x` and `y`
    Position,
    /// `width` and `height`
    Size,
    /// A non-empty point list
    Points,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Position => write!(f, "position"),
            Parameter::Size => write!(f, "size"),
            Parameter::Points => write!(f, "points"),
        }
    }
}

/// Recoverable error: a single object is dropped from its group.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectError {
    /// A required field for the classified object kind is absent
    #[error("missing required parameter '{0}'")]
    MissingParameter(Parameter),
    /// The builder was never given a kind
    #[error("could not determine the tilemap object's type")]
    UnknownType,
    /// A point string produced no points
    #[error("TMX point string was empty or couldn't be parsed")]
    EmptyPoints,
}
