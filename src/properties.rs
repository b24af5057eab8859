//! Build properties: the immutable, case-insensitive key/value
//! configuration exposed to generators.
//!
//! CLI-supplied pairs are namespaced with [`PROPERTY_PREFIX`] before they
//! become visible, so generators can distinguish harness-supplied
//! configuration from any other channel. Generators key their lookups on
//! the prefixed form (e.g. `build_property.greeting`).

use serde::Serialize;
use std::collections::HashMap;

/// Fixed namespace prefix applied to every CLI-supplied property.
pub const PROPERTY_PREFIX: &str = "build_property.";

/// Immutable key/value store with case-insensitive keys.
///
/// Keys are stored ASCII-lowercased; lookups lowercase the query, so
/// `Build_Property.Greeting` and `build_property.greeting` are the same
/// key. Duplicate keys overwrite: last insertion wins.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildProperties {
    map: HashMap<String, String>,
}

impl BuildProperties {
    /// Build from already-namespaced `(key, value)` pairs. Later
    /// duplicates of the same (case-folded) key overwrite earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = HashMap::new();
        for (key, value) in pairs {
            map.insert(key.as_ref().to_ascii_lowercase(), value.into());
        }
        Self { map }
    }

    /// Case-insensitive lookup by full (namespaced) key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Parse command-line `KEY=VALUE` property arguments.
///
/// Well-formed entries (exactly one `=`) are namespaced with
/// [`PROPERTY_PREFIX`] and collected; malformed entries are dropped and
/// produce a warning string naming the offending argument. Never fatal.
pub fn parse_property_args(args: &[String]) -> (BuildProperties, Vec<String>) {
    let mut pairs = Vec::new();
    let mut warnings = Vec::new();

    for arg in args {
        let segments: Vec<&str> = arg.split('=').collect();
        if segments.len() != 2 {
            warnings.push(format!("Ignoring invalid property format: {}", arg));
            continue;
        }
        pairs.push((format!("{}{}", PROPERTY_PREFIX, segments[0]), segments[1].to_string()));
    }

    (BuildProperties::from_pairs(pairs), warnings)
}
