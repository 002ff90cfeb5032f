//! Declarative tile trees.
//!
//! A template describes a whole tree up front, for example loaded from JSON:
//!
//! ```json
//! {
//!   "width": 800, "height": 600, "stack": "horizontal",
//!   "children": [{ "width": "30%" }, { "type": "svg" }]
//! }
//! ```

use tilez_core::RawConstraints;

/// Constraints of a tile plus the templates of its children.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileTemplate {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub constraints: RawConstraints,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<TileTemplate>,
}

impl TileTemplate {
    pub fn new(constraints: RawConstraints) -> Self {
        Self {
            constraints,
            children: Vec::new(),
        }
    }

    /// Append a child template.
    pub fn with_child(mut self, child: TileTemplate) -> Self {
        self.children.push(child);
        self
    }

    /// Number of tiles in the template, itself included.
    pub fn tile_count(&self) -> usize {
        1 + self.children.iter().map(TileTemplate::tile_count).sum::<usize>()
    }

    /// Parse a template from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the template to pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
