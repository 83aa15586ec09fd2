use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordering applied to input records before they reach the planner.
///
/// The core never reorders on its own: placement is row-major over whatever
/// sequence it is handed. Callers that need reproducible sheets regardless of
/// directory-listing order apply `NameAsc` up front via [`SortOrder::apply`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the caller's order.
    None,
    /// Byte-wise ascending by key; stable for equal keys.
    #[default]
    NameAsc,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "name_asc" | "name" => Ok(Self::NameAsc),
            _ => Err(()),
        }
    }
}

impl SortOrder {
    /// Sorts `items` in place by the key returned from `key`.
    pub fn apply<T, F>(self, items: &mut [T], key: F)
    where
        F: Fn(&T) -> &str,
    {
        match self {
            SortOrder::None => {}
            SortOrder::NameAsc => items.sort_by(|a, b| key(a).cmp(key(b))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetConfig {
    /// Pixels added to the largest image width/height to form one cell.
    #[serde(default)]
    pub padding: u32,
    /// Upper bound for both sheet width and sheet height.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// Output base name (`<name>.png` / `<name>.json`).
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            padding: 0,
            max_dimension: default_max_dimension(),
            name: default_name(),
        }
    }
}

impl SheetConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - `max_dimension` is zero
    /// - `name` is empty or contains a path separator
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SpriteSheetError;

        if self.max_dimension == 0 {
            return Err(SpriteSheetError::InvalidConfig(
                "max_dimension must be greater than zero".into(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(SpriteSheetError::InvalidConfig(
                "name must not be empty".into(),
            ));
        }
        if self.name.contains(['/', '\\']) {
            return Err(SpriteSheetError::InvalidConfig(format!(
                "name '{}' must not contain path separators",
                self.name
            )));
        }
        Ok(())
    }

    /// File name of the composed image artifact.
    pub fn png_file_name(&self) -> String {
        format!("{}.png", self.name)
    }

    /// File name of the metadata artifact.
    pub fn json_file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    /// Create a fluent builder for `SheetConfig`.
    pub fn builder() -> SheetConfigBuilder {
        SheetConfigBuilder::new()
    }
}

fn default_max_dimension() -> u32 {
    4096
}
fn default_name() -> String {
    "sprite".into()
}

/// Builder for `SheetConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct SheetConfigBuilder {
    cfg: SheetConfig,
}

impl SheetConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: SheetConfig::default(),
        }
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn max_dimension(mut self, v: u32) -> Self {
        self.cfg.max_dimension = v;
        self
    }
    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.cfg.name = v.into();
        self
    }
    pub fn build(self) -> SheetConfig {
        self.cfg
    }
}
