//! Core library for packing images into a uniform-grid sprite sheet.
//!
//! - Planner: `ceil(sqrt(n))` cells per side, every cell sized to the largest image plus padding
//! - Placement: row-major in input order; entries keep each image's own size
//! - Pipeline: `pack_sheet` takes in-memory images and returns one RGBA canvas + a `SpriteDocument`
//! - `pack_layout` does the same from sizes alone, without pixels.
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use sprite_grid_core::{ImageRecord, SheetConfig, pack_sheet, to_json_string};
//! # fn main() -> anyhow::Result<()> {
//! let records = vec![
//!   ImageRecord::new("a.png", ImageReader::open("a.png")?.decode()?),
//!   ImageRecord::new("b.png", ImageReader::open("b.png")?.decode()?),
//! ];
//! let cfg = SheetConfig::builder().padding(2).build();
//! let out = pack_sheet(records, &cfg)?;
//! out.canvas.save("sprite.png")?;
//! std::fs::write("sprite.json", to_json_string(&out.document)?)?;
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod metadata;
pub mod model;
pub mod observer;
pub mod pipeline;
pub mod placement;

pub use compositing::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use layout::*;
pub use metadata::*;
pub use model::*;
pub use observer::*;
pub use pipeline::*;
pub use placement::*;

/// Convenience prelude for common types and functions.
/// Importing `sprite_grid_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{SheetConfig, SheetConfigBuilder, SortOrder};
    pub use crate::error::{ErrorKind, SpriteSheetError};
    pub use crate::model::{
        ImageRecord, LayoutItem, LayoutPlan, PlacementEntry, Placements, SheetStats,
        SpriteDocument, SpriteSource,
    };
    pub use crate::observer::{NoopObserver, PackObserver, Stage};
    pub use crate::{
        LayoutOutput, SheetOutput, assign_placements, build_document, compose_sheet, grid_size,
        pack_layout, pack_sheet, pack_sheet_with_observer, plan_layout, to_json, to_json_string,
    };
}
