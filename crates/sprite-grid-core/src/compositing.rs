use std::borrow::Cow;

use image::{DynamicImage, GenericImage, RgbaImage};
use tracing::trace;

use crate::error::{Result, SpriteSheetError};
use crate::model::{ImageRecord, LayoutPlan, Placements};

/// Copy `src` unmodified into `canvas` with its top-left at (dx, dy).
///
/// No scaling or clamping: a source that does not fit entirely inside the
/// canvas is an error and leaves the canvas untouched.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) -> image::ImageResult<()> {
    canvas.copy_from(src, dx, dy)
}

fn as_rgba(image: &DynamicImage) -> Cow<'_, RgbaImage> {
    match image.as_rgba8() {
        Some(rgba) => Cow::Borrowed(rgba),
        None => Cow::Owned(image.to_rgba8()),
    }
}

/// Allocates a fully transparent `sheet_width × sheet_height` RGBA canvas and
/// copies every record onto its placement, in order.
///
/// `records` and `placements` are parallel: entry `i` places record `i`, and
/// a length mismatch is rejected before allocating. The first failed copy
/// aborts composition and the partial canvas is dropped.
pub fn compose_sheet(
    plan: &LayoutPlan,
    records: &[ImageRecord],
    placements: &Placements,
) -> Result<RgbaImage> {
    if records.len() != placements.len() {
        return Err(SpriteSheetError::InvalidConfig(format!(
            "{} records but {} placements",
            records.len(),
            placements.len()
        )));
    }
    let mut canvas = RgbaImage::new(plan.sheet_width, plan.sheet_height);
    for (rec, entry) in records.iter().zip(placements.iter()) {
        let rgba = as_rgba(&rec.image);
        blit_rgba(&rgba, &mut canvas, entry.x, entry.y).map_err(|source| {
            SpriteSheetError::Composition {
                filename: rec.filename.clone(),
                source,
            }
        })?;
        trace!(filename = %rec.filename, x = entry.x, y = entry.y, "blitted");
    }
    Ok(canvas)
}
