use crate::error::Result;
use crate::model::{SheetStats, SpriteDocument};
use serde_json::{Value, json};

/// Serialize the document as
/// `{ spriteWidth, spriteHeight, gridSize, imageCount, images: { name: {x, y, width, height} } }`.
/// Keys in `images` keep first-insertion order.
pub fn to_json(doc: &SpriteDocument) -> Value {
    let mut images = serde_json::Map::new();
    for (name, e) in &doc.images {
        images.insert(
            name.clone(),
            json!({"x": e.x, "y": e.y, "width": e.width, "height": e.height}),
        );
    }
    json!({
        "spriteWidth": doc.sprite_width,
        "spriteHeight": doc.sprite_height,
        "gridSize": doc.grid_size,
        "imageCount": doc.image_count,
        "images": images,
    })
}

/// Pretty-printed JSON text of [`to_json`].
pub fn to_json_string(doc: &SpriteDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json(doc))?)
}

/// Stats as a flat JSON object (for `--export-stats`).
pub fn stats_to_json(stats: &SheetStats) -> Value {
    json!({
        "gridSize": stats.grid_size,
        "cellCount": stats.cell_count,
        "imageCount": stats.image_count,
        "uniqueKeys": stats.unique_keys,
        "emptyCells": stats.empty_cells(),
        "utilization": stats.utilization,
        "sheetArea": stats.sheet_area,
        "usedArea": stats.used_area,
        "pixelOccupancy": stats.pixel_occupancy,
    })
}
