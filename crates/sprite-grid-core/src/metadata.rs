use tracing::debug;

use crate::model::{LayoutPlan, Placements, SpriteDocument};

/// Assembles the metadata document.
///
/// `image_count` is the number of input records. When two records share a
/// filename the later placement replaces the earlier one in `images`, so
/// `images.len()` can be smaller than `image_count`.
pub fn build_document(plan: &LayoutPlan, placements: &Placements, image_count: usize) -> SpriteDocument {
    let images = placements.by_filename();
    if images.len() != placements.len() {
        for (i, entry) in placements.iter().enumerate() {
            let first = placements
                .iter()
                .position(|e| e.filename == entry.filename);
            if first != Some(i) {
                debug!(filename = %entry.filename, index = i, "filename collision; later entry wins");
            }
        }
    }
    SpriteDocument {
        sprite_width: plan.sheet_width,
        sprite_height: plan.sheet_height,
        grid_size: plan.grid_size,
        image_count,
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlacementEntry;

    #[test]
    fn document_mirrors_plan() {
        let plan = LayoutPlan {
            grid_size: 2,
            cell_width: 60,
            cell_height: 60,
            sheet_width: 120,
            sheet_height: 120,
        };
        let placements = Placements {
            entries: vec![PlacementEntry {
                filename: "a.png".into(),
                x: 0,
                y: 0,
                width: 50,
                height: 40,
            }],
        };
        let doc = build_document(&plan, &placements, 1);
        assert_eq!(doc.sprite_width, 120);
        assert_eq!(doc.sprite_height, 120);
        assert_eq!(doc.grid_size, 2);
        assert_eq!(doc.image_count, 1);
        assert_eq!(doc.images["a.png"].width, 50);
    }
}
