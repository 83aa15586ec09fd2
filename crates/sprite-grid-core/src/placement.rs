use crate::model::{LayoutPlan, PlacementEntry, Placements, SpriteSource};

/// Assigns each record to a cell in input order: index `i` goes to
/// row `i / grid_size`, column `i % grid_size`.
///
/// Entries carry the record's own width/height; the cell only fixes the offset.
pub fn assign_placements<S: SpriteSource>(records: &[S], plan: &LayoutPlan) -> Placements {
    let entries = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let (x, y) = plan.cell_origin(i);
            let (width, height) = rec.dimensions();
            PlacementEntry {
                filename: rec.filename().to_string(),
                x,
                y,
                width,
                height,
            }
        })
        .collect();
    Placements { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::layout::plan_layout;
    use crate::model::LayoutItem;
    use std::collections::HashSet;

    #[test]
    fn placement_is_a_bijection_onto_cells() {
        let items: Vec<LayoutItem> = (0..11)
            .map(|i| LayoutItem::new(format!("img_{i}"), 5 + i, 3 + (i % 4)))
            .collect();
        let cfg = SheetConfig::builder().padding(2).build();
        let plan = plan_layout(&items, &cfg).unwrap();
        let placements = assign_placements(&items, &plan);

        assert_eq!(placements.len(), items.len());
        let mut seen = HashSet::new();
        for (i, (entry, item)) in placements.iter().zip(&items).enumerate() {
            assert_eq!(entry.filename, item.filename);
            assert_eq!((entry.width, entry.height), (item.width, item.height));
            assert_eq!(entry.x % plan.cell_width, 0);
            assert_eq!(entry.y % plan.cell_height, 0);
            let col = entry.x / plan.cell_width;
            let row = entry.y / plan.cell_height;
            assert_eq!(row as usize, i / plan.grid_size as usize);
            assert_eq!(col as usize, i % plan.grid_size as usize);
            assert!(seen.insert((row, col)), "cell reused at index {i}");
        }
    }

    #[test]
    fn swapping_input_order_swaps_cells() {
        let a = LayoutItem::new("a", 8, 8);
        let b = LayoutItem::new("b", 8, 8);
        let cfg = SheetConfig::default();
        let ab = [a.clone(), b.clone()];
        let ba = [b, a];
        let p1 = assign_placements(&ab, &plan_layout(&ab, &cfg).unwrap());
        let p2 = assign_placements(&ba, &plan_layout(&ba, &cfg).unwrap());
        assert_eq!(p1.by_filename()["a"].x, 0);
        assert_eq!(p2.by_filename()["a"].x, 8);
    }
}
