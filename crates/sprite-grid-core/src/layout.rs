use crate::config::SheetConfig;
use crate::error::{Result, SpriteSheetError};
use crate::model::{LayoutPlan, SpriteSource};

/// Cells per row/column for `n` images: `ceil(sqrt(n))`, exact for every `usize`.
pub fn grid_size(n: usize) -> u32 {
    if n <= 1 {
        return n as u32;
    }
    let mut g = (n as f64).sqrt().ceil() as u64;
    // float sqrt can be off by one near large perfect squares
    while g > 1 && (g - 1) * (g - 1) >= n as u64 {
        g -= 1;
    }
    while g * g < n as u64 {
        g += 1;
    }
    g as u32
}

/// Computes the uniform grid for `records`.
///
/// Every cell is `max(width) + padding` by `max(height) + padding`; the sheet is
/// `grid_size` cells on each side. The only failure is a sheet side larger than
/// `cfg.max_dimension`, checked once against the whole set.
pub fn plan_layout<S: SpriteSource>(records: &[S], cfg: &SheetConfig) -> Result<LayoutPlan> {
    if records.is_empty() {
        return Err(SpriteSheetError::EmptyInputSet);
    }
    let grid = grid_size(records.len());
    let (max_w, max_h) = records
        .iter()
        .map(|r| r.dimensions())
        .fold((0u32, 0u32), |(mw, mh), (w, h)| (mw.max(w), mh.max(h)));

    let cell_w = max_w as u64 + cfg.padding as u64;
    let cell_h = max_h as u64 + cfg.padding as u64;
    let sheet_w = grid as u64 * cell_w;
    let sheet_h = grid as u64 * cell_h;

    if sheet_w > cfg.max_dimension as u64 || sheet_h > cfg.max_dimension as u64 {
        return Err(SpriteSheetError::SizeExceeded {
            sheet_width: sheet_w,
            sheet_height: sheet_h,
            max_dimension: cfg.max_dimension,
            grid_size: grid,
            image_count: records.len(),
        });
    }

    // all four fit in u32: each is bounded by max_dimension
    Ok(LayoutPlan {
        grid_size: grid,
        cell_width: cell_w as u32,
        cell_height: cell_h as u32,
        sheet_width: sheet_w as u32,
        sheet_height: sheet_h as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayoutItem;

    #[test]
    fn grid_size_table() {
        assert_eq!(grid_size(1), 1);
        for n in 2..=4 {
            assert_eq!(grid_size(n), 2, "n={n}");
        }
        for n in 5..=9 {
            assert_eq!(grid_size(n), 3, "n={n}");
        }
        for n in 10..=16 {
            assert_eq!(grid_size(n), 4, "n={n}");
        }
        assert_eq!(grid_size(17), 5);
    }

    #[test]
    fn grid_size_exact_near_large_squares() {
        let g: u64 = 3_037_000_499;
        let sq = (g * g) as usize;
        assert_eq!(grid_size(sq) as u64, g);
        assert_eq!(grid_size(sq + 1) as u64, g + 1);
        assert_eq!(grid_size(sq - 1) as u64, g);
    }

    #[test]
    fn cells_use_max_footprint_plus_padding() {
        let items = vec![
            LayoutItem::new("a", 10, 40),
            LayoutItem::new("b", 30, 5),
            LayoutItem::new("c", 7, 7),
        ];
        let cfg = SheetConfig::builder().padding(3).build();
        let plan = plan_layout(&items, &cfg).unwrap();
        assert_eq!(plan.grid_size, 2);
        assert_eq!(plan.cell_width, 33);
        assert_eq!(plan.cell_height, 43);
        assert_eq!(plan.sheet_width, 66);
        assert_eq!(plan.sheet_height, 86);
    }

    #[test]
    fn sheet_exactly_at_max_is_accepted() {
        let items = vec![LayoutItem::new("a", 64, 64); 4];
        let cfg = SheetConfig::builder().max_dimension(128).build();
        let plan = plan_layout(&items, &cfg).unwrap();
        assert_eq!((plan.sheet_width, plan.sheet_height), (128, 128));
    }

    #[test]
    fn one_axis_over_max_fails() {
        let items = vec![LayoutItem::new("a", 10, 65), LayoutItem::new("b", 10, 10)];
        let cfg = SheetConfig::builder().max_dimension(128).build();
        match plan_layout(&items, &cfg) {
            Err(SpriteSheetError::SizeExceeded {
                sheet_width,
                sheet_height,
                max_dimension,
                grid_size,
                image_count,
            }) => {
                assert_eq!(sheet_width, 20);
                assert_eq!(sheet_height, 130);
                assert_eq!(max_dimension, 128);
                assert_eq!(grid_size, 2);
                assert_eq!(image_count, 2);
            }
            other => panic!("expected SizeExceeded, got {other:?}"),
        }
    }

    #[test]
    fn huge_footprint_does_not_overflow() {
        let items = vec![LayoutItem::new("a", u32::MAX, 1), LayoutItem::new("b", 1, 1)];
        let cfg = SheetConfig::builder().padding(u32::MAX).build();
        assert!(matches!(
            plan_layout(&items, &cfg),
            Err(SpriteSheetError::SizeExceeded { .. })
        ));
    }
}
