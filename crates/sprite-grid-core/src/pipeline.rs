use crate::compositing::compose_sheet;
use crate::config::SheetConfig;
use crate::error::{Result, SpriteSheetError};
use crate::layout::plan_layout;
use crate::metadata::build_document;
use crate::model::{ImageRecord, LayoutItem, LayoutPlan, SheetStats, SpriteDocument, SpriteSource};
use crate::observer::{NoopObserver, PackObserver, Stage};
use crate::placement::assign_placements;
use image::RgbaImage;
use tracing::{debug, instrument};

/// Composed canvas plus the metadata describing it.
pub struct SheetOutput {
    pub plan: LayoutPlan,
    pub document: SpriteDocument,
    pub canvas: RgbaImage,
}

impl SheetOutput {
    pub fn stats(&self) -> SheetStats {
        SheetStats::new(&self.plan, &self.document)
    }
}

/// Layout-only result: no pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOutput {
    pub plan: LayoutPlan,
    pub document: SpriteDocument,
}

impl LayoutOutput {
    pub fn stats(&self) -> SheetStats {
        SheetStats::new(&self.plan, &self.document)
    }
}

fn check_records<S: SpriteSource>(records: &[S]) -> Result<()> {
    if records.is_empty() {
        return Err(SpriteSheetError::EmptyInputSet);
    }
    for r in records {
        let (width, height) = r.dimensions();
        if width == 0 || height == 0 {
            return Err(SpriteSheetError::InvalidImage {
                filename: r.filename().to_string(),
                width,
                height,
            });
        }
    }
    Ok(())
}

/// Packs `records` into one uniform-grid sheet.
///
/// Records are placed row-major in the order given; sort them first if the
/// order came from a directory listing. Any failure returns before a canvas or
/// document is produced.
pub fn pack_sheet(records: Vec<ImageRecord>, cfg: &SheetConfig) -> Result<SheetOutput> {
    pack_sheet_with_observer(records, cfg, &mut NoopObserver)
}

#[instrument(skip_all, fields(records = records.len()))]
/// Same as [`pack_sheet`], notifying `observer` after each stage.
pub fn pack_sheet_with_observer(
    records: Vec<ImageRecord>,
    cfg: &SheetConfig,
    observer: &mut dyn PackObserver,
) -> Result<SheetOutput> {
    cfg.validate()?;
    check_records(&records)?;

    let plan = plan_layout(&records, cfg)?;
    debug!(?plan, "layout planned");
    observer.on_stage(Stage::Planned(plan));

    let placements = assign_placements(&records, &plan);
    observer.on_stage(Stage::Placed {
        count: placements.len(),
    });

    let canvas = compose_sheet(&plan, &records, &placements)?;
    debug!(width = canvas.width(), height = canvas.height(), "sheet composed");
    observer.on_stage(Stage::Composed {
        width: canvas.width(),
        height: canvas.height(),
    });

    let document = build_document(&plan, &placements, records.len());
    observer.on_stage(Stage::Documented {
        image_count: document.image_count,
        unique_keys: document.images.len(),
    });

    Ok(SheetOutput {
        plan,
        document,
        canvas,
    })
}

#[instrument(skip_all, fields(records = inputs.len()))]
/// Computes the plan and document for `(filename, width, height)` triples without compositing.
/// Placements are identical to what [`pack_sheet`] produces for images of the same sizes.
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: &SheetConfig,
) -> Result<LayoutOutput> {
    cfg.validate()?;
    let items: Vec<LayoutItem> = inputs
        .into_iter()
        .map(|(k, w, h)| LayoutItem::new(k, w, h))
        .collect();
    check_records(&items)?;

    let plan = plan_layout(&items, cfg)?;
    debug!(?plan, "layout planned");
    let placements = assign_placements(&items, &plan);
    let document = build_document(&plan, &placements, items.len());
    Ok(LayoutOutput { plan, document })
}
