use image::DynamicImage;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Anything the planner can lay out: a key plus a pixel footprint.
pub trait SpriteSource {
    fn filename(&self) -> &str;
    fn dimensions(&self) -> (u32, u32);
}

/// One decoded input image (filename + pixels). Width and height come from the image itself.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub filename: String,
    pub image: DynamicImage,
}

impl ImageRecord {
    pub fn new(filename: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            filename: filename.into(),
            image,
        }
    }
    pub fn width(&self) -> u32 {
        self.image.width()
    }
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl SpriteSource for ImageRecord {
    fn filename(&self) -> &str {
        &self.filename
    }
    fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// Size-only record for layout without pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutItem {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

impl LayoutItem {
    pub fn new(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            filename: filename.into(),
            width,
            height,
        }
    }
}

impl SpriteSource for LayoutItem {
    fn filename(&self) -> &str {
        &self.filename
    }
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Uniform grid geometry derived from the full input set.
///
/// `sheet_width == grid_size * cell_width` and `sheet_height == grid_size * cell_height`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LayoutPlan {
    pub grid_size: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub sheet_width: u32,
    pub sheet_height: u32,
}

impl LayoutPlan {
    /// Total number of cells (`grid_size²`).
    pub fn cell_count(&self) -> u64 {
        (self.grid_size as u64) * (self.grid_size as u64)
    }

    /// Top-left pixel of the cell at input index `index` (row-major).
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let grid = self.grid_size as usize;
        let row = (index / grid) as u32;
        let col = (index % grid) as u32;
        (col * self.cell_width, row * self.cell_height)
    }
}

/// Where one image landed. `width`/`height` are the image's own size, not the cell size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacementEntry {
    /// Key in [`SpriteDocument::images`]; not repeated inside the entry.
    #[serde(skip)]
    pub filename: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Placements in input order, one per record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placements {
    pub entries: Vec<PlacementEntry>,
}

impl Placements {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacementEntry> {
        self.entries.iter()
    }

    /// Filename-keyed view. A repeated filename keeps its first position but takes the
    /// later entry's value.
    pub fn by_filename(&self) -> IndexMap<String, PlacementEntry> {
        let mut map = IndexMap::with_capacity(self.entries.len());
        for entry in &self.entries {
            map.insert(entry.filename.clone(), entry.clone());
        }
        map
    }
}

/// The metadata artifact written next to the composed sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpriteDocument {
    pub sprite_width: u32,
    pub sprite_height: u32,
    pub grid_size: u32,
    pub image_count: usize,
    #[serde(deserialize_with = "images_with_keys")]
    pub images: IndexMap<String, PlacementEntry>,
}

/// Entries don't carry their filename on the wire; restore it from the map key.
fn images_with_keys<'de, D>(de: D) -> Result<IndexMap<String, PlacementEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut images = IndexMap::<String, PlacementEntry>::deserialize(de)?;
    for (key, entry) in images.iter_mut() {
        entry.filename.clone_from(key);
    }
    Ok(images)
}

/// Statistics about grid utilization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SheetStats {
    pub grid_size: u32,
    /// `grid_size²`.
    pub cell_count: u64,
    /// Input records, including ones whose filename collided.
    pub image_count: usize,
    /// Distinct keys in the document.
    pub unique_keys: usize,
    /// `image_count / cell_count` (0.0 to 1.0).
    pub utilization: f64,
    pub sheet_area: u64,
    /// Sum of image areas over document entries.
    pub used_area: u64,
    /// `used_area / sheet_area` (0.0 to 1.0).
    pub pixel_occupancy: f64,
}

impl SheetStats {
    pub fn new(plan: &LayoutPlan, document: &SpriteDocument) -> Self {
        let cell_count = plan.cell_count();
        let sheet_area = (plan.sheet_width as u64) * (plan.sheet_height as u64);
        let used_area: u64 = document
            .images
            .values()
            .map(|e| (e.width as u64) * (e.height as u64))
            .sum();
        let utilization = if cell_count > 0 {
            document.image_count as f64 / cell_count as f64
        } else {
            0.0
        };
        let pixel_occupancy = if sheet_area > 0 {
            used_area as f64 / sheet_area as f64
        } else {
            0.0
        };
        Self {
            grid_size: plan.grid_size,
            cell_count,
            image_count: document.image_count,
            unique_keys: document.images.len(),
            utilization,
            sheet_area,
            used_area,
            pixel_occupancy,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Grid: {g}x{g}, Images: {}, Cells: {}, Utilization: {:.2}%, Pixel occupancy: {:.2}%",
            self.image_count,
            self.cell_count,
            self.utilization * 100.0,
            self.pixel_occupancy * 100.0,
            g = self.grid_size,
        )
    }

    /// Number of cells left empty.
    pub fn empty_cells(&self) -> u64 {
        self.cell_count.saturating_sub(self.image_count as u64)
    }
}
