//! Input collection: directory walk, extension/glob filtering, decode.

use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use image::{DynamicImage, ImageReader};
use sprite_grid_core::{ImageRecord, SortOrder};
use tracing::debug;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tga", "webp"];

/// A file selected for packing, with the key it will have in the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub key: String,
    pub path: PathBuf,
}

/// Metadata key for `path`: file stem + `.png`, since every input ends up in a PNG sheet.
/// `walk.jpg` and `walk.png` therefore share a key.
pub fn key_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.png")
}

fn build_globs(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("invalid glob '{pat}'"))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

pub fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str())
    )
}

/// Collects image files under `path` (or `path` itself if it is a file), then
/// applies `order`. The returned order is the placement order.
///
/// The walk visits each directory's entries by file name, so files whose keys
/// tie (`icon.bmp`, `icon.png`) keep that order under the stable `NameAsc` sort.
pub fn gather_inputs(
    path: &Path,
    include: &[String],
    exclude: &[String],
    order: SortOrder,
) -> anyhow::Result<Vec<InputFile>> {
    if !path.exists() {
        anyhow::bail!("input {} does not exist", path.display());
    }
    let inc_set = build_globs(include)?;
    let exc_set = build_globs(exclude)?;
    let mut list: Vec<InputFile> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(InputFile {
                key: key_for(path),
                path: path.to_path_buf(),
            });
        }
    } else {
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walk {}", path.display()))?;
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(InputFile {
                    key: key_for(p),
                    path: p.to_path_buf(),
                });
            }
        }
    }
    order.apply(&mut list, |f| f.key.as_str());
    debug!(count = list.len(), ?order, "inputs gathered");
    Ok(list)
}

fn load_image(p: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(p)
        .with_context(|| format!("open {}", p.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("decode {}", p.display()))?;
    Ok(img)
}

#[cfg(feature = "parallel")]
fn map_in_order<T, R, F>(items: &[T], f: F) -> anyhow::Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> anyhow::Result<R> + Sync + Send,
{
    use rayon::prelude::*;
    // indexed collect keeps the original order
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_in_order<T, R, F>(items: &[T], f: F) -> anyhow::Result<Vec<R>>
where
    F: Fn(&T) -> anyhow::Result<R>,
{
    items.iter().map(f).collect()
}

/// Decodes every file, preserving input order. The first failure aborts.
///
/// `on_loaded` is called once per decoded file (from worker threads when the
/// `parallel` feature is on).
pub fn load_records<F>(files: &[InputFile], on_loaded: F) -> anyhow::Result<Vec<ImageRecord>>
where
    F: Fn(&InputFile) + Sync + Send,
{
    map_in_order(files, |f: &InputFile| {
        let image = load_image(&f.path)?;
        on_loaded(f);
        Ok(ImageRecord::new(f.key.clone(), image))
    })
}

/// Reads only the header of every file for layout-only runs.
pub fn read_dimensions(files: &[InputFile]) -> anyhow::Result<Vec<(String, u32, u32)>> {
    files
        .iter()
        .map(|f| {
            let (w, h) = image::image_dimensions(&f.path)
                .with_context(|| format!("read dimensions of {}", f.path.display()))?;
            Ok((f.key.clone(), w, h))
        })
        .collect()
}
