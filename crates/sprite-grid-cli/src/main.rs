use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use image::ImageFormat;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use sprite_grid_core::{
    PackObserver, SheetConfig, SheetStats, SortOrder, SpriteDocument, SpriteSheetError, Stage,
    pack_layout, pack_sheet_with_observer, stats_to_json, to_json_string,
};
use tracing::{debug, error, info};

mod collect;

use collect::{gather_inputs, load_records, read_dimensions};

#[derive(Parser, Debug)]
#[command(
    name = "sprite-grid",
    about = "Pack images into a uniform-grid sprite sheet",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into <name>.png + <name>.json
    Pack(PackArgs),
    /// Layout-only export (no PNG): read image headers and write <name>.json
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = ".", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Sheet base name (files will be name.png/.json)
    #[arg(short, long, default_value = "sprite", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (keys present in the file override CLI values)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Pixels added to the largest image size to form one grid cell
    #[arg(long, default_value_t = 0, help_heading = "Layout")]
    padding: u32,
    /// Maximum sheet width/height in pixels
    #[arg(long = "max-size", default_value_t = 4096, help_heading = "Layout")]
    max_dimension: u32,
    /// Placement order: name_asc | none (none keeps directory-walk order, which is platform dependent)
    #[arg(long, default_value = "name_asc", help_heading = "Layout")]
    sort_order: String,

    // Export
    /// Export grid stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let show_progress = cli.progress && !cli.quiet;
    let res = match &cli.command {
        Commands::Pack(args) => run_pack(args, show_progress),
        Commands::Layout(args) => run_layout(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Maps core error kinds to distinct exit codes; anything else is 1.
fn exit_code_for(e: &anyhow::Error) -> u8 {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<SpriteSheetError>())
        .map(|se| se.kind().exit_code() as u8)
        .unwrap_or(1)
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    padding: Option<u32>,
    max_dimension: Option<u32>,
    name: Option<String>,
    sort_order: Option<String>,
}

impl YamlConfig {
    fn apply(self, mut cfg: SheetConfig, order: &mut SortOrder) -> SheetConfig {
        if let Some(v) = self.padding {
            cfg.padding = v;
        }
        if let Some(v) = self.max_dimension {
            cfg.max_dimension = v;
        }
        if let Some(v) = self.name {
            cfg.name = v;
        }
        if let Some(v) = self.sort_order {
            *order = v.parse().unwrap_or(*order);
        }
        cfg
    }
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown sort order: {}", s))
}

/// Merges CLI flags with an optional YAML file. Returns `None` when the config was only printed.
fn resolve_config(cli: &PackArgs) -> anyhow::Result<Option<(SheetConfig, SortOrder)>> {
    let mut order = parse_sort_order(&cli.sort_order)?;
    let mut cfg = SheetConfig {
        padding: cli.padding,
        max_dimension: cli.max_dimension,
        name: cli.name.clone(),
    };
    if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg = y.apply(cfg, &mut order);
    }
    cfg.validate()?;

    if cli.print_config {
        match cli.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(None);
    }
    Ok(Some((cfg, order)))
}

/// Spinner + log line after each core stage.
struct StageProgress {
    bar: Option<ProgressBar>,
}

impl StageProgress {
    fn new(show: bool) -> Self {
        let bar = show.then(|| {
            let b = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {wide_msg}") {
                b.set_style(style);
            }
            b
        });
        Self { bar }
    }

    fn finish(&self) {
        if let Some(b) = &self.bar {
            b.finish_and_clear();
        }
    }
}

impl PackObserver for StageProgress {
    fn on_stage(&mut self, stage: Stage) {
        match stage {
            Stage::Planned(plan) => info!(
                grid = plan.grid_size,
                cell_w = plan.cell_width,
                cell_h = plan.cell_height,
                sheet_w = plan.sheet_width,
                sheet_h = plan.sheet_height,
                "layout planned"
            ),
            Stage::Placed { count } => info!(count, "images placed"),
            Stage::Composed { width, height } => info!(width, height, "sheet composed"),
            Stage::Documented {
                image_count,
                unique_keys,
            } => {
                if unique_keys < image_count {
                    debug!(image_count, unique_keys, "some filenames collided; later images win");
                }
            }
        }
        if let Some(b) = &self.bar {
            b.set_message(stage.label());
            b.tick();
        }
    }
}

fn load_bar(len: usize, show: bool) -> Option<ProgressBar> {
    show.then(|| {
        let b = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        ) {
            b.set_style(style);
        }
        b
    })
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let Some((cfg, order)) = resolve_config(cli)? else {
        return Ok(());
    };

    let files = gather_inputs(&cli.input, &cli.include, &cli.exclude, order)?;
    info!(count = files.len(), "found input images");

    let bar = load_bar(files.len(), show_progress);
    let records = load_records(&files, |f| {
        if let Some(b) = &bar {
            b.set_message(f.key.clone());
            b.inc(1);
        }
    })?;
    if let Some(b) = &bar {
        b.finish_and_clear();
    }

    let mut progress = StageProgress::new(show_progress);
    let result = pack_sheet_with_observer(records, &cfg, &mut progress);
    progress.finish();
    let out = result?;

    let stats = out.stats();
    info!(summary = %stats.summary(), "stats");

    // encode both artifacts before touching the filesystem
    let mut png = Cursor::new(Vec::new());
    out.canvas
        .write_to(&mut png, ImageFormat::Png)
        .map_err(SpriteSheetError::from)?;
    let json = to_json_string(&out.document)?;

    if cli.dry_run {
        println!("{}", stats.summary());
        return Ok(());
    }
    let (png_path, json_path) = write_artifacts(&cli.out_dir, &cfg, png.get_ref(), &json)?;
    info!(?png_path, ?json_path, images = out.document.image_count, "sprite sheet written");
    export_stats(cli.export_stats.as_deref(), &stats)?;
    Ok(())
}

fn run_layout(cli: &PackArgs) -> anyhow::Result<()> {
    let Some((cfg, order)) = resolve_config(cli)? else {
        return Ok(());
    };
    let files = gather_inputs(&cli.input, &cli.include, &cli.exclude, order)?;
    let dims = read_dimensions(&files)?;
    let out = pack_layout(dims, &cfg)?;
    let stats = out.stats();
    info!(summary = %stats.summary(), "stats");

    if cli.dry_run {
        println!("{}", stats.summary());
        return Ok(());
    }
    let json_path = write_document(&cli.out_dir, &cfg, &out.document)?;
    info!(?json_path, images = out.document.image_count, "layout written");
    export_stats(cli.export_stats.as_deref(), &stats)?;
    Ok(())
}

fn write_artifacts(
    out_dir: &Path,
    cfg: &SheetConfig,
    png: &[u8],
    json: &str,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create out_dir {}", out_dir.display()))?;
    let png_path = out_dir.join(cfg.png_file_name());
    let json_path = out_dir.join(cfg.json_file_name());
    fs::write(&png_path, png).with_context(|| format!("write {}", png_path.display()))?;
    if let Err(e) = fs::write(&json_path, json) {
        // don't leave a sheet without its metadata
        let _ = fs::remove_file(&png_path);
        return Err(e).with_context(|| format!("write {}", json_path.display()));
    }
    Ok((png_path, json_path))
}

fn write_document(out_dir: &Path, cfg: &SheetConfig, doc: &SpriteDocument) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create out_dir {}", out_dir.display()))?;
    let json_path = out_dir.join(cfg.json_file_name());
    fs::write(&json_path, to_json_string(doc)?)
        .with_context(|| format!("write {}", json_path.display()))?;
    Ok(json_path)
}

fn export_stats(path: Option<&Path>, stats: &SheetStats) -> anyhow::Result<()> {
    if let Some(stats_path) = path {
        fs::write(stats_path, serde_json::to_string_pretty(&stats_to_json(stats))?)
            .with_context(|| format!("write {}", stats_path.display()))?;
        info!(?stats_path, "stats exported");
    }
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
