use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use atlas_stitch_core::adjacency::{ADJACENCIES, resolve};
use atlas_stitch_core::export::to_json;
use atlas_stitch_core::prelude::*;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use image::ImageReader;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "atlas-stitch",
    about = "Stitch sprites into a texture atlas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show a progress bar (disable with --progress false or --quiet)
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
    /// Stitch a directory of sprites into an atlas (PNG + JSON lookup)
    Stitch(StitchArgs),
    /// Resolve neighbour patterns against the blob variant table
    Variants(VariantsArgs),
}

#[derive(Parser, Debug, Clone)]
struct StitchArgs {
    // Input/Output
    /// Input directory (PNG sprites with optional JSON metadata sidecars)
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (overrides layout options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Square tile size in pixels
    #[arg(long, default_value_t = 32, help_heading = "Layout")]
    tile_size: u32,
    /// Extract sources in parallel (requires the core feature `parallel`)
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    parallel: bool,
}

#[derive(Parser, Debug, Clone)]
struct VariantsArgs {
    /// Neighbour pattern, 8 characters of 0/1 in NW N NE W E SW S SE order
    #[arg(long, conflicts_with = "all")]
    pattern: Option<String>,
    /// Print the whole rule table
    #[arg(long, default_value_t = false)]
    all: bool,
}

/// Subset of `StitchArgs` accepted from a YAML file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    tile_size: Option<u32>,
    parallel: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Stitch(args) => cmd_stitch(args, cli.progress && !cli.quiet),
        Commands::Variants(args) => cmd_variants(args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn cmd_stitch(args: StitchArgs, progress: bool) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;

    let include = build_globset(&args.include).context("invalid --include pattern")?;
    let exclude = build_globset(&args.exclude).context("invalid --exclude pattern")?;
    let files = collect_sprites(&args.input, include.as_ref(), exclude.as_ref())?;
    if files.is_empty() {
        anyhow::bail!("no sprites found under {}", args.input.display());
    }
    info!(count = files.len(), input = %args.input.display(), "loading sprites");

    let bar = if progress {
        let style = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .context("progress template")?;
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(style);
        Some(bar)
    } else {
        None
    };

    let mut sources = Vec::with_capacity(files.len());
    for (path, id) in files {
        if let Some(bar) = &bar {
            bar.set_message(id.clone());
            bar.inc(1);
        }
        let image = ImageReader::open(&path)
            .with_context(|| format!("opening {}", path.display()))?
            .decode()
            .with_context(|| format!("decoding {}", path.display()))?;
        let meta = load_meta(&path)
            .with_context(|| format!("reading metadata for {}", path.display()))?;
        debug!(id = %id, has_meta = !meta.is_empty(), "queued sprite");
        sources.push(SourceSprite { id, image, meta });
    }
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    let atlas = build_atlas(sources, &cfg).context("stitching atlas")?;
    info!("{}", atlas.stats().summary());

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let png_path = args.out_dir.join(format!("{}.png", args.name));
    let json_path = args.out_dir.join(format!("{}.json", args.name));

    atlas
        .page()
        .save(&png_path)
        .with_context(|| format!("writing {}", png_path.display()))?;
    let doc = serde_json::to_string_pretty(&to_json(&atlas))?;
    fs::write(&json_path, doc).with_context(|| format!("writing {}", json_path.display()))?;

    info!(png = %png_path.display(), json = %json_path.display(), "atlas written");
    Ok(())
}

fn load_config(args: &StitchArgs) -> anyhow::Result<StitchConfig> {
    let mut cfg = StitchConfig::builder()
        .tile_size(args.tile_size)
        .parallel(args.parallel)
        .build();
    if let Some(path) = &args.config {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file: FileConfig =
            serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        if let Some(tile_size) = file.tile_size {
            cfg.tile_size = tile_size;
        }
        if let Some(parallel) = file.parallel {
            cfg.parallel = parallel;
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for p in patterns {
        builder.add(Glob::new(p)?);
    }
    Ok(Some(builder.build()?))
}

/// Walks `input` for PNG sprites and derives their identifiers: the
/// relative path without extension, `/`-separated. Sorted by identifier
/// so the atlas layout is stable across platforms.
fn collect_sprites(
    input: &Path,
    include: Option<&GlobSet>,
    exclude: Option<&GlobSet>,
) -> anyhow::Result<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_png = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }
        let rel = path.strip_prefix(input).unwrap_or(path);
        if let Some(include) = include {
            if !include.is_match(rel) {
                continue;
            }
        }
        if let Some(exclude) = exclude {
            if exclude.is_match(rel) {
                continue;
            }
        }
        let id = rel
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        files.push((path.to_path_buf(), id));
    }
    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

fn load_meta(sprite_path: &Path) -> anyhow::Result<SpriteMeta> {
    let sidecar = sprite_path.with_extension("json");
    if !sidecar.exists() {
        return Ok(SpriteMeta::default());
    }
    let text = fs::read_to_string(&sidecar)?;
    Ok(serde_json::from_str(&text)?)
}

fn cmd_variants(args: VariantsArgs) -> anyhow::Result<()> {
    if args.all {
        println!("idx  adjacency  ignore");
        for (index, rule) in ADJACENCIES.iter().enumerate() {
            println!("{index:>3}  {:08b}   {:08b}", rule.adjacency, rule.ignore);
        }
        return Ok(());
    }

    let Some(pattern) = args.pattern else {
        anyhow::bail!("pass --pattern <8 bits> or --all");
    };
    let neighbors = parse_pattern(&pattern)?;
    match resolve(neighbors) {
        Some(variant) => println!("{variant}"),
        None => anyhow::bail!("no rule matched pattern {pattern}"),
    }
    Ok(())
}

fn parse_pattern(pattern: &str) -> anyhow::Result<[bool; 8]> {
    let chars: Vec<char> = pattern.chars().collect();
    if chars.len() != 8 || !chars.iter().all(|c| *c == '0' || *c == '1') {
        anyhow::bail!("pattern must be exactly 8 characters of 0/1, got {pattern:?}");
    }
    let mut neighbors = [false; 8];
    for (j, c) in chars.iter().enumerate() {
        neighbors[j] = *c == '1';
    }
    Ok(neighbors)
}
