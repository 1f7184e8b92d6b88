use crate::builder::{AtlasBuilder, SpriteFrames, missing_texture};
use crate::compositing;
use crate::config::StitchConfig;
use crate::error::{Result, StitchError};
use crate::metadata::SpriteMeta;
use crate::model::{Atlas, AtlasEntry, Rect};
use image::{DynamicImage, RgbaImage};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Identifier of the placeholder entry `build_atlas` registers first.
pub const MISSING_ID: &str = "missing";

/// In-memory sprite to extract (identifier + decoded image + metadata).
pub struct SourceSprite {
    pub id: String,
    pub image: DynamicImage,
    pub meta: SpriteMeta,
}

/// Extracts frames from every source, in submission order.
///
/// Each source runs through all registered processors; a source no
/// processor claimed is registered as a single static entry so it still
/// lands in the atlas. With the `parallel` feature and `cfg.parallel`,
/// sources are extracted on a rayon pool and the results collected back
/// into submission order, keeping the entry list (and therefore the
/// fallback entry) deterministic.
pub fn extract_all(sources: Vec<SourceSprite>, cfg: &StitchConfig) -> Result<Vec<SpriteFrames>> {
    cfg.validate()?;

    #[cfg(feature = "parallel")]
    {
        if cfg.parallel {
            let nested: Vec<Vec<SpriteFrames>> = sources
                .into_par_iter()
                .map(|s| extract_one(s, cfg))
                .collect::<Result<_>>()?;
            return Ok(nested.into_iter().flatten().collect());
        }
    }

    let mut out = Vec::new();
    for source in sources {
        out.extend(extract_one(source, cfg)?);
    }
    Ok(out)
}

fn extract_one(source: SourceSprite, cfg: &StitchConfig) -> Result<Vec<SpriteFrames>> {
    let rgba = source.image.to_rgba8();
    let mut builder = AtlasBuilder::new(cfg.tile_size);
    builder.process(&source.id, &rgba, &source.meta)?;
    if builder.is_empty() {
        builder.add(source.id.as_str(), rgba);
    }
    debug!(id = %source.id, entries = builder.len(), "extracted source");
    Ok(builder.into_entries())
}

/// Extracts `sources` and stitches them into an atlas, with the
/// missing-texture placeholder registered first.
#[instrument(skip_all)]
pub fn build_atlas(sources: Vec<SourceSprite>, cfg: &StitchConfig) -> Result<Atlas> {
    cfg.validate()?;

    let mut entries = vec![SpriteFrames {
        id: MISSING_ID.into(),
        frames: vec![missing_texture(cfg.tile_size)],
    }];
    entries.extend(extract_all(sources, cfg)?);
    stitch(entries, cfg)
}

/// Stitches accumulated entries into one square power-of-two page.
///
/// Frames are placed on a `grid_dim` x `grid_dim` tile grid in a single
/// pass, walking entries in accumulation order and frames in entry
/// order; frame `i` lands at cell `(i % grid_dim, i / grid_dim)`.
/// Placements never overlap and are never revisited.
///
/// The first entry in the list becomes the atlas's missing-texture
/// fallback; an empty entry list (or one with zero total frames) is a
/// caller error, not a stitchable input.
#[instrument(skip_all)]
pub fn stitch(entries: Vec<SpriteFrames>, cfg: &StitchConfig) -> Result<Atlas> {
    cfg.validate()?;

    let total: usize = entries.iter().map(|e| e.frames.len()).sum();
    if total == 0 {
        return Err(StitchError::Empty);
    }
    let tile = cfg.tile_size;

    let cols = (total as f64).sqrt().ceil() as u32;
    let rows = (total as u32).div_ceil(cols);
    let grid_dim = next_pow2(cols.max(rows));
    let pixel_size = grid_dim * tile;
    info!(total, grid_dim, pixel_size, "stitching atlas");

    let mut page = RgbaImage::new(pixel_size, pixel_size);
    let mut lookup: HashMap<String, AtlasEntry> = HashMap::new();
    let first_id = entries[0].id.clone();

    let mut i: u32 = 0;
    for entry in &entries {
        let mut frames = Vec::with_capacity(entry.frames.len());
        for frame in &entry.frames {
            let x = (i % grid_dim) * tile;
            let y = (i / grid_dim) * tile;
            compositing::blit_frame(&mut page, frame, x, y, tile);
            frames.push(Rect::new(x, y, tile, tile));
            i += 1;
        }
        // Last writer wins when the same identifier was registered by
        // more than one processor.
        lookup.insert(entry.id.clone(), AtlasEntry { frames });
    }

    let missing = lookup
        .get(&first_id)
        .cloned()
        .expect("first entry is always registered");

    Ok(Atlas::new(tile, grid_dim, page, lookup, missing, total))
}

fn next_pow2(mut v: u32) -> u32 {
    if v <= 1 {
        return 1;
    }
    v -= 1;
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v + 1
}
