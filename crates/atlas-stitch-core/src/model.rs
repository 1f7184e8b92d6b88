use crate::error::Result;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
}

/// The packed representation of one logical sprite: one rectangle per
/// source frame, in atlas pixel space, in the source frame order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasEntry {
    pub frames: Vec<Rect>,
}

impl AtlasEntry {
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

/// A stitched atlas: one square power-of-two page plus the
/// per-identifier rectangle lookup. Built once, immutable afterwards;
/// shared references are safe to read from any number of threads.
#[derive(Debug, Clone)]
pub struct Atlas {
    /// Square pixel size every frame shares.
    pub tile_size: u32,
    /// Page side length in tiles (power of two).
    pub grid_dim: u32,
    /// Page side length in pixels (`grid_dim * tile_size`).
    pub pixel_size: u32,
    /// Normalized size of one tile (`tile_size / pixel_size`).
    pub unit: f32,
    page: RgbaImage,
    lookup: HashMap<String, AtlasEntry>,
    missing: AtlasEntry,
    placed_frames: usize,
}

impl Atlas {
    pub(crate) fn new(
        tile_size: u32,
        grid_dim: u32,
        page: RgbaImage,
        lookup: HashMap<String, AtlasEntry>,
        missing: AtlasEntry,
        placed_frames: usize,
    ) -> Self {
        let pixel_size = grid_dim * tile_size;
        Self {
            tile_size,
            grid_dim,
            pixel_size,
            unit: tile_size as f32 / pixel_size as f32,
            page,
            lookup,
            missing,
            placed_frames,
        }
    }

    /// Exact-match lookup; unknown identifiers fall back to the missing
    /// entry so callers can always draw something rather than fail.
    pub fn entry(&self, id: &str) -> &AtlasEntry {
        self.lookup.get(id).unwrap_or(&self.missing)
    }

    /// The fallback entry returned for unrecognized identifiers.
    pub fn missing(&self) -> &AtlasEntry {
        &self.missing
    }

    /// The packed RGBA page.
    pub fn page(&self) -> &RgbaImage {
        &self.page
    }

    /// All registered identifiers and their entries (unordered).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &AtlasEntry)> {
        self.lookup.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn stats(&self) -> AtlasStats {
        let cells = (self.grid_dim as u64) * (self.grid_dim as u64);
        AtlasStats {
            num_entries: self.lookup.len(),
            num_frames: self.placed_frames,
            grid_dim: self.grid_dim,
            pixel_size: self.pixel_size,
            occupancy: self.placed_frames as f64 / cells as f64,
        }
    }

    /// Debug aid: save the packed page as a PNG for inspection. Has no
    /// effect on the lookup contract.
    pub fn dump_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.page.save(path)?;
        debug!(path = %path.display(), "dumped atlas page");
        Ok(())
    }
}

/// Statistics about a stitched atlas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtlasStats {
    /// Number of identifiers in the lookup.
    pub num_entries: usize,
    /// Total frames placed on the page.
    pub num_frames: usize,
    pub grid_dim: u32,
    pub pixel_size: u32,
    /// Used grid cells over total grid cells (0.0 to 1.0).
    pub occupancy: f64,
}

impl AtlasStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Entries: {}, Frames: {}, Page: {}x{} px ({}x{} tiles), Occupancy: {:.2}%",
            self.num_entries,
            self.num_frames,
            self.pixel_size,
            self.pixel_size,
            self.grid_dim,
            self.grid_dim,
            self.occupancy * 100.0,
        )
    }
}
