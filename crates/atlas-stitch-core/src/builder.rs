use crate::error::Result;
use crate::metadata::SpriteMeta;
use crate::processor;
use image::{Rgba, RgbaImage};

/// One extracted entry: an identifier and its ordered frame sequence.
/// More than one frame means the entry is animated; frame order is the
/// playback/variant order and is preserved through stitching.
#[derive(Debug, Clone)]
pub struct SpriteFrames {
    pub id: String,
    pub frames: Vec<RgbaImage>,
}

impl SpriteFrames {
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

/// Accumulates extracted entries ahead of the stitching pass. Entry
/// order is significant: the first accumulated entry becomes the
/// missing-texture fallback of the finished atlas.
#[derive(Debug)]
pub struct AtlasBuilder {
    tile_size: u32,
    entries: Vec<SpriteFrames>,
}

impl AtlasBuilder {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            entries: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Registers a single static frame under `id`.
    pub fn add(&mut self, id: impl Into<String>, image: RgbaImage) {
        self.add_animation(id, vec![image]);
    }

    /// Registers an ordered frame sequence under `id`.
    pub fn add_animation(&mut self, id: impl Into<String>, frames: Vec<RgbaImage>) {
        self.entries.push(SpriteFrames {
            id: id.into(),
            frames,
        });
    }

    /// Runs every registered extraction processor against one source.
    pub fn process(&mut self, id: &str, image: &RgbaImage, meta: &SpriteMeta) -> Result<()> {
        processor::run_all(id, image, meta, self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SpriteFrames] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SpriteFrames> {
        self.entries
    }
}

/// The conventional missing-texture placeholder: black with magenta
/// top-left and bottom-right quadrants.
pub fn missing_texture(tile: u32) -> RgbaImage {
    let black = Rgba([0, 0, 0, 255]);
    let magenta = Rgba([255, 0, 255, 255]);
    let half = tile / 2;

    RgbaImage::from_fn(tile, tile, |x, y| {
        if (x < half) == (y < half) { magenta } else { black }
    })
}
