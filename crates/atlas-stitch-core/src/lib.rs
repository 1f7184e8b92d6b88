//! Core library for stitching sprites into a texture atlas.
//!
//! - Extraction: metadata-driven processors cut one source image into
//!   an ordered frame sequence (film strips, blob autotile sheets,
//!   procedural scrolling textures)
//! - Stitching: frames are laid onto one square power-of-two tile grid
//!   in a single pass, producing an RGBA page plus a per-identifier
//!   rectangle lookup with a guaranteed missing-texture fallback
//! - Adjacency: an ordered 47-rule table resolves a tile's 8-neighbour
//!   occupancy pattern to the blob variant to draw
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use atlas_stitch_core::{SourceSprite, SpriteMeta, StitchConfig, build_atlas};
//! # fn main() -> anyhow::Result<()> {
//! let img = ImageReader::open("water.png")?.decode()?;
//! let meta: SpriteMeta = serde_json::from_str(r#"{"strip": "horizontal"}"#)?;
//! let sources = vec![SourceSprite { id: "tiles/water".into(), image: img, meta }];
//! let atlas = build_atlas(sources, &StitchConfig::default())?;
//! println!("page: {}x{}", atlas.pixel_size, atlas.pixel_size);
//! # Ok(()) }
//! ```

pub mod adjacency;
pub mod builder;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod processor;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use metadata::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `atlas_stitch_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::adjacency::{
        ADJACENCIES, AdjacencyRule, TileProbe, VARIANT_COUNT, resolve, variant_at,
    };
    pub use crate::builder::{AtlasBuilder, SpriteFrames, missing_texture};
    pub use crate::config::{StitchConfig, StitchConfigBuilder};
    pub use crate::metadata::{AutoscrollMeta, SpriteMeta};
    pub use crate::model::{Atlas, AtlasEntry, AtlasStats, Rect};
    pub use crate::error::StitchError;
    pub use crate::pipeline::{MISSING_ID, SourceSprite, build_atlas, extract_all, stitch};
}
