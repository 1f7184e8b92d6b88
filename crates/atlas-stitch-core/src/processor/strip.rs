use crate::builder::AtlasBuilder;
use crate::compositing::crop_tile;
use crate::error::{Result, StitchError};
use crate::metadata::SpriteMeta;
use crate::processor::Processor;
use image::RgbaImage;

/// Cuts a film-strip image into tile-sized frames along one axis.
///
/// The frame count is `size_along_axis / tile_size` (floor); a trailing
/// partial tile is dropped.
pub struct StripProcessor;

impl Processor for StripProcessor {
    fn process(
        &self,
        id: &str,
        image: &RgbaImage,
        meta: &SpriteMeta,
        builder: &mut AtlasBuilder,
    ) -> Result<()> {
        let Some(mode) = meta.strip.as_deref() else {
            return Ok(());
        };
        let horizontal = match mode {
            "horizontal" => true,
            "vertical" => false,
            other => {
                return Err(StitchError::UnsupportedValue {
                    id: id.into(),
                    key: "strip",
                    value: other.into(),
                });
            }
        };

        let tile = builder.tile_size();
        let len = if horizontal {
            image.width()
        } else {
            image.height()
        };
        let count = len / tile;

        let mut frames = Vec::with_capacity(count as usize);
        for i in 0..count {
            let (x, y) = if horizontal { (i * tile, 0) } else { (0, i * tile) };
            frames.push(crop_tile(image, x, y, tile));
        }
        builder.add_animation(id, frames);
        Ok(())
    }
}
