use crate::adjacency::VARIANT_COUNT;
use crate::builder::AtlasBuilder;
use crate::compositing::crop_tile;
use crate::error::{Result, StitchError};
use crate::metadata::SpriteMeta;
use crate::processor::Processor;
use image::RgbaImage;

/// Per-row `(x shift, tile count)` of the blob sheet layout. The sheet
/// geometry is fixed; it is never derived from the image dimensions.
const ROW_LAYOUT: [(u32, u32); 5] = [(0, 10), (0, 10), (0, 11), (0, 11), (4, 5)];

/// Widest row span in tiles (row 2: shift 0 + 11 tiles).
const SHEET_TILES_W: u32 = 11;
const SHEET_TILES_H: u32 = 5;

/// Extracts the 47 blob variants from an autotile sheet, row-major.
///
/// Frame order lines up index-for-index with the adjacency rule table,
/// so a resolved variant id picks the right frame.
pub struct AutotileProcessor;

impl Processor for AutotileProcessor {
    fn process(
        &self,
        id: &str,
        image: &RgbaImage,
        meta: &SpriteMeta,
        builder: &mut AtlasBuilder,
    ) -> Result<()> {
        let Some(mode) = meta.autotile.as_deref() else {
            return Ok(());
        };
        if mode != "blob" {
            return Err(StitchError::UnsupportedValue {
                id: id.into(),
                key: "autotile",
                value: mode.into(),
            });
        }

        let tile = builder.tile_size();
        let (min_w, min_h) = (SHEET_TILES_W * tile, SHEET_TILES_H * tile);
        if image.width() < min_w || image.height() < min_h {
            return Err(StitchError::InvalidConfig(format!(
                "{id}: blob autotile sheet must be at least {min_w}x{min_h} px, got {}x{}",
                image.width(),
                image.height()
            )));
        }

        let mut frames = Vec::with_capacity(VARIANT_COUNT);
        for (row, &(shift, count)) in ROW_LAYOUT.iter().enumerate() {
            for col in 0..count {
                frames.push(crop_tile(
                    image,
                    (col + shift) * tile,
                    row as u32 * tile,
                    tile,
                ));
            }
        }
        debug_assert_eq!(frames.len(), VARIANT_COUNT);

        builder.add_animation(id, frames);
        Ok(())
    }
}
