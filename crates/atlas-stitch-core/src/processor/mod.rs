use crate::builder::AtlasBuilder;
use crate::error::Result;
use crate::metadata::SpriteMeta;
use image::RgbaImage;

pub mod autotile;
pub mod scroll;
pub mod strip;

pub use autotile::AutotileProcessor;
pub use scroll::ScrollProcessor;
pub use strip::StripProcessor;

/// A processor turns one source image plus its metadata record into an
/// ordered frame sequence registered on the builder.
///
/// A processor whose key is absent from the metadata contributes
/// nothing and returns Ok; a present key with an unsupported value is a
/// fatal configuration error. Matches do not short-circuit: every
/// registered processor runs, and each match contributes its own entry
/// under the sprite's identifier.
pub trait Processor: Sync {
    fn process(
        &self,
        id: &str,
        image: &RgbaImage,
        meta: &SpriteMeta,
        builder: &mut AtlasBuilder,
    ) -> Result<()>;
}

/// Registered processors, in registration order.
pub static PROCESSORS: &[&dyn Processor] = &[&AutotileProcessor, &ScrollProcessor, &StripProcessor];

/// Runs every registered processor against one source sprite.
pub fn run_all(
    id: &str,
    image: &RgbaImage,
    meta: &SpriteMeta,
    builder: &mut AtlasBuilder,
) -> Result<()> {
    for p in PROCESSORS {
        p.process(id, image, meta, builder)?;
    }
    Ok(())
}
