use crate::builder::AtlasBuilder;
use crate::error::Result;
use crate::metadata::SpriteMeta;
use crate::processor::Processor;
use image::{RgbaImage, imageops};

/// Procedurally builds a seamless scrolling animation from one texture.
///
/// Frame `i` composites the source at `(increment_x * i, increment_y *
/// i)` plus a second wrap-around copy shifted back by one full image
/// dimension along each nonzero increment, so the pattern tiles even
/// when the shift is smaller than the image.
pub struct ScrollProcessor;

impl Processor for ScrollProcessor {
    fn process(
        &self,
        id: &str,
        image: &RgbaImage,
        meta: &SpriteMeta,
        builder: &mut AtlasBuilder,
    ) -> Result<()> {
        let Some((frames, dx, dy)) = meta.autoscroll.as_ref().and_then(|a| a.complete()) else {
            return Ok(());
        };

        let (w, h) = image.dimensions();
        let mut anim = Vec::with_capacity(frames as usize);
        for i in 0..frames as i64 {
            let ox = dx as i64 * i;
            let oy = dy as i64 * i;

            let mut canvas = RgbaImage::new(w, h);
            imageops::replace(&mut canvas, image, ox, oy);
            imageops::replace(
                &mut canvas,
                image,
                ox - dx.signum() as i64 * w as i64,
                oy - dy.signum() as i64 * h as i64,
            );
            anim.push(canvas);
        }

        builder.add_animation(id, anim);
        Ok(())
    }
}
