use image::{RgbaImage, imageops};

/// Copy one tile-sized region out of `src`. The crop is taken verbatim;
/// callers are responsible for keeping it inside the source bounds.
pub fn crop_tile(src: &RgbaImage, x: u32, y: u32, tile: u32) -> RgbaImage {
    imageops::crop_imm(src, x, y, tile, tile).to_image()
}

/// Blit `frame` into `canvas` with its top-left at (dx, dy), direct
/// copy with no blending. The copy is clamped to one `tile` by `tile`
/// cell so a frame can never spill into a neighbouring placement.
pub fn blit_frame(canvas: &mut RgbaImage, frame: &RgbaImage, dx: u32, dy: u32, tile: u32) {
    let (cw, ch) = canvas.dimensions();
    let (fw, fh) = frame.dimensions();
    let w = fw.min(tile);
    let h = fh.min(tile);

    for yy in 0..h {
        for xx in 0..w {
            if dx + xx < cw && dy + yy < ch {
                let px = *frame.get_pixel(xx, yy);
                canvas.put_pixel(dx + xx, dy + yy, px);
            }
        }
    }
}
