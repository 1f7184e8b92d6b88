use atlas_stitch_core::prelude::*;
use image::{Rgba, RgbaImage};

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 0, 255]))
}

fn meta(json: &str) -> SpriteMeta {
    serde_json::from_str(json).expect("meta")
}

#[test]
fn horizontal_strip_cuts_in_index_order() {
    let src = gradient(128, 32);
    let mut builder = AtlasBuilder::new(32);
    builder
        .process("anim/walk", &src, &meta(r#"{"strip": "horizontal"}"#))
        .expect("process");

    let entries = builder.into_entries();
    assert_eq!(entries.len(), 1);
    let frames = &entries[0].frames;
    assert_eq!(frames.len(), 4);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.dimensions(), (32, 32));
        // frame i starts at x = i * 32 in the source
        assert_eq!(frame.get_pixel(0, 0)[0], (i as u8) * 32);
        assert_eq!(frame.get_pixel(0, 0)[1], 0);
    }
}

#[test]
fn vertical_strip_walks_down_the_source() {
    let src = gradient(32, 96);
    let mut builder = AtlasBuilder::new(32);
    builder
        .process("anim/fall", &src, &meta(r#"{"strip": "vertical"}"#))
        .expect("process");

    let entries = builder.into_entries();
    assert_eq!(entries.len(), 1);
    let frames = &entries[0].frames;
    assert_eq!(frames.len(), 3);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.get_pixel(0, 0)[1], (i as u8) * 32);
        assert_eq!(frame.get_pixel(0, 0)[0], 0);
    }
}

#[test]
fn trailing_partial_tile_is_dropped() {
    let src = gradient(100, 32);
    let mut builder = AtlasBuilder::new(32);
    builder
        .process("anim/short", &src, &meta(r#"{"strip": "horizontal"}"#))
        .expect("process");

    let entries = builder.into_entries();
    assert_eq!(entries[0].frames.len(), 3);
}

#[test]
fn unsupported_axis_is_fatal() {
    let src = gradient(128, 32);
    let mut builder = AtlasBuilder::new(32);
    let err = builder
        .process("anim/bad", &src, &meta(r#"{"strip": "diagonal"}"#))
        .unwrap_err();
    match err {
        StitchError::UnsupportedValue { id, key, value } => {
            assert_eq!(id, "anim/bad");
            assert_eq!(key, "strip");
            assert_eq!(value, "diagonal");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn absent_key_contributes_nothing() {
    let src = gradient(128, 32);
    let mut builder = AtlasBuilder::new(32);
    builder
        .process("anim/none", &src, &SpriteMeta::default())
        .expect("process");
    assert!(builder.is_empty());
}
