use atlas_stitch_core::export::to_json;
use atlas_stitch_core::prelude::*;
use image::{DynamicImage, Rgba, RgbaImage};

#[test]
fn json_document_carries_entries_and_meta() {
    let image = RgbaImage::from_pixel(128, 32, Rgba([7, 7, 7, 255]));
    let sources = vec![SourceSprite {
        id: "anim/walk".into(),
        image: DynamicImage::ImageRgba8(image),
        meta: serde_json::from_str(r#"{"strip": "horizontal"}"#).expect("meta"),
    }];
    let cfg = StitchConfig::builder().tile_size(32).build();
    let atlas = build_atlas(sources, &cfg).expect("build");

    let doc = to_json(&atlas);

    let meta = &doc["meta"];
    assert_eq!(meta["tile_size"], 32);
    assert_eq!(meta["grid_dim"], 4);
    assert_eq!(meta["pixel_size"], 128);
    assert_eq!(meta["format"], "RGBA8888");

    let walk = &doc["entries"]["anim/walk"];
    assert_eq!(walk["animated"], true);
    assert_eq!(walk["frames"].as_array().map(|f| f.len()), Some(4));
    // Placeholder frame 0 occupies the first cell.
    assert_eq!(doc["entries"]["missing"]["frames"][0]["x"], 0);
    assert_eq!(doc["entries"]["missing"]["frames"][0]["y"], 0);
    // Frames are pixel rects in page space: frame 1 of the strip sits
    // at global index 2.
    assert_eq!(walk["frames"][1]["x"], 64);
    assert_eq!(walk["frames"][1]["y"], 0);
}
