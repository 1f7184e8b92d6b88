use atlas_stitch_core::prelude::*;
use image::{Rgba, RgbaImage};
use rand::{Rng, SeedableRng};

fn solid(tile: u32, shade: u8) -> RgbaImage {
    RgbaImage::from_pixel(tile, tile, Rgba([shade, 0, 0, 255]))
}

fn singles(count: usize, tile: u32) -> Vec<SpriteFrames> {
    (0..count)
        .map(|i| SpriteFrames {
            id: format!("e{i}"),
            frames: vec![solid(tile, i as u8)],
        })
        .collect()
}

fn cfg(tile: u32) -> StitchConfig {
    StitchConfig::builder().tile_size(tile).build()
}

#[test]
fn ten_frames_land_on_a_4x4_grid() {
    let atlas = stitch(singles(10, 32), &cfg(32)).expect("stitch");

    assert_eq!(atlas.grid_dim, 4);
    assert_eq!(atlas.pixel_size, 128);
    assert!((atlas.unit - 0.25).abs() < f32::EPSILON);

    // Global frame index 5 sits at cell (1, 1).
    assert_eq!(atlas.entry("e5").frames, vec![Rect::new(32, 32, 32, 32)]);
    // Row wrap happens at grid_dim, not at the column count.
    assert_eq!(atlas.entry("e4").frames, vec![Rect::new(0, 32, 32, 32)]);
}

#[test]
fn frames_keep_entry_order_and_pixels() {
    let tile = 16;
    let entries = vec![
        SpriteFrames {
            id: "a".into(),
            frames: vec![solid(tile, 1)],
        },
        SpriteFrames {
            id: "b".into(),
            frames: vec![solid(tile, 2), solid(tile, 3), solid(tile, 4)],
        },
    ];
    let atlas = stitch(entries, &cfg(tile)).expect("stitch");

    // 4 frames -> 2x2 grid.
    assert_eq!(atlas.grid_dim, 2);
    let b = atlas.entry("b");
    assert_eq!(
        b.frames,
        vec![
            Rect::new(16, 0, 16, 16),
            Rect::new(0, 16, 16, 16),
            Rect::new(16, 16, 16, 16),
        ]
    );
    assert!(b.is_animated());

    // Each placed cell carries its source frame's pixels.
    let page = atlas.page();
    assert_eq!(page.get_pixel(0, 0)[0], 1);
    assert_eq!(page.get_pixel(16, 0)[0], 2);
    assert_eq!(page.get_pixel(0, 16)[0], 3);
    assert_eq!(page.get_pixel(16, 16)[0], 4);
}

#[test]
fn oversized_frames_stay_inside_their_cell() {
    let tile = 16;
    let entries = vec![
        SpriteFrames {
            id: "big".into(),
            frames: vec![RgbaImage::from_pixel(40, 40, Rgba([9, 0, 0, 255]))],
        },
        SpriteFrames {
            id: "next".into(),
            frames: vec![solid(tile, 5)],
        },
    ];
    let atlas = stitch(entries, &cfg(tile)).expect("stitch");

    // The neighbouring cell is untouched by the oversized source.
    assert_eq!(atlas.page().get_pixel(16, 0)[0], 5);
    assert_eq!(atlas.entry("big").frames, vec![Rect::new(0, 0, 16, 16)]);
}

#[test]
fn random_entry_sets_place_disjoint_in_bounds_rects() {
    let tile = 8;
    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    let entries: Vec<SpriteFrames> = (0..60)
        .map(|i| {
            let frames = (0..rng.gen_range(1..=4))
                .map(|_| solid(tile, i as u8))
                .collect();
            SpriteFrames {
                id: format!("r{i}"),
                frames,
            }
        })
        .collect();

    let atlas = stitch(entries, &cfg(tile)).expect("stitch");
    let bounds = Rect::new(0, 0, atlas.pixel_size, atlas.pixel_size);
    let rects: Vec<Rect> = atlas
        .entries()
        .flat_map(|(_, e)| e.frames.iter().copied())
        .collect();

    for r in &rects {
        assert_eq!((r.w, r.h), (tile, tile));
        assert!(bounds.contains(r), "rect out of bounds: {r:?}");
    }
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            let a = &rects[i];
            let b = &rects[j];
            let overlap =
                !(a.x >= b.x + b.w || b.x >= a.x + a.w || a.y >= b.y + b.h || b.y >= a.y + a.h);
            assert!(!overlap, "rects overlap: {a:?} vs {b:?}");
        }
    }
}

#[test]
fn zero_frames_is_a_precondition_failure() {
    assert!(matches!(
        stitch(Vec::new(), &cfg(32)),
        Err(StitchError::Empty)
    ));
    let entries = vec![SpriteFrames {
        id: "empty".into(),
        frames: Vec::new(),
    }];
    assert!(matches!(stitch(entries, &cfg(32)), Err(StitchError::Empty)));
}

#[test]
fn zero_tile_size_is_rejected() {
    let err = stitch(singles(1, 32), &cfg(0)).unwrap_err();
    assert!(matches!(err, StitchError::InvalidConfig(_)));
}
