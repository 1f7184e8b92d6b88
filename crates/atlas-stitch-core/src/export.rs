use crate::model::Atlas;
use serde_json::{Value, json};

/// Serialize an atlas's lookup as a JSON document:
/// `{ entries: { id: { frames: [{x,y,w,h}], animated } }, meta }`.
/// Identifiers are emitted in sorted order for stable output. Pixel
/// data is not included; pair this with the PNG page.
pub fn to_json(atlas: &Atlas) -> Value {
    let mut ids: Vec<_> = atlas.entries().collect();
    ids.sort_by_key(|(id, _)| *id);

    let mut entries = serde_json::Map::new();
    for (id, entry) in ids {
        let frames: Vec<Value> = entry
            .frames
            .iter()
            .map(|r| json!({"x": r.x, "y": r.y, "w": r.w, "h": r.h}))
            .collect();
        entries.insert(
            id.to_string(),
            json!({
                "frames": frames,
                "animated": entry.is_animated(),
            }),
        );
    }

    json!({
        "entries": entries,
        "meta": {
            "schema_version": "1",
            "app": "atlas-stitch",
            "version": env!("CARGO_PKG_VERSION"),
            "format": "RGBA8888",
            "tile_size": atlas.tile_size,
            "grid_dim": atlas.grid_dim,
            "pixel_size": atlas.pixel_size,
            "unit": atlas.unit,
        }
    })
}
