use serde::{Deserialize, Serialize};

/// Parsed sprite metadata record. The caller owns the document format;
/// the core only sees the keys the extraction processors recognize.
/// Unknown keys are dropped at parse time; an absent key means the
/// corresponding processor is not applicable to the sprite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteMeta {
    /// `"horizontal"` or `"vertical"`; any other value is a fatal
    /// configuration error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<String>,
    /// `"blob"` is the only supported layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autotile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscroll: Option<AutoscrollMeta>,
}

impl SpriteMeta {
    pub fn is_empty(&self) -> bool {
        self.strip.is_none() && self.autotile.is_none() && self.autoscroll.is_none()
    }
}

/// Parameters for the scrolling-texture processor. All three fields are
/// required for the processor to apply; a partial record means "not
/// applicable", not an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AutoscrollMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment_y: Option<i32>,
}

impl AutoscrollMeta {
    /// `(frames, increment_x, increment_y)` when fully specified.
    pub fn complete(&self) -> Option<(u32, i32, i32)> {
        Some((self.frames?, self.increment_x?, self.increment_y?))
    }
}
