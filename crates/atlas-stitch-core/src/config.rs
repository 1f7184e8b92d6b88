use serde::{Deserialize, Serialize};

/// Stitching configuration.
///
/// The atlas is a square grid of fixed-size tiles, so there is far less
/// to tune than in a free-rectangle packer: the tile size drives all of
/// the geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Square pixel size every frame shares.
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// Extract sources in parallel (requires the `parallel` feature).
    /// Extraction results are collected back into submission order, so
    /// output is identical to the sequential path.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            parallel: false,
        }
    }
}

impl StitchConfig {
    pub fn builder() -> StitchConfigBuilder {
        StitchConfigBuilder::new()
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::StitchError;

        if self.tile_size == 0 {
            return Err(StitchError::InvalidConfig(
                "tile_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn default_tile_size() -> u32 {
    32
}

/// Builder for `StitchConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct StitchConfigBuilder {
    cfg: StitchConfig,
}

impl StitchConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: StitchConfig::default(),
        }
    }
    pub fn tile_size(mut self, v: u32) -> Self {
        self.cfg.tile_size = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> StitchConfig {
        self.cfg
    }
}
