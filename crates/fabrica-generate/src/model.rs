//! Engine configuration.

/// Knobs for a [`crate::engine::GenerationEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Seed for the ChaCha8 stream; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Retry budget used when an argument object sets none.
    /// `None` keeps retries unlimited.
    pub default_re_create_limit: Option<u32>,
    /// Hard cap on nested vault-blueprint resolution.
    pub max_blueprint_depth: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            default_re_create_limit: None,
            max_blueprint_depth: 16,
        }
    }
}
