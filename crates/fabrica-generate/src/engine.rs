//! Top-level generation engine.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tracing::info;

use fabrica_core::{Blueprint, FunctionArgs};

use crate::errors::Result;
use crate::events::ProgressSink;
use crate::interpreter;
use crate::model::GenerateOptions;
use crate::registry;

/// Runs blueprint and single-value jobs with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        }
    }

    /// Generates `number_of_items` objects from `blueprint`.
    pub fn run_blueprint(
        &self,
        blueprint: &Blueprint,
        number_of_items: u64,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<Value>> {
        info!(items = number_of_items, seed = ?self.options.seed, "blueprint job started");
        let mut rng = self.rng();
        interpreter::generate_objects(blueprint, number_of_items, &self.options, &mut rng, sink)
    }

    /// Generates `number_of_items` values from a single function call.
    pub fn run_value(
        &self,
        call: &FunctionArgs,
        number_of_items: u64,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<Value>> {
        info!(
            function = call.tag().wire_name(),
            items = number_of_items,
            "value job started"
        );
        let mut rng = self.rng();
        registry::call(call, number_of_items, 0, &self.options, &mut rng, sink)
    }
}
