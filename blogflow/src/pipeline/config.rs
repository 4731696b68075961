//! Pipeline configuration: per-stage sampling and the brand block.

use crate::core::StageKind;
use crate::errors::BlogflowError;
use crate::gateway::GenerationParams;
use crate::prompts::BrandGuidelines;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_research() -> GenerationParams {
    GenerationParams::new(4000, 0.7)
}

fn default_draft() -> GenerationParams {
    GenerationParams::new(8000, 0.7)
}

fn default_optimize() -> GenerationParams {
    GenerationParams::new(8000, 0.7)
}

fn default_edit() -> GenerationParams {
    GenerationParams::new(8000, 0.5)
}

/// Configuration of one pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Research stage sampling.
    #[serde(default = "default_research")]
    pub research: GenerationParams,
    /// Draft stage sampling.
    #[serde(default = "default_draft")]
    pub draft: GenerationParams,
    /// Optimize stage sampling.
    #[serde(default = "default_optimize")]
    pub optimize: GenerationParams,
    /// Edit stage sampling.
    #[serde(default = "default_edit")]
    pub edit: GenerationParams,
    /// Brand rules; empty selects the short prompt set.
    #[serde(default)]
    pub brand: BrandGuidelines,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            research: default_research(),
            draft: default_draft(),
            optimize: default_optimize(),
            edit: default_edit(),
            brand: BrandGuidelines::none(),
        }
    }
}

impl PipelineConfig {
    /// Creates the default (unbranded) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default sampling with the Effortless Travel Now brand block.
    #[must_use]
    pub fn branded() -> Self {
        Self::default().with_brand(BrandGuidelines::effortless_travel_now())
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BlogflowError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Sets the brand block.
    #[must_use]
    pub fn with_brand(mut self, brand: BrandGuidelines) -> Self {
        self.brand = brand;
        self
    }

    /// Overrides the sampling for one stage.
    #[must_use]
    pub fn with_stage_params(mut self, stage: StageKind, params: GenerationParams) -> Self {
        match stage {
            StageKind::Research => self.research = params,
            StageKind::Draft => self.draft = params,
            StageKind::Optimize => self.optimize = params,
            StageKind::Edit => self.edit = params,
        }
        self
    }

    /// Sampling for `stage`.
    #[must_use]
    pub fn params_for(&self, stage: StageKind) -> GenerationParams {
        match stage {
            StageKind::Research => self.research,
            StageKind::Draft => self.draft,
            StageKind::Optimize => self.optimize,
            StageKind::Edit => self.edit,
        }
    }
}
