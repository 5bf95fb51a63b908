//! AI configuration and difficulty presets

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::eval::EvalWeights;

/// Difficulty preset offered to players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn max_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 50,
        }
    }

    pub fn time_limit(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_secs(2),
            Difficulty::Medium => Duration::from_secs(5),
            Difficulty::Hard => Duration::from_secs(12),
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => anyhow::bail!("unknown difficulty: {}", other),
        }
    }
}

/// Search settings for one computer player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Deepest iterative-deepening pass
    pub max_depth: u32,
    /// Soft deadline, only checked between root moves
    pub time_limit_ms: u64,
    #[serde(default)]
    pub weights: EvalWeights,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

impl From<Difficulty> for AiConfig {
    fn from(difficulty: Difficulty) -> Self {
        Self::from_difficulty(difficulty)
    }
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            max_depth: difficulty.max_depth(),
            time_limit_ms: difficulty.time_limit().as_millis() as u64,
            weights: EvalWeights::default(),
        }
    }

    /// Set custom evaluation weights
    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read AI config: {}", path.display()))?;
        let config: AiConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid AI config: {}", path.display()))?;
        if config.max_depth == 0 {
            anyhow::bail!("max_depth must be at least 1 in {}", path.display());
        }
        Ok(config)
    }
}
