//! Selectable journal labels (moods, strategies, exit reasons)

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Category name -> ordered options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Labels {
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub strategies: Vec<String>,
    #[serde(default)]
    pub exit_reasons: Vec<String>,
    /// Any further categories
    #[serde(flatten)]
    pub other: BTreeMap<String, Vec<String>>,
}

impl Labels {
    /// Load labels from a JSON file; a missing file is an error
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Label file not found at {}", path.display()))?;
        let labels = serde_json::from_str(&content)
            .with_context(|| format!("Invalid label file {}", path.display()))?;
        Ok(labels)
    }

    /// Options for a category, if it exists
    pub fn category(&self, name: &str) -> Option<&[String]> {
        match name {
            "moods" => Some(self.moods.as_slice()),
            "strategies" => Some(self.strategies.as_slice()),
            "exit_reasons" => Some(self.exit_reasons.as_slice()),
            other => self.other.get(other).map(Vec::as_slice),
        }
    }

    /// Every category in display order
    pub fn categories(&self) -> Vec<(&str, &[String])> {
        let mut all: Vec<(&str, &[String])> = vec![
            ("moods", self.moods.as_slice()),
            ("strategies", self.strategies.as_slice()),
            ("exit_reasons", self.exit_reasons.as_slice()),
        ];
        all.extend(self.other.iter().map(|(k, v)| (k.as_str(), v.as_slice())));
        all
    }
}
