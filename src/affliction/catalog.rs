//! Affliction kinds and the catalog that turns a kind into an instance.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use super::effects::effect_for;
use super::error::AfflictionError;
use super::registry::Affliction;
use crate::core::{load_or_default, DataDir, DataLoadError};

const CATALOG_FILE: &str = "afflictions.ron";

/// Every affliction the game knows how to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AfflictionKind {
    Fatigue,
    Drowsiness,
    BlurredVision,
}

impl AfflictionKind {
    pub const ALL: [AfflictionKind; 3] = [
        AfflictionKind::Fatigue,
        AfflictionKind::Drowsiness,
        AfflictionKind::BlurredVision,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Fatigue => "fatigue",
            Self::Drowsiness => "drowsiness",
            Self::BlurredVision => "blurred_vision",
        }
    }
}

impl FromStr for AfflictionKind {
    type Err = AfflictionError;

    /// Accepts "fatigue", "Fatigue", "blurred_vision", "Blurred Vision", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|kind| kind.key().replace('_', "") == normalized)
            .ok_or_else(|| AfflictionError::UnknownKind(s.to_string()))
    }
}

fn default_base_duration() -> f32 {
    5.0
}

fn default_stat_factor() -> f32 {
    0.5
}

/// Static data for one affliction kind.
#[derive(Debug, Clone, Deserialize)]
pub struct AfflictionData {
    pub kind: AfflictionKind,
    /// Display name; also the merge key in the registry.
    pub name: String,
    /// Icon asset path, resolved by the HUD.
    #[serde(default)]
    pub icon: Option<String>,
    /// Seconds the affliction lasts when no override is given.
    #[serde(default = "default_base_duration")]
    pub base_duration: f32,
    /// Multiplier applied to the affected stat.
    #[serde(default = "default_stat_factor")]
    pub stat_factor: f32,
}

impl AfflictionData {
    fn builtin(kind: AfflictionKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            icon: Some(format!("icons/afflictions/{}.png", kind.key())),
            base_duration: default_base_duration(),
            stat_factor: default_stat_factor(),
        }
    }
}

/// RON layout of `afflictions.ron`.
#[derive(Debug, Clone, Deserialize)]
pub struct AfflictionCatalogFile {
    pub afflictions: Vec<AfflictionData>,
}

impl Default for AfflictionCatalogFile {
    fn default() -> Self {
        Self {
            afflictions: vec![
                AfflictionData::builtin(AfflictionKind::Fatigue, "Fatigue"),
                AfflictionData::builtin(AfflictionKind::Drowsiness, "Drowsiness"),
                AfflictionData::builtin(AfflictionKind::BlurredVision, "Blurred Vision"),
            ],
        }
    }
}

impl AfflictionCatalogFile {
    /// Reject non-positive durations, out-of-range factors, shared names
    /// and kinds listed twice.
    pub fn validate(self) -> Result<Self, DataLoadError> {
        let mut names = HashSet::new();
        let mut kinds = HashSet::new();
        for entry in &self.afflictions {
            if entry.base_duration <= 0.0 {
                return Err(DataLoadError::invalid(
                    CATALOG_FILE,
                    format!("'{}' has non-positive base duration {}", entry.name, entry.base_duration),
                ));
            }
            if !(entry.stat_factor > 0.0 && entry.stat_factor <= 1.0) {
                return Err(DataLoadError::invalid(
                    CATALOG_FILE,
                    format!("'{}' stat factor {} is outside (0, 1]", entry.name, entry.stat_factor),
                ));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(DataLoadError::invalid(
                    CATALOG_FILE,
                    format!("affliction name '{}' is used twice", entry.name),
                ));
            }
            if !kinds.insert(entry.kind) {
                return Err(DataLoadError::invalid(
                    CATALOG_FILE,
                    format!("affliction kind {:?} is listed twice", entry.kind),
                ));
            }
        }
        Ok(self)
    }
}

/// Resource mapping each kind to its data. Acts as the affliction factory.
#[derive(Resource, Debug, Clone)]
pub struct AfflictionCatalog {
    entries: HashMap<AfflictionKind, AfflictionData>,
}

impl Default for AfflictionCatalog {
    fn default() -> Self {
        Self::from_file(AfflictionCatalogFile::default())
    }
}

impl AfflictionCatalog {
    /// Catalog from `afflictions.ron`, or the built-in entries.
    pub fn load(dir: &DataDir) -> Self {
        let file = load_or_default(&dir.file(CATALOG_FILE), AfflictionCatalogFile::validate);
        Self::from_file(file)
    }

    pub fn from_file(file: AfflictionCatalogFile) -> Self {
        let entries = file
            .afflictions
            .into_iter()
            .map(|data| (data.kind, data))
            .collect();
        Self { entries }
    }

    pub fn data(&self, kind: AfflictionKind) -> Option<&AfflictionData> {
        self.entries.get(&kind)
    }

    /// Construct a fresh instance. A positive `duration` overrides the base.
    pub fn create(
        &self,
        kind: AfflictionKind,
        duration: Option<f32>,
    ) -> Result<Affliction, AfflictionError> {
        let data = self.data(kind).ok_or(AfflictionError::MissingData(kind))?;
        let duration = match duration {
            Some(d) if d > 0.0 => d,
            _ => data.base_duration,
        };

        Ok(Affliction::new(
            kind,
            data.name.clone(),
            data.icon.clone(),
            duration,
            effect_for(kind, data.stat_factor),
        ))
    }
}
