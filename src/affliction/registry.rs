//! The registry of afflictions currently degrading the player.

use bevy::prelude::*;

use super::catalog::{AfflictionCatalog, AfflictionKind};
use super::effects::AfflictionEffect;
use super::error::AfflictionError;
use crate::capabilities::StatTarget;

/// An active timed effect.
///
/// `duration` is both state and countdown: it only shrinks while ticking
/// and only grows when a duplicate request merges into it.
#[derive(Debug)]
pub struct Affliction {
    kind: AfflictionKind,
    name: String,
    icon: Option<String>,
    duration: f32,
    effect: Box<dyn AfflictionEffect>,
}

impl Affliction {
    pub fn new(
        kind: AfflictionKind,
        name: impl Into<String>,
        icon: Option<String>,
        duration: f32,
        effect: Box<dyn AfflictionEffect>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            icon,
            duration,
            effect,
        }
    }

    pub fn kind(&self) -> AfflictionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Remaining seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// Owned, read-only copy of an active affliction for HUD and debug views.
#[derive(Debug, Clone, PartialEq)]
pub struct AfflictionSnapshot {
    pub kind: AfflictionKind,
    pub name: String,
    pub icon: Option<String>,
    pub remaining: f32,
}

/// What a request did to the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// A new instance was added and its effect applied.
    Applied { name: String, duration: f32 },
    /// An instance with the same name absorbed the request's duration.
    Extended { name: String, added: f32, remaining: f32 },
}

/// Resource holding every active affliction, at most one per name.
#[derive(Resource, Debug, Default)]
pub struct AfflictionRegistry {
    active: Vec<Affliction>,
}

impl AfflictionRegistry {
    /// Build an affliction of `kind` from the catalog and add it.
    ///
    /// Unknown kinds are logged and leave the registry untouched.
    pub fn request(
        &mut self,
        catalog: &AfflictionCatalog,
        kind: AfflictionKind,
        duration: Option<f32>,
        target: &mut dyn StatTarget,
    ) -> Result<RequestOutcome, AfflictionError> {
        match catalog.create(kind, duration) {
            Ok(affliction) => Ok(self.add(affliction, target)),
            Err(e) => {
                error!("Affliction request dropped: {}", e);
                Err(e)
            }
        }
    }

    /// Same as [`Self::request`] but resolves the kind from a name first.
    pub fn request_by_name(
        &mut self,
        catalog: &AfflictionCatalog,
        name: &str,
        duration: Option<f32>,
        target: &mut dyn StatTarget,
    ) -> Result<RequestOutcome, AfflictionError> {
        match name.parse::<AfflictionKind>() {
            Ok(kind) => self.request(catalog, kind, duration, target),
            Err(e) => {
                error!("Affliction request dropped: {}", e);
                Err(e)
            }
        }
    }

    /// Add a constructed instance, merging into an active one of the same name.
    pub fn add(&mut self, mut affliction: Affliction, target: &mut dyn StatTarget) -> RequestOutcome {
        if let Some(existing) = self.active.iter_mut().find(|a| a.name == affliction.name) {
            existing.duration += affliction.duration;
            info!(
                "Extended duration of {} by {:.1} seconds",
                existing.name, affliction.duration
            );
            return RequestOutcome::Extended {
                name: existing.name.clone(),
                added: affliction.duration,
                remaining: existing.duration,
            };
        }

        affliction.effect.apply(target);
        info!("Added new affliction: {} ({:.1}s)", affliction.name, affliction.duration);

        let outcome = RequestOutcome::Applied {
            name: affliction.name.clone(),
            duration: affliction.duration,
        };
        self.active.push(affliction);
        outcome
    }

    /// Count every affliction down by `dt` and remove the ones that ran out.
    ///
    /// Returns the names of removed afflictions in registry order.
    pub fn tick(&mut self, dt: f32, target: &mut dyn StatTarget) -> Vec<String> {
        let mut expired = Vec::new();

        // Reverse order so removal doesn't shift unvisited entries.
        for i in (0..self.active.len()).rev() {
            self.active[i].duration -= dt;

            if self.active[i].duration <= 0.0 {
                let mut affliction = self.active.remove(i);
                affliction.effect.remove(target);
                info!("Affliction expired and removed: {}", affliction.name);
                expired.push(affliction.name);
            }
        }

        expired.reverse();
        expired
    }

    pub fn has(&self, name: &str) -> bool {
        self.active.iter().any(|a| a.name == name)
    }

    pub fn has_kind(&self, kind: AfflictionKind) -> bool {
        self.active.iter().any(|a| a.kind == kind)
    }

    pub fn get(&self, name: &str) -> Option<&Affliction> {
        self.active.iter().find(|a| a.name == name)
    }

    pub fn snapshot(&self) -> Vec<AfflictionSnapshot> {
        self.active
            .iter()
            .map(|a| AfflictionSnapshot {
                kind: a.kind,
                name: a.name.clone(),
                icon: a.icon.clone(),
                remaining: a.duration,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
