//! Core module - states, events, data loading and shared primitives.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod plugin;
mod rng;
mod shared;
mod states;

pub use data::{insert_loaded, load_or_default, read_ron, DataDir};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use rng::SimRng;
pub use shared::{SharedFlag, SharedScalar};
pub use states::*;
