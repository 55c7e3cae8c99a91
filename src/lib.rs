//! Factories for compiled SPARCED signaling-network models.
//!
//! A compiled model exposes one entry point, [generic_model::get_model], which
//! returns a new, uniquely owned [Model]. The variant bound to it is chosen when
//! the crate is built (see [generic_model]). Hosts that need to pick a model at
//! runtime can use [Variant], or load compiled model libraries with the `dylib`
//! feature.
//!
//! ```
//! use sparced::prelude::*;
//!
//! let model = generic_model::get_model();
//! let mut dx = V::zeros(model.nx());
//! model.rhs(0.0, model.initial_states(), &mut dx).unwrap();
//! ```
//!
//! Solving the equations in time is left to the simulation runtime.

pub mod config;
pub mod dylib;
pub mod error;
pub mod generic_model;
pub mod model;
pub mod models;
pub mod perturbation;
pub mod variant;

pub use crate::config::ModelsConfig;
pub use crate::model::{Model, ModelMeta, NetworkBuilder, ReactionNetwork};
pub use crate::perturbation::{apply_perturbations, Perturbation};
pub use crate::variant::Variant;
pub use error::SparcedError;

pub mod prelude {
    pub use crate::generic_model::{self, get_model, instantiate};
    pub use crate::model::{Model, ModelMeta, M, T, V};
    pub use crate::models::{SparcedExp, SparcedStandard, SparcedTutorial};
    pub use crate::perturbation::{apply_perturbations, Perturbation};
    pub use crate::variant::Variant;
    pub use crate::{ModelsConfig, SparcedError};
}
