//! Compiled SPARCED model variants.
//!
//! Each variant is a distinct type wrapping a reaction network. The equations
//! are fixed per type; only values (rate constants, compartment volumes and
//! initial concentrations) change at runtime.
//!
//! The networks shipped here are reduced reference networks that share the
//! names, compartments and signaling topology of the SPARCED models. They are
//! not the generated model tables, and their rate constants are illustrative.

use crate::model::NetworkBuilder;

/// Compartment volumes shared by every SPARCED variant, in litres.
pub(crate) const VOLUME_EXTRACELLULAR: f64 = 5.0e-5;
pub(crate) const VOLUME_CYTOPLASM: f64 = 5.25e-12;
pub(crate) const VOLUME_NUCLEUS: f64 = 1.75e-12;

pub(crate) fn compartments(builder: NetworkBuilder) -> NetworkBuilder {
    builder
        .compartment("Extracellular", VOLUME_EXTRACELLULAR)
        .compartment("Cytoplasm", VOLUME_CYTOPLASM)
        .compartment("Nucleus", VOLUME_NUCLEUS)
}

/// Declares a model type backed by a generated [ReactionNetwork](crate::model::ReactionNetwork).
///
/// `$define` must return the [NetworkBuilder](crate::model::NetworkBuilder) for the model.
/// The network tables are compiled into the crate and covered by tests, so a
/// failure to build them is a defect of the generated tables.
macro_rules! generated_model {
    ($(#[$attr:meta])* $ty:ident, $name:literal, $nx:expr, $define:path) => {
        $(#[$attr])*
        #[derive(Debug, Clone)]
        pub struct $ty {
            network: $crate::model::ReactionNetwork,
        }

        impl $ty {
            pub const NAME: &'static str = $name;
            /// Number of species in the compiled model
            pub const NX: usize = $nx;

            /// # Panics
            ///
            /// Panics if the compiled network tables are inconsistent.
            pub fn new() -> Self {
                let network = $define()
                    .build()
                    .unwrap_or_else(|e| panic!("generated model {} is malformed: {}", $name, e));
                tracing::debug!("Constructed model {}", $name);
                Self { network }
            }

            pub fn network(&self) -> &$crate::model::ReactionNetwork {
                &self.network
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::model::Model for $ty {
            fn name(&self) -> &str {
                $crate::model::Model::name(&self.network)
            }

            fn meta(&self) -> &$crate::model::ModelMeta {
                $crate::model::Model::meta(&self.network)
            }

            fn parameters(&self) -> &$crate::model::V {
                $crate::model::Model::parameters(&self.network)
            }

            fn set_parameters(&mut self, p: &[f64]) -> Result<(), $crate::SparcedError> {
                $crate::model::Model::set_parameters(&mut self.network, p)
            }

            fn fixed_parameters(&self) -> &$crate::model::V {
                $crate::model::Model::fixed_parameters(&self.network)
            }

            fn set_fixed_parameters(&mut self, k: &[f64]) -> Result<(), $crate::SparcedError> {
                $crate::model::Model::set_fixed_parameters(&mut self.network, k)
            }

            fn initial_states(&self) -> &$crate::model::V {
                $crate::model::Model::initial_states(&self.network)
            }

            fn set_initial_states(&mut self, x0: &[f64]) -> Result<(), $crate::SparcedError> {
                $crate::model::Model::set_initial_states(&mut self.network, x0)
            }

            fn rhs(
                &self,
                t: f64,
                x: &$crate::model::V,
                dx: &mut $crate::model::V,
            ) -> Result<(), $crate::SparcedError> {
                $crate::model::Model::rhs(&self.network, t, x, dx)
            }

            fn jacobian(
                &self,
                t: f64,
                x: &$crate::model::V,
                j: &mut $crate::model::M,
            ) -> Result<(), $crate::SparcedError> {
                $crate::model::Model::jacobian(&self.network, t, x, j)
            }

            fn observables(
                &self,
                t: f64,
                x: &$crate::model::V,
                y: &mut $crate::model::V,
            ) -> Result<(), $crate::SparcedError> {
                $crate::model::Model::observables(&self.network, t, x, y)
            }

            fn clone_model(&self) -> Box<dyn $crate::model::Model> {
                Box::new(self.clone())
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

pub(crate) use generated_model;

pub mod exp;
pub mod standard;
pub mod tutorial;

pub use exp::SparcedExp;
pub use standard::SparcedStandard;
pub use tutorial::SparcedTutorial;
