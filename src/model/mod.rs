pub mod meta;
pub mod network;

pub use meta::*;
pub use network::*;

use std::any::Any;
use std::fmt::Debug;

use crate::SparcedError;

pub type T = f64;
pub type V = nalgebra::DVector<T>;
pub type M = nalgebra::DMatrix<T>;

/// The capability set a simulation runtime requires from a compiled model.
///
/// A model owns its parameter values, compartment volumes and initial
/// states. The equations themselves are fixed when the model is compiled.
/// Every instance is independent: changing the parameters of one model never
/// affects another, even when both were produced by the same factory.
pub trait Model: Debug + Send + Sync + 'static {
    /// Name of the compiled model, e.g. `SPARCED_tutorial`
    fn name(&self) -> &str;

    fn meta(&self) -> &ModelMeta;

    /// Number of state variables (species)
    fn nx(&self) -> usize {
        self.meta().states().len()
    }

    /// Number of free parameters (rate constants)
    fn np(&self) -> usize {
        self.meta().parameters().len()
    }

    /// Number of fixed parameters (compartment volumes)
    fn nk(&self) -> usize {
        self.meta().fixed_parameters().len()
    }

    /// Number of observables
    fn ny(&self) -> usize {
        self.meta().observables().len()
    }

    fn parameters(&self) -> &V;

    /// Replace all rate constants. Values must be finite and non-negative.
    fn set_parameters(&mut self, p: &[T]) -> Result<(), SparcedError>;

    fn set_parameter_by_id(&mut self, id: &str, value: T) -> Result<(), SparcedError> {
        let index = self
            .meta()
            .parameter_index(id)
            .ok_or_else(|| SparcedError::UnknownParameter(id.to_string()))?;
        let mut p: Vec<T> = self.parameters().iter().copied().collect();
        p[index] = value;
        self.set_parameters(&p)
    }

    fn fixed_parameters(&self) -> &V;

    /// Replace all compartment volumes. Values must be finite and positive.
    fn set_fixed_parameters(&mut self, k: &[T]) -> Result<(), SparcedError>;

    fn initial_states(&self) -> &V;

    /// Replace the initial concentrations. Values must be finite and non-negative.
    fn set_initial_states(&mut self, x0: &[T]) -> Result<(), SparcedError>;

    fn set_initial_state_by_id(&mut self, id: &str, value: T) -> Result<(), SparcedError> {
        let index = self
            .meta()
            .state_index(id)
            .ok_or_else(|| SparcedError::UnknownSpecies(id.to_string()))?;
        let mut x0: Vec<T> = self.initial_states().iter().copied().collect();
        x0[index] = value;
        self.set_initial_states(&x0)
    }

    /// Evaluate the right-hand side `dx = f(t, x)`.
    ///
    /// `x` and `dx` must both have length [Model::nx].
    fn rhs(&self, t: T, x: &V, dx: &mut V) -> Result<(), SparcedError>;

    /// Evaluate the dense Jacobian `j = df/dx` at `(t, x)`.
    ///
    /// `j` must be an `nx` by `nx` matrix; it is overwritten.
    fn jacobian(&self, t: T, x: &V, j: &mut M) -> Result<(), SparcedError>;

    /// Map the state `x` to the observables `y`, which must have length [Model::ny].
    fn observables(&self, t: T, x: &V, y: &mut V) -> Result<(), SparcedError>;

    fn clone_model(&self) -> Box<dyn Model>;

    /// Access the concrete model type, for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Model> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}
