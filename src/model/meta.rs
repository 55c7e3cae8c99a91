use serde::{Deserialize, Serialize};

/// Identifiers exposed by a compiled model.
///
/// Index `i` of each list names entry `i` of the corresponding value vector
/// (states, parameters, fixed parameters and observables).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    states: Vec<String>,
    parameters: Vec<String>,
    fixed_parameters: Vec<String>,
    observables: Vec<String>,
}

impl ModelMeta {
    pub fn new(
        states: Vec<String>,
        parameters: Vec<String>,
        fixed_parameters: Vec<String>,
        observables: Vec<String>,
    ) -> Self {
        ModelMeta {
            states,
            parameters,
            fixed_parameters,
            observables,
        }
    }

    /// Species identifiers, in state-vector order
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Rate constant identifiers, in parameter-vector order
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Compartment identifiers; their volumes are the fixed parameters
    pub fn fixed_parameters(&self) -> &[String] {
        &self.fixed_parameters
    }

    pub fn observables(&self) -> &[String] {
        &self.observables
    }

    pub fn state_index(&self, id: &str) -> Option<usize> {
        self.states.iter().position(|s| s == id)
    }

    pub fn parameter_index(&self, id: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p == id)
    }

    pub fn observable_index(&self, id: &str) -> Option<usize> {
        self.observables.iter().position(|o| o == id)
    }

    /// Serialize the metadata as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
