//! Reduced reference network for `SPARCED_tutorial`.
//!
//! This is a small hand-written network with illustrative rate constants, not
//! the generated SPARCED tables. It keeps the receptor-to-ERK topology and the
//! compartment layout of the SPARCED models.

use super::{compartments, generated_model};
use crate::model::NetworkBuilder;

generated_model!(
    /// `SPARCED_tutorial`: EGF receptor activation driving ERK phosphorylation
    /// and nuclear translocation.
    SparcedTutorial,
    "SPARCED_tutorial",
    8,
    define
);

fn define() -> NetworkBuilder {
    receptor_erk(compartments(NetworkBuilder::new(SparcedTutorial::NAME)))
        .observable("pEGFR_total", &[("pEGFR", 1.0), ("pEGFR_ERK", 1.0)])
        .observable("ppERK_total", &[("ppERK", 1.0), ("ppERK_n", 1.0)])
}

/// Species and reactions of the receptor-to-ERK module, shared by the larger
/// variants. Concentrations are in nM, rates in 1/s or 1/(nM s).
pub(crate) fn receptor_erk(builder: NetworkBuilder) -> NetworkBuilder {
    builder
        .species("EGF", "Extracellular", 0.0)
        .species("EGFR", "Cytoplasm", 35.0)
        .species("EGF_EGFR", "Cytoplasm", 0.0)
        .species("pEGFR", "Cytoplasm", 0.0)
        .species("ERK", "Cytoplasm", 250.0)
        .species("pEGFR_ERK", "Cytoplasm", 0.0)
        .species("ppERK", "Cytoplasm", 0.0)
        .species("ppERK_n", "Nucleus", 0.0)
        .reaction("k1", "EGF + EGFR ; EGF_EGFR", 3.0e-3, "Cytoplasm")
        .reaction("k2", "EGF_EGFR ; EGF + EGFR", 1.0e-2, "Cytoplasm")
        .reaction("k3", "EGF_EGFR ; pEGFR", 1.0e-1, "Cytoplasm")
        .reaction("k4", "pEGFR ; EGF_EGFR", 1.0e-2, "Cytoplasm")
        .reaction("k5", "pEGFR + ERK ; pEGFR_ERK", 1.0e-4, "Cytoplasm")
        .reaction("k6", "pEGFR_ERK ; pEGFR + ERK", 1.0e-2, "Cytoplasm")
        .reaction("k7", "pEGFR_ERK ; pEGFR + ppERK", 5.0e-2, "Cytoplasm")
        .reaction("k8", "ppERK ; ERK", 4.0e-3, "Cytoplasm")
        .reaction("k9", "ppERK ; ppERK_n", 2.0e-2, "Cytoplasm")
        .reaction("k10", "ppERK_n ; ppERK", 1.0e-2, "Nucleus")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, V};

    #[test]
    fn species_count_matches_compiled_constant() {
        let model = SparcedTutorial::new();
        assert_eq!(model.nx(), SparcedTutorial::NX);
        assert_eq!(model.np(), 10);
        assert_eq!(model.nk(), 3);
        assert_eq!(model.ny(), 2);
        assert_eq!(model.name(), "SPARCED_tutorial");
    }

    #[test]
    fn unstimulated_cell_is_at_rest() {
        let model = SparcedTutorial::new();
        let mut dx = V::zeros(model.nx());
        model.rhs(0.0, model.initial_states(), &mut dx).unwrap();
        assert!(dx.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn ligand_triggers_receptor_binding() {
        let mut model = SparcedTutorial::new();
        model.set_initial_state_by_id("EGF", 1.0).unwrap();
        let mut dx = V::zeros(model.nx());
        model.rhs(0.0, model.initial_states(), &mut dx).unwrap();
        let complex = model.meta().state_index("EGF_EGFR").unwrap();
        let receptor = model.meta().state_index("EGFR").unwrap();
        assert!(dx[complex] > 0.0);
        assert!(dx[receptor] < 0.0);
    }
}
