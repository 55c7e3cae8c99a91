//! Reduced reference network for `SPARCED_exp`: the reduced standard network
//! plus an inhibitor, with illustrative rate constants.

use super::standard::{observables, pi3k_akt_cyclin};
use super::tutorial::receptor_erk;
use super::{compartments, generated_model};
use crate::model::NetworkBuilder;

generated_model!(
    /// `SPARCED_exp`: the standard network with an ERK-sequestering inhibitor
    /// added for dose-response experiments.
    SparcedExp,
    "SPARCED_exp",
    19,
    define
);

fn define() -> NetworkBuilder {
    observables(pi3k_akt_cyclin(receptor_erk(compartments(
        NetworkBuilder::new(SparcedExp::NAME),
    ))))
    .species("Inhibitor", "Extracellular", 0.0)
    .species("Inhibitor_ERK", "Cytoplasm", 0.0)
    .reaction("k23", "Inhibitor + ERK ; Inhibitor_ERK", 5.0e-3, "Cytoplasm")
    .reaction("k24", "Inhibitor_ERK ; Inhibitor + ERK", 1.0e-3, "Cytoplasm")
    .observable("ERK_bound", &[("Inhibitor_ERK", 1.0)])
}
