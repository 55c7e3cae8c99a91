//! Reduced reference network for `SPARCED_standard`.
//!
//! Hand-written with illustrative rate constants. The generated SPARCED model
//! has several hundred species; this one keeps the receptor, ERK, PI3K/AKT and
//! cyclin D modules only.

use super::tutorial::receptor_erk;
use super::{compartments, generated_model};
use crate::model::NetworkBuilder;

generated_model!(
    /// `SPARCED_standard`: the receptor-to-ERK module extended with PI3K/AKT
    /// signaling and ERK-driven cyclin D expression.
    ///
    /// Models compiled under the name `SPARCED_I` resolve to this type.
    SparcedStandard,
    "SPARCED_standard",
    17,
    define
);

fn define() -> NetworkBuilder {
    observables(pi3k_akt_cyclin(receptor_erk(compartments(
        NetworkBuilder::new(SparcedStandard::NAME),
    ))))
}

pub(crate) fn pi3k_akt_cyclin(builder: NetworkBuilder) -> NetworkBuilder {
    builder
        .species("PI3K", "Cytoplasm", 45.0)
        .species("pEGFR_PI3K", "Cytoplasm", 0.0)
        .species("aPI3K", "Cytoplasm", 0.0)
        .species("AKT", "Cytoplasm", 120.0)
        .species("pAKT", "Cytoplasm", 0.0)
        .species("mCd", "Nucleus", 0.0)
        .species("Cd", "Cytoplasm", 0.0)
        .species("Cdk46", "Cytoplasm", 80.0)
        .species("Cd_Cdk46", "Cytoplasm", 0.0)
        .reaction("k11", "pEGFR + PI3K ; pEGFR_PI3K", 2.0e-4, "Cytoplasm")
        .reaction("k12", "pEGFR_PI3K ; pEGFR + PI3K", 1.0e-2, "Cytoplasm")
        .reaction("k13", "pEGFR_PI3K ; pEGFR + aPI3K", 3.0e-2, "Cytoplasm")
        .reaction("k14", "aPI3K ; PI3K", 5.0e-3, "Cytoplasm")
        .reaction("k15", "aPI3K + AKT ; aPI3K + pAKT", 1.0e-4, "Cytoplasm")
        .reaction("k16", "pAKT ; AKT", 2.0e-3, "Cytoplasm")
        .reaction("k17", "ppERK_n ; ppERK_n + mCd", 1.0e-3, "Nucleus")
        .reaction("k18", "mCd ; ", 2.0e-4, "Nucleus")
        .reaction("k19", "mCd ; mCd + Cd", 5.0e-3, "Nucleus")
        .reaction("k20", "Cd ; ", 3.0e-4, "Cytoplasm")
        .reaction("k21", "Cd + Cdk46 ; Cd_Cdk46", 1.0e-3, "Cytoplasm")
        .reaction("k22", "Cd_Cdk46 ; Cd + Cdk46", 1.0e-2, "Cytoplasm")
}

pub(crate) fn observables(builder: NetworkBuilder) -> NetworkBuilder {
    builder
        .observable("pEGFR_total", &[("pEGFR", 1.0), ("pEGFR_ERK", 1.0), ("pEGFR_PI3K", 1.0)])
        .observable("ppERK_total", &[("ppERK", 1.0), ("ppERK_n", 1.0)])
        .observable("pAKT", &[("pAKT", 1.0)])
        .observable("CycD_total", &[("Cd", 1.0), ("Cd_Cdk46", 1.0)])
}
