//! The factory entry point of a compiled model.
//!
//! A build of this crate binds exactly one model variant to [get_model],
//! chosen with a cargo feature:
//!
//! | feature    | model              |
//! |------------|--------------------|
//! | `exp`      | `SPARCED_exp`      |
//! | `standard` | `SPARCED_standard` |
//! | `tutorial` | `SPARCED_tutorial` |
//!
//! When several features are enabled (cargo unifies features across a
//! workspace), the first one in the table above wins. At least one must be
//! enabled; `tutorial` is the default.
//!
//! With the `export` feature the bound variant is also exported through the
//! well-known entry point (see [export_model](crate::export_model)), so that
//! `cargo build --lib --no-default-features --features exp,export` produces the
//! `SPARCED_exp` model library.
//!
//! Hosts that need several variants in one process should use
//! [Variant](crate::Variant) instead, or load one compiled library per model
//! through the `dylib` feature.

use crate::model::Model;

#[cfg(not(any(feature = "exp", feature = "standard", feature = "tutorial")))]
compile_error!("no model variant selected, enable one of the features `tutorial`, `standard` or `exp`");

#[cfg(feature = "exp")]
pub type CompiledModel = crate::models::SparcedExp;

#[cfg(all(feature = "standard", not(feature = "exp")))]
pub type CompiledModel = crate::models::SparcedStandard;

#[cfg(all(
    feature = "tutorial",
    not(any(feature = "exp", feature = "standard"))
))]
pub type CompiledModel = crate::models::SparcedTutorial;

#[cfg(feature = "export")]
crate::export_model!(crate::generic_model::CompiledModel);

/// Construct a new model of type `M`, transferring sole ownership to the caller.
pub fn instantiate<M: Model + Default>() -> Box<dyn Model> {
    Box::new(M::default())
}

/// Construct a new instance of the model compiled into this build.
///
/// Every call returns an independent, freshly initialized model. No state is
/// shared between calls.
pub fn get_model() -> Box<dyn Model> {
    instantiate::<CompiledModel>()
}
