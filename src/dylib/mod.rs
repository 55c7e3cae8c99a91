//! The `dylib` module exposes a compiled model through a well-known entry
//! point, and loads such models back at runtime.
//!
//! - `export`: the [export_model](crate::export_model) macro and the symbol names it defines.
//! - `load`: opening a compiled model library (requires the `dylib` feature).

pub mod export;
#[cfg(feature = "dylib")]
pub mod load;

pub use export::*;
