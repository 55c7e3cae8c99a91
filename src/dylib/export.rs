use std::ffi::c_void;

use crate::model::Model;

/// Symbol of the factory entry point defined by [export_model](crate::export_model)
pub const GET_MODEL_SYMBOL: &[u8] = b"sparced_generic_model_get_model";

/// Symbol returning the crate version a model library was built with
pub const VERSION_SYMBOL: &[u8] = b"sparced_model_version";

/// Crate version, nul-terminated for the C ABI
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Define the factory entry point of a model library.
///
/// Invoke once in a `cdylib` crate to expose `$model` through
/// `sparced_generic_model_get_model`, together with `sparced_model_version`.
/// This crate invokes it for its own compiled model when built with the
/// `export` feature, so a host built with `dylib` must leave `export` off.
///
/// ```ignore
/// sparced::export_model!(sparced::models::SparcedTutorial);
/// ```
#[macro_export]
macro_rules! export_model {
    ($model:ty) => {
        /// Returns a `Box<Box<dyn Model>>` as an opaque pointer. Ownership
        /// passes to the caller.
        #[no_mangle]
        pub extern "C" fn sparced_generic_model_get_model() -> *mut ::std::ffi::c_void {
            let model = $crate::generic_model::instantiate::<$model>();
            ::std::boxed::Box::into_raw(::std::boxed::Box::new(model)) as *mut ::std::ffi::c_void
        }

        #[no_mangle]
        pub extern "C" fn sparced_model_version() -> *const ::std::ffi::c_char {
            $crate::dylib::VERSION.as_ptr() as *const ::std::ffi::c_char
        }
    };
}

/// Take ownership of a model returned by the factory entry point.
///
/// # Safety
///
/// `raw` must come from `sparced_generic_model_get_model`, built with the
/// same compiler and crate version, and must not be used afterwards. When the
/// model comes from a dynamically loaded library, that library must outlive
/// the returned model.
pub unsafe fn take_model(raw: *mut c_void) -> Box<dyn Model> {
    unsafe { *Box::from_raw(raw as *mut Box<dyn Model>) }
}
