//! A model library reporting a release of `sparced` other than the one
//! loading it.

use std::ffi::{c_char, c_void};

use sparced::generic_model::instantiate;
use sparced::models::SparcedTutorial;

#[no_mangle]
pub extern "C" fn sparced_generic_model_get_model() -> *mut c_void {
    Box::into_raw(Box::new(instantiate::<SparcedTutorial>())) as *mut c_void
}

#[no_mangle]
pub extern "C" fn sparced_model_version() -> *const c_char {
    b"0.0.0-stale\0".as_ptr() as *const c_char
}
