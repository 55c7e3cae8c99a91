use std::ffi::{c_char, c_void, CStr};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use super::export::{take_model, GET_MODEL_SYMBOL, VERSION, VERSION_SYMBOL};
use crate::config::ModelsConfig;
use crate::model::Model;
use crate::variant::sanitize_name;
use crate::SparcedError;

/// A model obtained from a dynamically loaded library.
///
/// Dereferences to the model. The library stays loaded for as long as this
/// value exists.
pub struct LoadedModel {
    // Declared before the library: fields drop in order, and the model's code
    // lives in the library.
    model: Box<dyn Model>,
    path: PathBuf,
    _library: Library,
}

impl LoadedModel {
    /// Path of the library the model was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An independent copy of the model.
    ///
    /// The copy still executes code from the library, so it must not outlive
    /// this value.
    pub fn fresh_copy(&self) -> Box<dyn Model> {
        self.model.clone_model()
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("model", &self.model.name())
            .field("path", &self.path)
            .finish()
    }
}

impl Deref for LoadedModel {
    type Target = dyn Model;

    fn deref(&self) -> &Self::Target {
        self.model.as_ref()
    }
}

impl DerefMut for LoadedModel {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.model.as_mut()
    }
}

/// Loads the model exported by a compiled library.
///
/// # Safety
///
/// This function is unsafe because:
/// - It runs initialization code of an arbitrary library and calls into it over FFI.
/// - The library must have been produced by [export_model](crate::export_model) with the
///   same compiler; only the crate version can be checked here.
///
/// # Errors
///
/// Fails when the library cannot be opened, misses one of the entry point symbols,
/// or was built against another version of this crate.
pub unsafe fn load(model_path: impl AsRef<Path>) -> Result<LoadedModel, SparcedError> {
    let path = model_path.as_ref().to_path_buf();
    let library = unsafe { Library::new(&path)? };

    let model = {
        let version: Symbol<unsafe extern "C" fn() -> *const c_char> =
            unsafe { library.get(VERSION_SYMBOL)? };
        let found = unsafe { CStr::from_ptr(version()) }
            .to_string_lossy()
            .into_owned();
        let expected = VERSION.trim_end_matches('\0');
        if found != expected {
            tracing::warn!(
                "Refusing model library {} built with version {}",
                path.display(),
                found
            );
            return Err(SparcedError::IncompatibleModel {
                path: path.display().to_string(),
                found,
                expected: expected.to_string(),
            });
        }

        let get_model: Symbol<unsafe extern "C" fn() -> *mut c_void> =
            unsafe { library.get(GET_MODEL_SYMBOL)? };
        unsafe { take_model(get_model()) }
    };

    tracing::info!("Loaded model {} from {}", model.name(), path.display());
    Ok(LoadedModel {
        model,
        path,
        _library: library,
    })
}

/// Path of the compiled library for model `name`, following the layout of
/// [ModelsConfig::model_directory].
pub fn library_path(config: &ModelsConfig, name: &str) -> Result<PathBuf, SparcedError> {
    let name = sanitize_name(name)?;
    Ok(config
        .model_directory(&name)?
        .join(libloading::library_filename(&name)))
}

/// Loads model `name` from the models directory.
///
/// # Safety
///
/// See [load].
pub unsafe fn load_by_name(config: &ModelsConfig, name: &str) -> Result<LoadedModel, SparcedError> {
    let path = library_path(config, name)?;
    unsafe { load(path) }
}
