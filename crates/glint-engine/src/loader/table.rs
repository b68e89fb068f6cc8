use std::collections::HashMap;
use std::ffi::c_void;

use libloading::Library;

use super::LoadError;

/// Immutable map from symbol name to resolved address in one shared library.
///
/// The library stays loaded for as long as the table (and any typed table built
/// from it) is alive.
#[derive(Debug)]
pub struct EntryPointTable {
    library_name: String,
    symbols: HashMap<&'static str, *mut c_void>,
    _library: Library,
}

impl EntryPointTable {
    /// Opens `library_name` and resolves every name in `required`.
    ///
    /// Fails on the first symbol that cannot be resolved, naming it together with
    /// the loader's error string.
    pub fn load(library_name: &str, required: &[&'static str]) -> Result<Self, LoadError> {
        // SAFETY: opening runs the library's initializers; only system graphics
        // libraries are loaded through this path.
        let library = unsafe { Library::new(library_name) }.map_err(|err| LoadError::OpenLibrary {
            library: library_name.to_string(),
            reason: err.to_string(),
        })?;

        let mut symbols = HashMap::with_capacity(required.len());
        for &name in required {
            let missing = |reason: String| LoadError::MissingSymbol {
                library: library_name.to_string(),
                symbol: name,
                reason,
            };

            // SAFETY: the address is only read here; typing happens in `function`.
            let address = unsafe { library.get::<*mut c_void>(name.as_bytes()) }
                .map(|symbol| *symbol)
                .map_err(|err| missing(err.to_string()))?;

            if address.is_null() {
                return Err(missing("symbol resolved to null".to_string()));
            }
            symbols.insert(name, address);
        }

        log::debug!("resolved {} entry points from {library_name}", symbols.len());

        Ok(Self {
            library_name: library_name.to_string(),
            symbols,
            _library: library,
        })
    }

    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn address(&self, name: &str) -> Option<*mut c_void> {
        self.symbols.get(name).copied()
    }

    /// Returns the entry point `name` as the function pointer type `F`.
    ///
    /// # Safety
    ///
    /// `F` must be an `unsafe extern "C" fn` type matching the symbol's C signature,
    /// and the returned pointer must not outlive this table.
    pub unsafe fn function<F: Copy>(&self, name: &'static str) -> Result<F, LoadError> {
        assert_eq!(
            size_of::<F>(),
            size_of::<*mut c_void>(),
            "entry point type must be a function pointer"
        );

        let address = self.address(name).ok_or_else(|| LoadError::MissingSymbol {
            library: self.library_name.clone(),
            symbol: name,
            reason: "not among the required symbols".to_string(),
        })?;

        // SAFETY: sizes match (checked above); the caller guarantees the signature.
        Ok(unsafe { std::mem::transmute_copy::<*mut c_void, F>(&address) })
    }
}
