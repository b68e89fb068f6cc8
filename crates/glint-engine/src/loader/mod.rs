//! Entry-point tables for the windowing (EGL) and rendering (GLES) libraries.
//!
//! Both libraries are opened once at startup. Every required symbol must resolve
//! before anything else runs; a missing symbol is a [`LoadError`] naming it.

/// Declares a typed entry-point table resolved from one shared library.
macro_rules! entry_points {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $field:ident = $symbol:literal : fn($($arg:ty),* $(,)?) $(-> $ret:ty)?; )*
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            table: $crate::loader::EntryPointTable,
            $( $field: unsafe extern "C" fn($($arg),*) $(-> $ret)?, )*
        }

        impl $name {
            /// Symbols resolved by [`Self::load`].
            pub const SYMBOLS: &'static [&'static str] = &[$($symbol),*];

            /// Opens `library_name` and resolves every entry point.
            pub fn load(library_name: &str) -> Result<Self, $crate::loader::LoadError> {
                let table = $crate::loader::EntryPointTable::load(library_name, Self::SYMBOLS)?;
                // SAFETY: each field's type is the C signature of the symbol it is read from.
                unsafe {
                    Ok(Self {
                        $( $field: table.function($symbol)?, )*
                        table,
                    })
                }
            }

            pub fn table(&self) -> &$crate::loader::EntryPointTable {
                &self.table
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("library", &self.table.library_name())
                    .field("symbols", &Self::SYMBOLS.len())
                    .finish()
            }
        }
    };
}

mod egl;
mod error;
mod gl;
mod table;

pub use egl::EglEntryPoints;
pub use error::LoadError;
pub use gl::GlEntryPoints;
pub use table::EntryPointTable;

/// File names of the two native libraries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryNames {
    /// Windowing API (EGL).
    pub egl: String,
    /// Rendering API (OpenGL ES).
    pub gles: String,
}

impl Default for LibraryNames {
    fn default() -> Self {
        if cfg!(target_os = "android") {
            Self {
                egl: "libEGL.so".to_string(),
                gles: "libGLESv2.so".to_string(),
            }
        } else {
            Self {
                egl: "libEGL.so.1".to_string(),
                gles: "libGLESv2.so.2".to_string(),
            }
        }
    }
}
