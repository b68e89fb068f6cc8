/// Startup failure while resolving native entry points.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {library}: {reason}")]
    OpenLibrary { library: String, reason: String },

    #[error("failed to load {symbol} from {library}: {reason}")]
    MissingSymbol {
        library: String,
        symbol: &'static str,
        reason: String,
    },
}

impl LoadError {
    /// The unresolved symbol, if this is a symbol failure.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::MissingSymbol { symbol, .. } => Some(*symbol),
            Self::OpenLibrary { .. } => None,
        }
    }
}
