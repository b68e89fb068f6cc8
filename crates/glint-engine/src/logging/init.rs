use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "glint_engine=debug").
///
/// `write_style` controls ANSI coloring on desktop. `android_tag` is the tag
/// records carry in logcat.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub android_tag: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            android_tag: "glint".to_string(),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored. Call it before the
/// event loop is created so native library loading is logged.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        install(config);
        log::debug!("logging initialized");
    });
}

fn filter_directives(config: &LoggingConfig) -> Option<String> {
    config
        .env_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
}

#[cfg(not(target_os = "android"))]
fn install(config: LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    match filter_directives(&config) {
        Some(filter) => {
            builder.parse_filters(&filter);
        }
        None => {
            builder.filter_level(log::LevelFilter::Info);
        }
    }

    builder.write_style(config.write_style);
    builder.init();
}

// stderr goes nowhere on Android; records go to logcat instead.
#[cfg(target_os = "android")]
fn install(config: LoggingConfig) {
    let mut filter = android_logger::FilterBuilder::new();
    match filter_directives(&config) {
        Some(directives) => {
            filter.parse(&directives);
        }
        None => {
            filter.filter_level(log::LevelFilter::Info);
        }
    }
    let filter = filter.build();

    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(filter.filter())
            .with_tag(config.android_tag)
            .with_filter(filter),
    );
}
