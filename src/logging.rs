use std::env;

use log::LevelFilter;

/// Initialise the stderr logger.
///
/// `verbose` selects Debug instead of Info; an explicit `RUST_LOG` wins over both.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.init();
    log::debug!("logger initialized at {:?} level", level);
}
