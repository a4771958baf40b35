//! Log setup built on fern.

use anyhow::Result;
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Install the global logger described by the configuration.
///
/// Logs go to stdout, plus a file when the config names one. The `log`
/// facade only accepts one installation per process, so the binary calls
/// this exactly once at startup.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let level: LevelFilter = config.level.parse()?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = &config.file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
