use std::path::PathBuf;

use log::LevelFilter;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// Write a log to this file (the terminal is taken by the game)
    #[clap(long)]
    log_file: Option<PathBuf>,
    /// Most verbose level written to the log file
    #[clap(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

/// Installs the file logger. Without `--log-file` no logger is installed and every
/// `log` macro is a no-op.
pub(crate) fn init(arg: &LogArg) -> anyhow::Result<()> {
    let Some(path) = &arg.log_file else {
        return Ok(());
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(arg.log_level)
        .chain(fern::log_file(path)?)
        .apply()?;

    log::info!("logging to {} at level {}", path.display(), arg.log_level);
    Ok(())
}
