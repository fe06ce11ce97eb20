mod config;

pub use self::config::*;

use tracing::Subscriber;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer,
    Registry,
};

fn output_layer<S, W>(verbose: bool, filter: &FilterConfig, ansi: bool, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_writer(writer)
        .with_file(verbose)
        .with_line_number(verbose)
        .with_thread_ids(verbose)
        .with_target(verbose)
        .with_filter(filter.env_filter())
}

/// Install the global subscriber described by `config`.
///
/// Fails when a global subscriber is already set.
pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let console = &config.console;
    let console = console
        .enable
        .then(|| output_layer(console.verbose, &console.filter, true, std::io::stdout));
    let file = &config.file;
    let file = file.enable.then(|| {
        let appender =
            RollingFileAppender::new(file.rotation.into(), &file.directory, &file.prefix);
        output_layer(file.verbose, &file.filter, false, appender)
    });
    Registry::default()
        .with(config.filter.env_filter())
        .with(console)
        .with(file)
        .try_init()?;
    Ok(())
}
