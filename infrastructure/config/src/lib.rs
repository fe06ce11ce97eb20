mod merge;
pub mod telemetry;

use std::path::PathBuf;

#[rustfmt::skip]
pub use {
    merge::{merge, MergeException, MergeResult},
    telemetry::{initialize_telemetry, TelemetryConfig},
};

/// Layer configuration sources, later ones win:
///
/// 1. optional yaml file `name` in the working directory;
/// 2. every file in `extra_files`, all optional;
/// 3. environment variables `<PREFIX>__SECTION__KEY`.
pub fn build_config(
    name: &str,
    prefix: &str,
    extra_files: &[PathBuf],
) -> anyhow::Result<config::Config> {
    let mut config = config::Config::builder().add_source(
        config::File::with_name(name)
            .required(false)
            .format(config::FileFormat::Yaml),
    );
    for path in extra_files {
        tracing::debug!("Adding config source {}", path.display());
        config = config.add_source(
            config::File::from(path.as_path())
                .format(config::FileFormat::Yaml)
                .required(false),
        );
    }
    config = config.add_source(
        config::Environment::with_prefix(prefix)
            .separator("__")
            .try_parsing(true),
    );
    Ok(config.build()?)
}
