use std::path::PathBuf;

use serde::*;
use tracing::metadata::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

/// Logging setup: a global filter, console output and an optional log file.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Install a subscriber at all.
    pub enable: bool,
    #[serde(flatten)]
    pub filter: FilterConfig,
    pub console: ConsoleOutput,
    pub file: FileOutput,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: true,
            filter: Default::default(),
            console: Default::default(),
            file: Default::default(),
        }
    }
}

/// Level and directives of one filter.
#[derive(Default, Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct FilterConfig {
    pub max_level: LoggingLevel,
    /// Directives such as `service_upload=trace`.
    pub level_filter: String,
    /// Environment variable holding more directives.
    pub level_filter_env: String,
}

impl FilterConfig {
    pub fn env_filter(&self) -> EnvFilter {
        let mut directives = self.level_filter.clone();
        if let Ok(extra) = std::env::var(&self.level_filter_env) {
            directives = format!("{directives},{extra}");
        }
        EnvFilter::builder()
            .with_default_directive(self.max_level.into())
            .parse_lossy(directives)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct ConsoleOutput {
    pub enable: bool,
    /// Print file, line, thread id and target.
    pub verbose: bool,
    #[serde(flatten)]
    pub filter: FilterConfig,
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self {
            enable: true,
            verbose: false,
            filter: Default::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct FileOutput {
    pub enable: bool,
    pub verbose: bool,
    #[serde(flatten)]
    pub filter: FilterConfig,
    pub directory: PathBuf,
    /// File name, or its prefix when rolling.
    pub prefix: String,
    pub rotation: RotationLevel,
}

impl Default for FileOutput {
    fn default() -> Self {
        Self {
            enable: false,
            verbose: false,
            filter: Default::default(),
            directory: PathBuf::from("./logs"),
            prefix: "uploader.log".to_owned(),
            rotation: Default::default(),
        }
    }
}

#[derive(Default, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LoggingLevel> for LevelFilter {
    fn from(level: LoggingLevel) -> Self {
        match level {
            LoggingLevel::Error => LevelFilter::ERROR,
            LoggingLevel::Warn => LevelFilter::WARN,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Trace => LevelFilter::TRACE,
            LoggingLevel::Off => LevelFilter::OFF,
        }
    }
}

impl From<LoggingLevel> for tracing_subscriber::filter::Directive {
    fn from(level: LoggingLevel) -> Self {
        LevelFilter::from(level).into()
    }
}

/// `Never` keeps writing one file.
#[derive(Default, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationLevel {
    Daily,
    Hourly,
    Minutely,
    #[default]
    Never,
}

impl From<RotationLevel> for Rotation {
    fn from(level: RotationLevel) -> Self {
        match level {
            RotationLevel::Daily => Rotation::DAILY,
            RotationLevel::Hourly => Rotation::HOURLY,
            RotationLevel::Minutely => Rotation::MINUTELY,
            RotationLevel::Never => Rotation::NEVER,
        }
    }
}
