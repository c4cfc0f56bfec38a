use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to open serial port {port}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("failed to write to the receiver")]
    Write(#[from] io::Error),
    #[error("failed to start the reader thread")]
    Spawn(#[source] io::Error),
    #[error("reader thread panicked")]
    WorkerPanicked,
    #[error("failed to read {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid output rate setting `{0}`, expected SENTENCE:RATE")]
    RateSetting(String),
}
