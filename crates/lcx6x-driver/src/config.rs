use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use quectel::NmeaSubId;
use serde::Deserialize;

use crate::device::DEFAULT_SETTLE;
use crate::error::DriverError;
use crate::port::{DEFAULT_BAUD, DEFAULT_PATH, DEFAULT_READ_TIMEOUT, PortConfig};

#[derive(Parser, Debug)]
#[command(name = "lcx6x-driver", version)]
#[command(about = "Monitor and configure a Quectel LCx6x GNSS receiver")]
pub struct Cli {
    /// Serial port the receiver is attached to [default: /dev/ttyUSB0]
    #[arg(short, long, global = true)]
    pub port: Option<String>,
    /// [default: 9600]
    #[arg(short, long, global = true)]
    pub baud: Option<u32>,
    /// [default: 100]
    #[arg(long, global = true)]
    pub read_timeout_ms: Option<u64>,
    /// How long to wait for the answer to a query [default: 200]
    #[arg(long, global = true)]
    pub settle_ms: Option<u64>,
    /// TOML file providing any of the options above, and a [rates] table
    /// applied at start
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print a position summary until interrupted
    Monitor {
        #[arg(long, default_value_t = 1)]
        interval_secs: u64,
    },
    /// Set output rates: `set-rate RMC 5` or `set-rate GGA:1,RMC:5`
    SetRate {
        #[arg(required = true, num_args = 1..)]
        rates: Vec<String>,
    },
    /// Print output rates, of every sentence when none is named
    QueryRate { sentences: Vec<NmeaSubId> },
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub port: Option<String>,
    pub baud: Option<u32>,
    pub read_timeout_ms: Option<u64>,
    pub settle_ms: Option<u64>,
    /// Sentence name to output rate
    pub rates: BTreeMap<String, u8>,
}

impl FileSettings {
    pub fn read(path: &Path) -> Result<Self, DriverError> {
        let text = fs::read_to_string(path).map_err(|source| DriverError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| DriverError::ParseConfig {
            path: path.to_owned(),
            source,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub port: PortConfig,
    pub settle: Duration,
    /// Output rates to apply once the port is open
    pub rates: Vec<(NmeaSubId, u8)>,
}

impl Settings {
    /// Command line values win over the config file, which wins over the
    /// built-in defaults.
    pub fn load(cli: &Cli) -> Result<Self, DriverError> {
        let file = match &cli.config {
            Some(path) => FileSettings::read(path)?,
            None => FileSettings::default(),
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: FileSettings) -> Result<Self, DriverError> {
        let rates = file
            .rates
            .iter()
            .map(|(id, &rate)| {
                id.parse::<NmeaSubId>()
                    .map(|id| (id, rate))
                    .map_err(|_| DriverError::RateSetting(format!("{id}:{rate}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            port: PortConfig {
                path: cli
                    .port
                    .clone()
                    .or(file.port)
                    .unwrap_or_else(|| DEFAULT_PATH.to_owned()),
                baud: cli.baud.or(file.baud).unwrap_or(DEFAULT_BAUD),
                read_timeout: cli
                    .read_timeout_ms
                    .or(file.read_timeout_ms)
                    .map_or(DEFAULT_READ_TIMEOUT, Duration::from_millis),
            },
            settle: cli
                .settle_ms
                .or(file.settle_ms)
                .map_or(DEFAULT_SETTLE, Duration::from_millis),
            rates,
        })
    }
}

fn rate_setting(id: &str, rate: &str) -> Option<(NmeaSubId, u8)> {
    Some((id.parse().ok()?, rate.trim().parse().ok()?))
}

/// Accepts `["RMC", "5"]` as well as lists like `["GGA:1,RMC:5", "VTG=0"]`.
pub fn parse_rates(args: &[String]) -> Result<Vec<(NmeaSubId, u8)>, DriverError> {
    if let [id, rate] = args {
        if !id.contains([':', '=']) {
            return rate_setting(id, rate)
                .map(|setting| vec![setting])
                .ok_or_else(|| DriverError::RateSetting(format!("{id} {rate}")));
        }
    }

    let rates = args
        .iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.split_once([':', '='])
                .and_then(|(id, rate)| rate_setting(id, rate))
                .ok_or_else(|| DriverError::RateSetting(item.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if rates.is_empty() {
        return Err(DriverError::RateSetting(args.join(" ")));
    }
    Ok(rates)
}
