use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::error::DriverError;

pub const DEFAULT_PATH: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD: u32 = 9600;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq)]
pub struct PortConfig {
    pub path: String,
    pub baud: u32,
    /// Upper bound on how long one read blocks, which is also how quickly
    /// the reader notices a stop request
    pub read_timeout: Duration,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_owned(),
            baud: DEFAULT_BAUD,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Opens the receiver's UART, 8N1 without flow control.
pub fn open(config: &PortConfig) -> Result<Box<dyn SerialPort>, DriverError> {
    serialport::new(&config.path, config.baud)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(config.read_timeout)
        .open()
        .map_err(|source| DriverError::Open {
            port: config.path.clone(),
            source,
        })
}
