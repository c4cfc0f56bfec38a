//! Host side of a Quectel LCx6x receiver: serial port setup, a reader thread
//! that keeps the latest sentences and output rates, and the commands that
//! configure the receiver.

pub mod config;
pub mod device;
pub mod error;
pub mod port;
pub mod status;

pub use device::{Device, SharedStore};
pub use error::DriverError;
pub use status::Status;
