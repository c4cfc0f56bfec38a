#![no_std]

pub mod framer;
pub mod store;
pub mod stream;

pub use framer::{BUFFER_SIZE, FeedEvent, Framer};
pub use store::{Snapshot, Store};

pub use nmea;
pub use quectel;
