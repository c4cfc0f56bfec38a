#![no_std]

pub mod checksum;
pub mod error;
pub mod field;
pub mod messages;
pub mod parser;

pub use error::Error;
pub use parser::{Kind, Sentence, SentenceData, classify, parse};
