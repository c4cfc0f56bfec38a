use core::fmt;

use crate::id::{CFG_MSG, GROUP_CFG, GROUP_RES, RES_ACK, RES_NAK};
use crate::{
    FRAME_CHECKSUM_SIZE, FRAME_GROUP_OFFSET, FRAME_LENGTH_OFFSET, FRAME_METADATA_SIZE,
    FRAME_PAYLOAD_OFFSET, FRAME_SUB_OFFSET, MAGIC1, MAGIC2, checksum,
};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<'a> {
    pub group: u8,
    pub sub: u8,
    pub payload: &'a [u8],
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event<'a> {
    /// The receiver accepted the message `group`/`sub`
    Ack { group: u8, sub: u8 },
    /// The receiver rejected the message `group`/`sub`
    Nak { group: u8, sub: u8 },
    /// Output rate currently configured for the message `group`/`sub`
    OutputRate { group: u8, sub: u8, rate: u8 },
    /// A valid frame this driver has no use for
    Unhandled(Frame<'a>),
}

impl<'a> From<Frame<'a>> for Event<'a> {
    fn from(frame: Frame<'a>) -> Self {
        match (frame.group, frame.sub, frame.payload) {
            (GROUP_RES, RES_ACK, [group, sub, ..]) => Event::Ack {
                group: *group,
                sub: *sub,
            },
            (GROUP_RES, RES_NAK, [group, sub, ..]) => Event::Nak {
                group: *group,
                sub: *sub,
            },
            (GROUP_CFG, CFG_MSG, [group, sub, rate, ..]) => Event::OutputRate {
                group: *group,
                sub: *sub,
                rate: *rate,
            },
            _ => Event::Unhandled(frame),
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameError {
    /// More bytes are needed; nothing was consumed
    Incomplete,
    BadMagic,
    ChecksumMismatch { expected: u16, actual: u16 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Incomplete => write!(f, "incomplete frame"),
            FrameError::BadMagic => write!(f, "not a binary frame"),
            FrameError::ChecksumMismatch { expected, actual } => write!(
                f,
                "checksum mismatch, expected: {expected:04X}, actual: {actual:04X}"
            ),
        }
    }
}

impl core::error::Error for FrameError {}

/// Decodes the frame at the start of `buf`.
///
/// Returns the number of bytes the caller should drop along with the result:
/// 0 when incomplete, 1 when `buf` does not start with the magic, and the
/// whole frame length otherwise, including frames failing the checksum.
pub fn parse_frame(buf: &[u8]) -> (usize, Result<Event<'_>, FrameError>) {
    match buf {
        [MAGIC1, MAGIC2, ..] => (),
        [] | [MAGIC1] => return (0, Err(FrameError::Incomplete)),
        _ => return (1, Err(FrameError::BadMagic)),
    }

    if buf.len() < FRAME_PAYLOAD_OFFSET {
        return (0, Err(FrameError::Incomplete));
    }

    let payload_size =
        u16::from_le_bytes([buf[FRAME_LENGTH_OFFSET], buf[FRAME_LENGTH_OFFSET + 1]]) as usize;
    let frame_size = FRAME_METADATA_SIZE + payload_size;
    if buf.len() < frame_size {
        return (0, Err(FrameError::Incomplete));
    }

    let frame = &buf[..frame_size];
    let ck_offset = frame_size - FRAME_CHECKSUM_SIZE;

    let expected = u16::from_le_bytes([frame[ck_offset], frame[ck_offset + 1]]);
    let actual = checksum(&frame[FRAME_GROUP_OFFSET..ck_offset]);
    if expected != actual {
        return (
            frame_size,
            Err(FrameError::ChecksumMismatch { expected, actual }),
        );
    }

    let frame = Frame {
        group: frame[FRAME_GROUP_OFFSET],
        sub: frame[FRAME_SUB_OFFSET],
        payload: &frame[FRAME_PAYLOAD_OFFSET..ck_offset],
    };
    (frame_size, Ok(Event::from(frame)))
}
