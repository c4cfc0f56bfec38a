//! Output rate commands.
//!
//! The protocol carries no request id: the answer to a rate query is an
//! [`Event::OutputRate`](crate::Event::OutputRate) frame that can only be
//! matched to the query by its target sentence.

use core::fmt;

use crate::fill_checksum;
use crate::id::{CFG_MSG, GROUP_CFG, GROUP_NMEA, NmeaSubId};
use crate::{MAGIC1, MAGIC2};

pub const SET_RATE_SIZE: usize = 11;
pub const QUERY_RATE_SIZE: usize = 10;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BuildError {
    InvalidTarget { group: u8, sub: u8 },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidTarget { group, sub } => {
                write!(f, "invalid target message {group:02X}/{sub:02X}")
            }
        }
    }
}

impl core::error::Error for BuildError {}

fn target(group: u8, sub: u8) -> Result<NmeaSubId, BuildError> {
    if group != GROUP_NMEA {
        return Err(BuildError::InvalidTarget { group, sub });
    }
    NmeaSubId::try_from(sub).map_err(|_| BuildError::InvalidTarget { group, sub })
}

pub fn set_rate(id: NmeaSubId, rate: u8) -> [u8; SET_RATE_SIZE] {
    let mut frame = [
        MAGIC1, MAGIC2, // magic
        GROUP_CFG, CFG_MSG, // group/sub (=CFG-MSG)
        0x03, 0x00, // length
        // payload begin
        GROUP_NMEA,
        id.into(),
        rate,
        // payload end
        0x00, // chk1
        0x00, // chk2
    ];
    fill_checksum(&mut frame);
    frame
}

pub fn query_rate(id: NmeaSubId) -> [u8; QUERY_RATE_SIZE] {
    let mut frame = [
        MAGIC1, MAGIC2, // magic
        GROUP_CFG, CFG_MSG, // group/sub (=CFG-MSG)
        0x02, 0x00, // length
        // payload begin
        GROUP_NMEA,
        id.into(),
        // payload end
        0x00, // chk1
        0x00, // chk2
    ];
    fill_checksum(&mut frame);
    frame
}

/// Builds a command setting the output rate of message `group`/`sub`.
/// Only the standard NMEA sentences are accepted as targets.
pub fn build_set_rate(group: u8, sub: u8, rate: u8) -> Result<[u8; SET_RATE_SIZE], BuildError> {
    Ok(set_rate(target(group, sub)?, rate))
}

/// Builds a command asking for the output rate of message `group`/`sub`.
pub fn build_query_rate(group: u8, sub: u8) -> Result<[u8; QUERY_RATE_SIZE], BuildError> {
    Ok(query_rate(target(group, sub)?))
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use crate::{Event, Frame, checksum, parse_frame};

    #[test]
    fn test_set_rate() {
        let frame = build_set_rate(GROUP_NMEA, 0x05, 1).unwrap();
        assert_eq!(
            frame,
            [
                0xf1, 0xd9, // magic
                0x06, 0x01, // group/sub (=CFG-MSG)
                0x03, 0x00, // length
                0xf0, 0x05, 0x01, // payload (=RMC at 1)
                0x00, // chk1
                0x1a, // chk2
            ]
        );
        assert_eq!(checksum(&frame[2..9]).to_le_bytes(), frame[9..11]);
    }

    #[test]
    fn test_query_rate() {
        assert_eq!(
            query_rate(NmeaSubId::Rmc),
            [
                0xf1, 0xd9, // magic
                0x06, 0x01, // group/sub (=CFG-MSG)
                0x02, 0x00, // length
                0xf0, 0x05, // payload (=RMC)
                0xfe, // chk1
                0x16, // chk2
            ]
        );
        assert_eq!(build_query_rate(GROUP_NMEA, 0x05), Ok(query_rate(NmeaSubId::Rmc)));
    }

    #[test]
    fn test_round_trip() {
        for id in NmeaSubId::ALL {
            let frame = query_rate(id);
            assert_eq!(checksum(&frame[2..8]).to_le_bytes(), frame[8..10]);
            assert_eq!(
                parse_frame(&frame),
                (
                    10,
                    Ok(Event::Unhandled(Frame {
                        group: GROUP_CFG,
                        sub: CFG_MSG,
                        payload: &[GROUP_NMEA, id.into()],
                    }))
                )
            );
        }

        assert_eq!(
            parse_frame(&set_rate(NmeaSubId::Gga, 10)),
            (
                11,
                Ok(Event::OutputRate {
                    group: GROUP_NMEA,
                    sub: 0x00,
                    rate: 10
                })
            )
        );
    }

    #[test]
    fn test_invalid_target() {
        assert_eq!(
            build_set_rate(GROUP_CFG, 0x05, 1),
            Err(BuildError::InvalidTarget {
                group: GROUP_CFG,
                sub: 0x05
            })
        );
        assert_eq!(
            build_query_rate(GROUP_NMEA, 0x09),
            Err(BuildError::InvalidTarget {
                group: GROUP_NMEA,
                sub: 0x09
            })
        );
    }
}
