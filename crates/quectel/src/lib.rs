#![no_std]

pub mod builder;
pub mod frame;
pub mod id;

pub use builder::{BuildError, build_query_rate, build_set_rate, query_rate, set_rate};
pub use frame::{Event, Frame, FrameError, parse_frame};
pub use id::NmeaSubId;

// Frame:
// 0       1       2       3       4       5       6               6+N     7+N
// +-------+-------+-------+-------+-------+-------+-------+-------+-------+-------+
// | Magic         | Group | Sub   | Length (N)    | Payload       | CHK1  | CHK2  |
// +-------+-------+-------+-------+-------+-------+-------+-------+-------+-------+

pub const MAGIC1: u8 = 0xf1;
pub const MAGIC2: u8 = 0xd9;

pub(crate) const FRAME_GROUP_OFFSET: usize = 2;
const FRAME_GROUP_SIZE: usize = 1;

pub(crate) const FRAME_SUB_OFFSET: usize = FRAME_GROUP_OFFSET + FRAME_GROUP_SIZE;
const FRAME_SUB_SIZE: usize = 1;

pub(crate) const FRAME_LENGTH_OFFSET: usize = FRAME_SUB_OFFSET + FRAME_SUB_SIZE;
const FRAME_LENGTH_SIZE: usize = 2;

pub(crate) const FRAME_PAYLOAD_OFFSET: usize = FRAME_LENGTH_OFFSET + FRAME_LENGTH_SIZE;

pub(crate) const FRAME_CHECKSUM_SIZE: usize = 2;

pub const FRAME_METADATA_SIZE: usize =
    2 + FRAME_GROUP_SIZE + FRAME_SUB_SIZE + FRAME_LENGTH_SIZE + FRAME_CHECKSUM_SIZE;

/// Running-sum checksum over `buf`, which must span the group id through
/// the end of the payload. `CHK1` is the low byte.
pub fn checksum(buf: &[u8]) -> u16 {
    let mut chk1 = 0_u8;
    let mut chk2 = 0_u8;
    for c in buf {
        chk1 = chk1.overflowing_add(*c).0;
        chk2 = chk2.overflowing_add(chk1).0;
    }
    u16::from_le_bytes([chk1, chk2])
}

/// Signs a complete frame in place.
pub fn fill_checksum(frame: &mut [u8]) {
    if frame.len() < FRAME_METADATA_SIZE {
        return;
    }

    let end = frame.len() - FRAME_CHECKSUM_SIZE;
    let ck = checksum(&frame[FRAME_GROUP_OFFSET..end]);
    frame[end..].copy_from_slice(&ck.to_le_bytes());
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(&[]), 0x0000);
        assert_eq!(checksum(&[0x05, 0x01, 0x02, 0x00, 0x06, 0x8a]), 0xc198);
        assert_eq!(
            checksum(&[0xab, 0xcd, 0x04, 0x00, 0xde, 0xad, 0xbe, 0xef]),
            0xf5b4
        );
        assert_eq!(checksum(&[0x06, 0x01, 0x02, 0x00, 0xf0, 0x05]), 0x16fe);
    }

    #[test]
    fn test_fill_checksum() {
        let mut frame = [
            0xf1, 0xd9, // magic
            0x05, 0x01, // group/sub (=ACK)
            0x02, 0x00, // length
            0x06, 0x01, // payload
            0x00, 0x00, // checksum
        ];
        fill_checksum(&mut frame);
        assert_eq!(frame[8..], [0x0f, 0x38]);

        let mut short = [0xf1, 0xd9, 0x05, 0x01, 0x00, 0x00, 0xaa];
        fill_checksum(&mut short);
        assert_eq!(short, [0xf1, 0xd9, 0x05, 0x01, 0x00, 0x00, 0xaa]);
    }
}
