use quectel::{Event, FrameError, MAGIC1, MAGIC2, parse_frame};

#[derive(Debug, PartialEq)]
pub enum Packet<'a> {
    /// A `$...\r\n` span, terminator included
    Nmea(&'a [u8]),
    /// A binary frame of `len` bytes, or a malformed one skipped by its
    /// declared length
    Binary {
        len: usize,
        result: Result<Event<'a>, FrameError>,
    },
}

/// Accumulates bytes from a receiver that interleaves NMEA sentences with
/// binary frames, and splits them back apart.
pub struct MixedStream<const N: usize> {
    buf: [u8; N],
    begin: usize,
    end: usize,
}

impl<const N: usize> Default for MixedStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MixedStream<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            begin: 0,
            end: 0,
        }
    }

    pub fn commit(&mut self, n: usize) {
        self.end = N.min(self.end + n);
    }

    pub fn consume(&mut self, n: usize) {
        self.begin = self.end.min(self.begin + n);
    }

    /// Drops everything buffered and returns how many bytes were lost.
    pub fn clear(&mut self) -> usize {
        let discarded = self.end - self.begin;
        self.begin = 0;
        self.end = 0;
        discarded
    }

    pub fn pop(&mut self) -> Option<Packet<'_>> {
        while self.begin < self.end {
            let rest = &self.buf[self.begin..self.end];
            match rest {
                [b'$', ..] => {
                    let Some(pos) = rest.windows(2).position(|w| w == b"\r\n") else {
                        break;
                    };
                    let begin = self.begin;
                    self.begin += pos + 2;
                    return Some(Packet::Nmea(&self.buf[begin..self.begin]));
                }
                [MAGIC1, MAGIC2, ..] | [MAGIC1] => match parse_frame(rest) {
                    (0, _) => break,
                    (len, result) => {
                        self.begin += len;
                        return Some(Packet::Binary { len, result });
                    }
                },
                _ => self.begin += 1, // noise
            }
        }
        None
    }

    /// Moves the unconsumed remainder to the front of the buffer.
    pub fn compact(&mut self) {
        if self.begin > 0 {
            self.buf.copy_within(self.begin..self.end, 0);
            self.end -= self.begin;
            self.begin = 0;
        }
    }

    pub fn buf_filled(&self) -> &[u8] {
        &self.buf[self.begin..self.end]
    }

    pub fn buf_unused_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.end..]
    }
}
