use embassy_sync::blocking_mutex::raw::RawMutex;
use nmea::{Kind, Sentence, SentenceData};
use quectel::id::GROUP_NMEA;
use quectel::{Event, FrameError, NmeaSubId};

use crate::store::Store;
use crate::stream::{MixedStream, Packet};

/// Upper bound on bytes held while waiting for the rest of a sentence or
/// frame.
pub const BUFFER_SIZE: usize = 2048;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq)]
pub enum FeedEvent<'a> {
    /// A sentence was accepted and stored if the store keeps its kind
    Sentence(Kind),
    /// A well-formed sentence of a kind this crate does not decode
    UnknownSentence((char, char, char)),
    SentenceRejected(nmea::Error<'a>),
    /// The receiver reported the output rate of a standard NMEA sentence
    RateUpdated { id: NmeaSubId, rate: u8 },
    /// Any other valid binary frame
    Frame(Event<'a>),
    FrameRejected(FrameError),
    /// The buffer filled up without a complete record and was reset
    Overflow { discarded: usize },
}

/// Splits a receiver's byte stream into NMEA sentences and binary frames
/// and records what it decodes into `store`.
pub struct Framer<'s, M: RawMutex, const N: usize = BUFFER_SIZE> {
    stream: MixedStream<N>,
    store: &'s Store<M>,
}

impl<'s, M: RawMutex, const N: usize> Framer<'s, M, N> {
    pub fn new(store: &'s Store<M>) -> Self {
        Self {
            stream: MixedStream::new(),
            store,
        }
    }

    /// Bytes buffered as part of an incomplete sentence or frame.
    pub fn buffered(&self) -> usize {
        self.stream.buf_filled().len()
    }

    /// Appends `bytes` to the stream and reports every complete record, in
    /// stream order, through `on_event`. Chunk boundaries do not matter.
    pub fn feed(&mut self, mut bytes: &[u8], mut on_event: impl FnMut(FeedEvent<'_>)) {
        while !bytes.is_empty() {
            if self.stream.buf_unused_mut().is_empty() {
                let discarded = self.stream.clear();
                on_event(FeedEvent::Overflow { discarded });
            }

            let unused = self.stream.buf_unused_mut();
            let n = unused.len().min(bytes.len());
            unused[..n].copy_from_slice(&bytes[..n]);
            self.stream.commit(n);
            bytes = &bytes[n..];

            self.drain(&mut on_event);
        }
    }

    fn drain(&mut self, on_event: &mut impl FnMut(FeedEvent<'_>)) {
        while let Some(packet) = self.stream.pop() {
            let event = match packet {
                Packet::Nmea(line) => match nmea::parse(line) {
                    Ok(Sentence {
                        data: SentenceData::Unknown(tag),
                        ..
                    }) => FeedEvent::UnknownSentence(tag),
                    Ok(sentence) => {
                        let kind = sentence.kind();
                        self.store.update(sentence);
                        FeedEvent::Sentence(kind)
                    }
                    Err(e) => FeedEvent::SentenceRejected(e),
                },
                Packet::Binary {
                    result: Ok(Event::OutputRate { group, sub, rate }),
                    ..
                } if group == GROUP_NMEA => match NmeaSubId::try_from(sub) {
                    Ok(id) => {
                        self.store.set_rate(id, rate);
                        FeedEvent::RateUpdated { id, rate }
                    }
                    Err(_) => FeedEvent::Frame(Event::OutputRate { group, sub, rate }),
                },
                Packet::Binary { result: Ok(e), .. } => FeedEvent::Frame(e),
                Packet::Binary { result: Err(e), .. } => FeedEvent::FrameRejected(e),
            };
            on_event(event);
        }
        self.stream.compact();
    }
}
