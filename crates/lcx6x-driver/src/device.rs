use std::io::{self, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use lcx6x::{FeedEvent, Framer, Snapshot, Store};
use nmea::{Kind, Sentence};
use quectel::{Event, NmeaSubId, query_rate, set_rate};
use tracing::{debug, info, warn};

use crate::error::DriverError;
use crate::status::Status;

pub type SharedStore = Store<CriticalSectionRawMutex>;

/// Consecutive read errors tolerated before the reader gives up
const MAX_READ_ERRORS: u32 = 10;
const RETRY_DELAY: Duration = Duration::from_millis(100);
const IDLE_DELAY: Duration = Duration::from_millis(10);

/// Pause between consecutive configuration commands
pub const COMMAND_GAP: Duration = Duration::from_millis(100);
/// How long to wait for the receiver to answer a query
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(200);

fn log_event(event: FeedEvent<'_>) {
    match event {
        FeedEvent::Sentence(kind) => debug!("{} accepted", kind.tag()),
        FeedEvent::UnknownSentence((a, b, c)) => warn!("unsupported sentence {a}{b}{c}"),
        FeedEvent::SentenceRejected(e) => warn!("sentence rejected: {e}"),
        FeedEvent::RateUpdated { id, rate } => info!("{id} output rate: {rate}"),
        FeedEvent::Frame(Event::Ack { group, sub }) => info!("ACK {group:#04x}/{sub:#04x}"),
        FeedEvent::Frame(Event::Nak { group, sub }) => warn!("NAK {group:#04x}/{sub:#04x}"),
        FeedEvent::Frame(event) => debug!("{event:02x?}"),
        FeedEvent::FrameRejected(e) => warn!("binary frame rejected: {e}"),
        FeedEvent::Overflow { discarded } => {
            warn!("stream buffer full, {discarded} bytes discarded")
        }
    }
}

/// Pumps `reader` into `store` until `running` is cleared or reading keeps
/// failing. Clears `running` on the way out.
pub fn read_loop<R: Read, M: RawMutex>(mut reader: R, store: &Store<M>, running: &AtomicBool) {
    let mut framer: Framer<'_, M> = Framer::new(store);
    let mut buf = [0_u8; 1024];
    let mut errors = 0_u32;
    while running.load(Ordering::Relaxed) {
        if errors > MAX_READ_ERRORS {
            warn!("too many read errors");
            break;
        }

        match reader.read(&mut buf) {
            Ok(0) => thread::sleep(IDLE_DELAY),
            Ok(len) => {
                errors = 0;
                framer.feed(&buf[..len], log_event);
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) => {}
            Err(e) => {
                warn!("error while reading: {e}");
                errors += 1;
                thread::sleep(RETRY_DELAY);
            }
        }
    }
    running.store(false, Ordering::Relaxed);
    info!("reader stopped");
}

/// A receiver with a background thread that keeps [`SharedStore`] current.
///
/// Commands are written from the caller's thread. Answers are never matched
/// to requests: they land in the store whenever the receiver sends them.
pub struct Device<W: Write> {
    store: Arc<SharedStore>,
    writer: W,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl<W: Write> Device<W> {
    pub fn spawn<R: Read + Send + 'static>(reader: R, writer: W) -> Result<Self, DriverError> {
        let store = Arc::new(SharedStore::new());
        let running = Arc::new(AtomicBool::new(true));

        let worker = {
            let store = Arc::clone(&store);
            let running = Arc::clone(&running);
            thread::Builder::new()
                .name("lcx6x-reader".into())
                .spawn(move || read_loop(reader, &*store, &running))
                .map_err(DriverError::Spawn)?
        };

        Ok(Self {
            store,
            writer,
            running,
            worker: Some(worker),
        })
    }

    pub fn store(&self) -> Arc<SharedStore> {
        Arc::clone(&self.store)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    fn send(&mut self, frame: &[u8]) -> Result<(), DriverError> {
        debug!("sending {frame:02x?}");
        self.writer.write_all(frame)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn set_output_rate(&mut self, id: NmeaSubId, rate: u8) -> Result<(), DriverError> {
        info!("setting {id} output rate to {rate}");
        self.send(&set_rate(id, rate))
    }

    pub fn set_output_rates(&mut self, rates: &[(NmeaSubId, u8)]) -> Result<(), DriverError> {
        for (i, &(id, rate)) in rates.iter().enumerate() {
            if i > 0 {
                thread::sleep(COMMAND_GAP);
            }
            self.set_output_rate(id, rate)?;
        }
        Ok(())
    }

    pub fn query_output_rate(&mut self, id: NmeaSubId) -> Result<(), DriverError> {
        self.send(&query_rate(id))
    }

    /// Queries and waits `settle` for the answer. May return a rate
    /// recorded earlier if the receiver does not answer in time.
    pub fn poll_output_rate(
        &mut self,
        id: NmeaSubId,
        settle: Duration,
    ) -> Result<Option<u8>, DriverError> {
        self.query_output_rate(id)?;
        thread::sleep(settle);
        Ok(self.output_rate(id))
    }

    pub fn query_all_rates(
        &mut self,
        settle: Duration,
    ) -> Result<Vec<(NmeaSubId, Option<u8>)>, DriverError> {
        let mut rates = Vec::with_capacity(NmeaSubId::ALL.len());
        for id in NmeaSubId::ALL {
            rates.push((id, self.poll_output_rate(id, settle)?));
        }
        Ok(rates)
    }

    pub fn latest(&self, kind: Kind) -> Option<Sentence> {
        self.store.latest(kind)
    }

    pub fn output_rate(&self, id: NmeaSubId) -> Option<u8> {
        self.store.rate(id)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn status(&self) -> Status {
        Status::from(&self.snapshot())
    }

    /// Stops the reader and waits for it to finish.
    pub fn stop(mut self) -> Result<(), DriverError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        self.running.store(false, Ordering::Relaxed);
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| DriverError::WorkerPanicked),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for Device<W> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("{e}");
        }
    }
}
