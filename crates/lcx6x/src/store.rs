use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use nmea::messages::{GgaData, GllData, GsaData, GsvData, RmcData, VtgData};
use nmea::{Kind, Sentence, SentenceData};
use quectel::id::NmeaSubId;

/// Latest accepted sentence of each kind the store keeps.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub rmc: Option<Sentence>,
    pub gga: Option<Sentence>,
    pub gll: Option<Sentence>,
    pub vtg: Option<Sentence>,
    pub gsa: Option<Sentence>,
    pub gsv: Option<Sentence>,
}

macro_rules! view {
    ($name:ident, $variant:ident, $data:ty) => {
        pub fn $name(&self) -> Option<&$data> {
            match &self.$name.as_ref()?.data {
                SentenceData::$variant(data) => Some(data),
                _ => None,
            }
        }
    };
}

impl Snapshot {
    pub const fn new() -> Self {
        Self {
            rmc: None,
            gga: None,
            gll: None,
            vtg: None,
            gsa: None,
            gsv: None,
        }
    }

    pub fn get(&self, kind: Kind) -> Option<&Sentence> {
        match kind {
            Kind::Rmc => self.rmc.as_ref(),
            Kind::Gga => self.gga.as_ref(),
            Kind::Gll => self.gll.as_ref(),
            Kind::Vtg => self.vtg.as_ref(),
            Kind::Gsa => self.gsa.as_ref(),
            Kind::Gsv => self.gsv.as_ref(),
            _ => None,
        }
    }

    fn slot_mut(&mut self, kind: Kind) -> Option<&mut Option<Sentence>> {
        match kind {
            Kind::Rmc => Some(&mut self.rmc),
            Kind::Gga => Some(&mut self.gga),
            Kind::Gll => Some(&mut self.gll),
            Kind::Vtg => Some(&mut self.vtg),
            Kind::Gsa => Some(&mut self.gsa),
            Kind::Gsv => Some(&mut self.gsv),
            _ => None,
        }
    }

    view!(rmc, Rmc, RmcData);
    view!(gga, Gga, GgaData);
    view!(gll, Gll, GllData);
    view!(vtg, Vtg, VtgData);
    view!(gsa, Gsa, GsaData);
    view!(gsv, Gsv, GsvData);
}

struct State {
    snapshot: Snapshot,
    rates: [Option<u8>; NmeaSubId::ALL.len()],
}

/// Shared between the stream worker, which writes, and any number of
/// readers. Every access takes the lock just long enough to move or clone
/// one value, so readers always see whole records.
pub struct Store<M: RawMutex> {
    inner: Mutex<M, RefCell<State>>,
}

impl<M: RawMutex> Default for Store<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> Store<M> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(State {
                snapshot: Snapshot::new(),
                rates: [None; NmeaSubId::ALL.len()],
            })),
        }
    }

    /// Replaces the slot for the sentence's kind. Returns `false` for kinds
    /// without a slot.
    pub fn update(&self, sentence: Sentence) -> bool {
        let kind = sentence.kind();
        self.inner.lock(|state| {
            let mut state = state.borrow_mut();
            match state.snapshot.slot_mut(kind) {
                Some(slot) => {
                    *slot = Some(sentence);
                    true
                }
                None => false,
            }
        })
    }

    pub fn latest(&self, kind: Kind) -> Option<Sentence> {
        self.inner
            .lock(|state| state.borrow().snapshot.get(kind).cloned())
    }

    pub fn set_rate(&self, id: NmeaSubId, rate: u8) {
        self.inner
            .lock(|state| state.borrow_mut().rates[id as usize] = Some(rate));
    }

    /// Last output rate reported by the receiver, `None` until one arrives.
    pub fn rate(&self, id: NmeaSubId) -> Option<u8> {
        self.inner.lock(|state| state.borrow().rates[id as usize])
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock(|state| state.borrow().snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

    const RMC: &[u8] =
        b"$GBRMC,055525.000,A,3044.368753,N,10357.548051,E,0.00,000.00,100625,,,A,C*13";
    const RMC_GN: &[u8] =
        b"$GNRMC,055526.000,A,3044.368800,N,10357.548100,E,1.50,090.00,100625,,,A,V*08";
    const VTG: &[u8] = b"$GBVTG,000.00,T,,M,0.00,N,0.00,K,A*2F";
    const ZDA: &[u8] = b"$GNZDA,055525.000,10,06,2025,,*48";

    #[test]
    fn empty() {
        let store = Store::<NoopRawMutex>::new();
        assert_eq!(store.latest(Kind::Rmc), None);
        assert_eq!(store.rate(NmeaSubId::Rmc), None);
        assert_eq!(store.snapshot(), Snapshot::default());
    }

    #[test]
    fn update_and_latest() {
        let store = Store::<NoopRawMutex>::new();
        let rmc = nmea::parse(RMC).unwrap();

        assert!(store.update(rmc.clone()));
        assert_eq!(store.latest(Kind::Rmc), Some(rmc));
        assert_eq!(store.latest(Kind::Vtg), None);

        assert!(store.update(nmea::parse(VTG).unwrap()));
        let snapshot = store.snapshot();
        assert!(snapshot.rmc().is_some_and(|rmc| rmc.is_valid()));
        assert_eq!(snapshot.vtg().and_then(|vtg| vtg.speed_kmh()), Some(0.0));
        assert_eq!(snapshot.gga(), None);
    }

    #[test]
    fn kinds_without_slot() {
        let store = Store::<NoopRawMutex>::new();

        assert!(!store.update(nmea::parse(ZDA).unwrap()));
        assert_eq!(store.latest(Kind::Zda), None);
        assert_eq!(store.snapshot(), Snapshot::default());
    }

    #[test]
    fn latest_is_replaced() {
        let store = Store::<NoopRawMutex>::new();
        let mut rmc = nmea::parse(RMC).unwrap();

        store.update(rmc.clone());
        rmc.talker = ('G', 'N');
        store.update(rmc);

        assert_eq!(store.latest(Kind::Rmc).map(|s| s.talker), Some(('G', 'N')));
    }

    #[test]
    fn rates() {
        let store = Store::<NoopRawMutex>::new();

        store.set_rate(NmeaSubId::Gga, 1);
        store.set_rate(NmeaSubId::Rmc, 5);
        store.set_rate(NmeaSubId::Rmc, 0);

        assert_eq!(store.rate(NmeaSubId::Gga), Some(1));
        assert_eq!(store.rate(NmeaSubId::Rmc), Some(0));
        assert_eq!(store.rate(NmeaSubId::Zda), None);
    }

    #[test]
    fn shared_between_threads() {
        let store = Store::<CriticalSectionRawMutex>::new();
        let gb = nmea::parse(RMC).unwrap();
        let gn = nmea::parse(RMC_GN).unwrap();

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..500 {
                    store.update(if i % 2 == 0 { gb.clone() } else { gn.clone() });
                    store.set_rate(NmeaSubId::Rmc, (i % 2) as u8);
                }
            });
            s.spawn(|| {
                for _ in 0..500 {
                    if let Some(rmc) = store.latest(Kind::Rmc) {
                        assert!(rmc == gb || rmc == gn);
                    }
                    assert!(matches!(store.rate(NmeaSubId::Rmc), None | Some(0 | 1)));
                }
            });
        });

        assert_eq!(store.latest(Kind::Rmc), Some(gn));
        assert_eq!(store.rate(NmeaSubId::Rmc), Some(1));
    }
}
