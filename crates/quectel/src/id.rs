//! Message group and sub ids.

use core::fmt;
use core::str::FromStr;

pub const GROUP_NMEA: u8 = 0xf0;
pub const GROUP_RES: u8 = 0x05;
pub const GROUP_CFG: u8 = 0x06;

pub const RES_NAK: u8 = 0x00;
pub const RES_ACK: u8 = 0x01;

/// Message output rate configuration
pub const CFG_MSG: u8 = 0x01;

/// Sub ids of the standard NMEA sentences within [`GROUP_NMEA`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NmeaSubId {
    Gga = 0x00,
    Gll = 0x01,
    Gsa = 0x02,
    Grs = 0x03,
    Gsv = 0x04,
    Rmc = 0x05,
    Vtg = 0x06,
    Zda = 0x07,
    Gst = 0x08,
}

impl NmeaSubId {
    pub const ALL: [NmeaSubId; 9] = [
        NmeaSubId::Gga,
        NmeaSubId::Gll,
        NmeaSubId::Gsa,
        NmeaSubId::Grs,
        NmeaSubId::Gsv,
        NmeaSubId::Rmc,
        NmeaSubId::Vtg,
        NmeaSubId::Zda,
        NmeaSubId::Gst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NmeaSubId::Gga => "GGA",
            NmeaSubId::Gll => "GLL",
            NmeaSubId::Gsa => "GSA",
            NmeaSubId::Grs => "GRS",
            NmeaSubId::Gsv => "GSV",
            NmeaSubId::Rmc => "RMC",
            NmeaSubId::Vtg => "VTG",
            NmeaSubId::Zda => "ZDA",
            NmeaSubId::Gst => "GST",
        }
    }
}

impl From<NmeaSubId> for u8 {
    fn from(id: NmeaSubId) -> Self {
        id as u8
    }
}

impl TryFrom<u8> for NmeaSubId {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        NmeaSubId::ALL.get(v as usize).copied().ok_or(v)
    }
}

impl fmt::Display for NmeaSubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq)]
pub struct UnknownSentence;

impl fmt::Display for UnknownSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown NMEA sentence type")
    }
}

impl core::error::Error for UnknownSentence {}

impl FromStr for NmeaSubId {
    type Err = UnknownSentence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NmeaSubId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownSentence)
    }
}
