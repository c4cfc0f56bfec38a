use core::fmt;

use chrono::NaiveTime;

use crate::error::Error;
use crate::field::{Fields, Text};
use crate::parser::{coordinate, interpret, number, time_hms_nano};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixQuality {
    Invalid,
    Gps,
    Dgps,
    Pps,
    Rtk,
    FloatRtk,
    DeadReckoning,
    Manual,
    Simulation,
    Other(u8),
}

impl From<u8> for FixQuality {
    fn from(v: u8) -> Self {
        match v {
            0 => FixQuality::Invalid,
            1 => FixQuality::Gps,
            2 => FixQuality::Dgps,
            3 => FixQuality::Pps,
            4 => FixQuality::Rtk,
            5 => FixQuality::FloatRtk,
            6 => FixQuality::DeadReckoning,
            7 => FixQuality::Manual,
            8 => FixQuality::Simulation,
            n => FixQuality::Other(n),
        }
    }
}

impl fmt::Display for FixQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixQuality::Invalid => write!(f, "no fix"),
            FixQuality::Gps => write!(f, "GPS fix"),
            FixQuality::Dgps => write!(f, "DGPS fix"),
            FixQuality::Pps => write!(f, "PPS fix"),
            FixQuality::Rtk => write!(f, "RTK fixed"),
            FixQuality::FloatRtk => write!(f, "RTK float"),
            FixQuality::DeadReckoning => write!(f, "dead reckoning"),
            FixQuality::Manual => write!(f, "manual input"),
            FixQuality::Simulation => write!(f, "simulation"),
            FixQuality::Other(n) => write!(f, "quality {n}"),
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GgaData {
    /// UTC time of fix, `hhmmss.sss`
    pub utc: Option<Text<10>>,
    pub lat: Option<Text<11>>,
    pub ns: Option<Text<1>>,
    pub lon: Option<Text<12>>,
    pub ew: Option<Text<1>>,
    /// 0 = invalid, 1 = GPS SPS, 2 = DGPS/SBAS, ...
    pub quality: Option<Text<1>>,
    /// Satellites used in the solution
    pub satellites: Option<Text<2>>,
    /// 99.99 when invalid
    pub hdop: Option<Text<5>>,
    /// Altitude above mean sea level
    pub altitude: Option<Text<9>>,
    pub altitude_unit: Option<Text<1>>,
    /// Geoid separation
    pub separation: Option<Text<9>>,
    pub separation_unit: Option<Text<1>>,
    pub diff_age: Option<Text<6>>,
    pub diff_station: Option<Text<4>>,
}

impl GgaData {
    pub fn time(&self) -> Option<NaiveTime> {
        interpret(self.utc.as_deref(), time_hms_nano)
    }

    pub fn latitude(&self) -> Option<f64> {
        coordinate(self.lat.as_deref(), self.ns.as_deref())
    }

    pub fn longitude(&self) -> Option<f64> {
        coordinate(self.lon.as_deref(), self.ew.as_deref())
    }

    pub fn fix_quality(&self) -> Option<FixQuality> {
        interpret(self.quality.as_deref(), number::<u8>).map(FixQuality::from)
    }

    pub fn satellites(&self) -> Option<u8> {
        interpret(self.satellites.as_deref(), number::<u8>)
    }

    pub fn hdop(&self) -> Option<f32> {
        self.hdop.as_deref()?.trim().parse().ok()
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude.as_deref()?.trim().parse().ok()
    }
}

pub(crate) fn gga<'a>(f: &mut Fields<'a>) -> Result<GgaData, Error<'a>> {
    Ok(GgaData {
        utc: f.text("utc")?,
        lat: f.text("lat")?,
        ns: f.text("ns")?,
        lon: f.text("lon")?,
        ew: f.text("ew")?,
        quality: f.text("quality")?,
        satellites: f.text("satellites")?,
        hdop: f.text("hdop")?,
        altitude: f.text("altitude")?,
        altitude_unit: f.text("altitude_unit")?,
        separation: f.text("separation")?,
        separation_unit: f.text("separation_unit")?,
        diff_age: f.text("diff_age")?,
        diff_station: f.text("diff_station")?,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_gga() {
        let data = gga(&mut Fields::new(
            "055525.000,3044.368753,N,10357.548051,E,1,  ,2.40,129.3,M,-32.3,M,,",
        ))
        .unwrap();
        assert_eq!(data.utc.as_deref(), Some("055525.000"));
        assert_eq!(data.lat.as_deref(), Some("3044.368753"));
        assert_eq!(data.quality.as_deref(), Some("1"));
        assert_eq!(data.satellites.as_deref(), Some("  "));
        assert_eq!(data.hdop.as_deref(), Some("2.40"));
        assert_eq!(data.altitude.as_deref(), Some("129.3"));
        assert_eq!(data.altitude_unit.as_deref(), Some("M"));
        assert_eq!(data.separation.as_deref(), Some("-32.3"));
        assert_eq!(data.separation_unit.as_deref(), Some("M"));
        assert_eq!(data.diff_age, None);
        assert_eq!(data.diff_station, None);

        assert_eq!(data.time(), NaiveTime::from_hms_opt(5, 55, 25));
        assert_eq!(data.fix_quality(), Some(FixQuality::Gps));
        assert_eq!(data.satellites(), None);
        assert_eq!(data.hdop(), Some(2.4));
        assert_eq!(data.altitude(), Some(129.3));
    }

    #[test]
    fn test_gga_satellites() {
        let data = gga(&mut Fields::new(
            "092725.00,4717.11399,N,00833.91590,E,4,08,1.01,499.6,M,48.0,M,1.0,0000",
        ))
        .unwrap();
        assert_eq!(data.fix_quality(), Some(FixQuality::Rtk));
        assert_eq!(data.satellites(), Some(8));
        assert_eq!(data.diff_age.as_deref(), Some("1.0"));
        assert_eq!(data.diff_station.as_deref(), Some("0000"));
        let lat = data.latitude().unwrap();
        assert!((lat - 47.285_233_2).abs() < 1e-6);
    }

    #[test]
    fn test_gga_truncated() {
        assert_eq!(
            gga(&mut Fields::new(
                "055525.000,3044.368753,N,10357.548051,E,1,08,2.40,129.3,M,-32.3,M,"
            )),
            Err(Error::MissingField("diff_station"))
        );
    }

    #[test]
    fn test_fix_quality() {
        assert_eq!(FixQuality::from(0), FixQuality::Invalid);
        assert_eq!(FixQuality::from(6), FixQuality::DeadReckoning);
        assert_eq!(FixQuality::from(9), FixQuality::Other(9));
    }
}
