use chrono::{NaiveDate, NaiveTime};

use crate::error::Error;
use crate::field::{Fields, Text};
use crate::parser::{coordinate, date_dmy, interpret, time_hms_nano};

const KNOTS_TO_KMH: f64 = 1.852;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RmcData {
    /// UTC time of fix, `hhmmss.sss`
    pub utc: Option<Text<10>>,
    /// `A` valid, `V` receiver warning
    pub status: Option<Text<1>>,
    /// `ddmm.mmmmmm`
    pub lat: Option<Text<11>>,
    pub ns: Option<Text<1>>,
    /// `dddmm.mmmmmm`
    pub lon: Option<Text<12>>,
    pub ew: Option<Text<1>>,
    /// Speed over ground, knots
    pub sog: Option<Text<10>>,
    /// Course over ground, degrees true
    pub cog: Option<Text<6>>,
    /// `ddmmyy`
    pub date: Option<Text<6>>,
    pub mag_var: Option<Text<6>>,
    pub mag_var_dir: Option<Text<1>>,
    pub mode: Option<Text<1>>,
    pub nav_status: Option<Text<1>>,
}

impl RmcData {
    pub fn is_valid(&self) -> bool {
        self.status.as_deref() == Some("A")
    }

    pub fn time(&self) -> Option<NaiveTime> {
        interpret(self.utc.as_deref(), time_hms_nano)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        interpret(self.date.as_deref(), date_dmy)
    }

    pub fn latitude(&self) -> Option<f64> {
        coordinate(self.lat.as_deref(), self.ns.as_deref())
    }

    pub fn longitude(&self) -> Option<f64> {
        coordinate(self.lon.as_deref(), self.ew.as_deref())
    }

    pub fn speed_kmh(&self) -> Option<f64> {
        let knots = self.sog.as_deref()?.trim().parse::<f64>().ok()?;
        Some(knots * KNOTS_TO_KMH)
    }

    pub fn course(&self) -> Option<f64> {
        self.cog.as_deref()?.trim().parse().ok()
    }
}

pub(crate) fn rmc<'a>(f: &mut Fields<'a>) -> Result<RmcData, Error<'a>> {
    Ok(RmcData {
        utc: f.text("utc")?,
        status: f.text("status")?,
        lat: f.text("lat")?,
        ns: f.text("ns")?,
        lon: f.text("lon")?,
        ew: f.text("ew")?,
        sog: f.text("sog")?,
        cog: f.text("cog")?,
        date: f.text("date")?,
        mag_var: f.text("mag_var")?,
        mag_var_dir: f.text("mag_var_dir")?,
        mode: f.optional("mode")?,
        nav_status: f.optional("nav_status")?,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_rmc() {
        let data = rmc(&mut Fields::new(
            "055525.000,A,3044.368753,N,10357.548051,E,0.00,000.00,100625,,,A,C",
        ))
        .unwrap();
        assert_eq!(data.utc.as_deref(), Some("055525.000"));
        assert_eq!(data.sog.as_deref(), Some("0.00"));
        assert_eq!(data.cog.as_deref(), Some("000.00"));
        assert_eq!(data.date.as_deref(), Some("100625"));
        assert_eq!(data.mag_var, None);
        assert_eq!(data.mag_var_dir, None);
        assert_eq!(data.mode.as_deref(), Some("A"));
        assert_eq!(data.nav_status.as_deref(), Some("C"));
        assert!(data.is_valid());
        assert_eq!(data.time(), NaiveTime::from_hms_opt(5, 55, 25));
        assert_eq!(data.date(), NaiveDate::from_ymd_opt(2025, 6, 10));
        assert_eq!(data.speed_kmh(), Some(0.0));
        assert_eq!(data.course(), Some(0.0));
    }

    #[test]
    fn test_rmc_nmea23() {
        let data = rmc(&mut Fields::new(
            "083559.00,A,4717.11437,N,00833.91522,E,0.004,77.52,091202,,,A",
        ))
        .unwrap();
        assert_eq!(data.mode.as_deref(), Some("A"));
        assert_eq!(data.nav_status, None);
        assert_eq!(data.time(), NaiveTime::from_hms_opt(8, 35, 59));
        assert_eq!(data.date(), NaiveDate::from_ymd_opt(2002, 12, 9));
        let speed = data.speed_kmh().unwrap();
        assert!((speed - 0.007_408).abs() < 1e-9);
    }

    #[test]
    fn test_rmc_no_fix() {
        let data = rmc(&mut Fields::new(",V,,,,,,,030525,,,N,V")).unwrap();
        assert!(!data.is_valid());
        assert_eq!(data.utc, None);
        assert_eq!(data.time(), None);
        assert_eq!(data.latitude(), None);
        assert_eq!(data.date(), NaiveDate::from_ymd_opt(2025, 5, 3));
    }

    #[test]
    fn test_rmc_truncated() {
        assert_eq!(
            rmc(&mut Fields::new("055525.000,A,3044.368753,N")),
            Err(Error::MissingField("lon"))
        );
    }

    #[test]
    fn test_rmc_overflow() {
        assert_eq!(
            rmc(&mut Fields::new(
                "055525.000000,A,3044.368753,N,10357.548051,E,0.00,000.00,100625,,,A"
            )),
            Err(Error::FieldOverflow {
                field: "utc",
                max: 10,
                len: 13
            })
        );
    }
}
