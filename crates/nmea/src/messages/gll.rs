use chrono::NaiveTime;

use crate::error::Error;
use crate::field::{Fields, Text};
use crate::parser::{coordinate, interpret, time_hms_nano};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GllData {
    pub lat: Option<Text<11>>,
    pub ns: Option<Text<1>>,
    pub lon: Option<Text<12>>,
    pub ew: Option<Text<1>>,
    pub utc: Option<Text<10>>,
    pub status: Option<Text<1>>,
    pub mode: Option<Text<1>>,
}

impl GllData {
    pub fn is_valid(&self) -> bool {
        self.status.as_deref() == Some("A")
    }

    pub fn time(&self) -> Option<NaiveTime> {
        interpret(self.utc.as_deref(), time_hms_nano)
    }

    pub fn latitude(&self) -> Option<f64> {
        coordinate(self.lat.as_deref(), self.ns.as_deref())
    }

    pub fn longitude(&self) -> Option<f64> {
        coordinate(self.lon.as_deref(), self.ew.as_deref())
    }
}

pub(crate) fn gll<'a>(f: &mut Fields<'a>) -> Result<GllData, Error<'a>> {
    Ok(GllData {
        lat: f.text("lat")?,
        ns: f.text("ns")?,
        lon: f.text("lon")?,
        ew: f.text("ew")?,
        utc: f.text("utc")?,
        status: f.text("status")?,
        mode: f.optional("mode")?,
    })
}
