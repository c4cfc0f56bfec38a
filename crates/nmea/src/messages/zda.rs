use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Error;
use crate::field::{Fields, Text};
use crate::parser::{interpret, number, time_hms_nano};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZdaData {
    pub utc: Option<Text<10>>,
    pub day: Option<Text<2>>,
    pub month: Option<Text<2>>,
    pub year: Option<Text<4>>,
    /// Local zone hours, `-13`~`13`
    pub local_hour: Option<Text<3>>,
    pub local_minute: Option<Text<2>>,
}

impl ZdaData {
    pub fn time(&self) -> Option<NaiveTime> {
        interpret(self.utc.as_deref(), time_hms_nano)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            interpret(self.year.as_deref(), number::<i32>)?,
            interpret(self.month.as_deref(), number::<u32>)?,
            interpret(self.day.as_deref(), number::<u32>)?,
        )
    }

    pub fn datetime(&self) -> Option<NaiveDateTime> {
        Some(self.date()?.and_time(self.time()?))
    }
}

pub(crate) fn zda<'a>(f: &mut Fields<'a>) -> Result<ZdaData, Error<'a>> {
    Ok(ZdaData {
        utc: f.text("utc")?,
        day: f.text("day")?,
        month: f.text("month")?,
        year: f.text("year")?,
        local_hour: f.optional("local_hour")?,
        local_minute: f.optional("local_minute")?,
    })
}
