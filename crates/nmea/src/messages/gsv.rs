use heapless::Vec;

use crate::error::Error;
use crate::field::{Fields, Text};
use crate::parser::{interpret, number};

pub const GSV_MAX_SATELLITES: usize = 4;

const SATELLITE_FIELDS: usize = 4;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Satellite {
    pub id: Option<Text<3>>,
    /// Elevation, 00~90 degrees
    pub elevation: Option<Text<2>>,
    /// Azimuth, 000~359 degrees true
    pub azimuth: Option<Text<3>>,
    /// C/N0 in dB-Hz, empty when not tracked
    pub cn0: Option<Text<2>>,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GsvData {
    /// Total number of sentences in this group
    pub total: Option<Text<1>>,
    /// Sentence number
    pub number: Option<Text<1>>,
    /// Satellites in view
    pub in_view: Option<Text<2>>,
    pub satellites: Vec<Satellite, GSV_MAX_SATELLITES>,
    pub signal_id: Option<Text<1>>,
}

impl GsvData {
    pub fn in_view(&self) -> Option<u8> {
        interpret(self.in_view.as_deref(), number::<u8>)
    }
}

pub(crate) fn gsv<'a>(f: &mut Fields<'a>) -> Result<GsvData, Error<'a>> {
    let total = f.text("total")?;
    let number = f.text("number")?;
    let in_view = f.text("in_view")?;

    let rest = f.remaining();
    let blocks = rest / SATELLITE_FIELDS;
    let has_signal_id = match rest % SATELLITE_FIELDS {
        0 => false,
        1 => true,
        _ => return Err(Error::MissingField("satellite")),
    };

    let mut satellites = Vec::new();
    for _ in 0..blocks {
        let satellite = Satellite {
            id: f.text("satellite id")?,
            elevation: f.text("elevation")?,
            azimuth: f.text("azimuth")?,
            cn0: f.text("cn0")?,
        };
        satellites
            .push(satellite)
            .map_err(|_| Error::FieldOverflow {
                field: "satellites",
                max: GSV_MAX_SATELLITES,
                len: blocks,
            })?;
    }

    let signal_id = if has_signal_id {
        f.text("signal_id")?
    } else {
        None
    };

    Ok(GsvData {
        total,
        number,
        in_view,
        satellites,
        signal_id,
    })
}
