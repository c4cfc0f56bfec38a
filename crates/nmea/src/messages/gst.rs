use crate::error::Error;
use crate::field::{Fields, Text};

/// Pseudorange error statistics, all deviations in metres.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GstData {
    pub utc: Option<Text<10>>,
    pub rms: Option<Text<10>>,
    pub major: Option<Text<10>>,
    pub minor: Option<Text<10>>,
    /// Orientation of the error ellipse, degrees from true north
    pub orientation: Option<Text<10>>,
    pub lat_err: Option<Text<10>>,
    pub lon_err: Option<Text<10>>,
    pub alt_err: Option<Text<10>>,
}

pub(crate) fn gst<'a>(f: &mut Fields<'a>) -> Result<GstData, Error<'a>> {
    Ok(GstData {
        utc: f.text("utc")?,
        rms: f.text("rms")?,
        major: f.text("major")?,
        minor: f.text("minor")?,
        orientation: f.text("orientation")?,
        lat_err: f.text("lat_err")?,
        lon_err: f.text("lon_err")?,
        alt_err: f.text("alt_err")?,
    })
}
