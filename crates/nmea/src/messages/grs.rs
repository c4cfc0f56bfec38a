use crate::error::Error;
use crate::field::{Fields, Text};

pub const GRS_MAX_RESIDUALS: usize = 12;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrsData {
    pub utc: Option<Text<10>>,
    /// 0 = residuals used to calculate the GGA position,
    /// 1 = residuals recomputed after the GGA position
    pub mode: Option<Text<1>>,
    /// Range residuals in metres, -999~999
    pub residuals: [Option<Text<6>>; GRS_MAX_RESIDUALS],
    pub system_id: Option<Text<1>>,
    pub signal_id: Option<Text<1>>,
}

pub(crate) fn grs<'a>(f: &mut Fields<'a>) -> Result<GrsData, Error<'a>> {
    let utc = f.text("utc")?;
    let mode = f.text("mode")?;
    let mut residuals: [Option<Text<6>>; GRS_MAX_RESIDUALS] = Default::default();
    for residual in residuals.iter_mut() {
        *residual = f.text("residual")?;
    }
    Ok(GrsData {
        utc,
        mode,
        residuals,
        system_id: f.optional("system_id")?,
        signal_id: f.optional("signal_id")?,
    })
}
