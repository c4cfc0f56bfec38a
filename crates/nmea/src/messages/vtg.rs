use crate::error::Error;
use crate::field::{Fields, Text};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VtgData {
    /// Course over ground, degrees true
    pub cog_true: Option<Text<6>>,
    /// Course over ground, degrees magnetic
    pub cog_magnetic: Option<Text<6>>,
    pub sog_knots: Option<Text<10>>,
    pub sog_kmh: Option<Text<10>>,
    pub mode: Option<Text<1>>,
}

impl VtgData {
    pub fn speed_kmh(&self) -> Option<f64> {
        self.sog_kmh.as_deref()?.trim().parse().ok()
    }

    pub fn course(&self) -> Option<f64> {
        self.cog_true.as_deref()?.trim().parse().ok()
    }
}

pub(crate) fn vtg<'a>(f: &mut Fields<'a>) -> Result<VtgData, Error<'a>> {
    let cog_true = f.text("cog_true")?;
    f.skip("T")?;
    let cog_magnetic = f.text("cog_magnetic")?;
    f.skip("M")?;
    let sog_knots = f.text("sog_knots")?;
    f.skip("N")?;
    let sog_kmh = f.text("sog_kmh")?;
    f.skip("K")?;
    Ok(VtgData {
        cog_true,
        cog_magnetic,
        sog_knots,
        sog_kmh,
        mode: f.optional("mode")?,
    })
}
