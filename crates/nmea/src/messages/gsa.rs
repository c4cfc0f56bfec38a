use crate::error::Error;
use crate::field::{Fields, Text};

pub const GSA_MAX_SATELLITES: usize = 12;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GsaData {
    /// `M` manual, `A` automatic 2D/3D
    pub mode: Option<Text<1>>,
    /// 1 = no fix, 2 = 2D, 3 = 3D
    pub fix_mode: Option<Text<1>>,
    /// Satellites used in the solution
    pub satellites: [Option<Text<3>>; GSA_MAX_SATELLITES],
    pub pdop: Option<Text<5>>,
    pub hdop: Option<Text<5>>,
    pub vdop: Option<Text<5>>,
    pub system_id: Option<Text<1>>,
}

impl GsaData {
    pub fn satellites_used(&self) -> usize {
        self.satellites.iter().flatten().count()
    }

    pub fn pdop(&self) -> Option<f32> {
        self.pdop.as_deref()?.trim().parse().ok()
    }

    pub fn hdop(&self) -> Option<f32> {
        self.hdop.as_deref()?.trim().parse().ok()
    }

    pub fn vdop(&self) -> Option<f32> {
        self.vdop.as_deref()?.trim().parse().ok()
    }
}

pub(crate) fn gsa<'a>(f: &mut Fields<'a>) -> Result<GsaData, Error<'a>> {
    let mode = f.text("mode")?;
    let fix_mode = f.text("fix_mode")?;
    let mut satellites: [Option<Text<3>>; GSA_MAX_SATELLITES] = Default::default();
    for satellite in satellites.iter_mut() {
        *satellite = f.text("satellite")?;
    }
    Ok(GsaData {
        mode,
        fix_mode,
        satellites,
        pdop: f.text("pdop")?,
        hdop: f.text("hdop")?,
        vdop: f.text("vdop")?,
        system_id: f.optional("system_id")?,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_gsa() {
        let data = gsa(&mut Fields::new("A,2,34,21,07,44,,,,,,,,,2.59,2.40,1.00,4")).unwrap();
        assert_eq!(data.mode.as_deref(), Some("A"));
        assert_eq!(data.fix_mode.as_deref(), Some("2"));
        assert_eq!(data.satellites[0].as_deref(), Some("34"));
        assert_eq!(data.satellites[3].as_deref(), Some("44"));
        assert_eq!(data.satellites[4], None);
        assert_eq!(data.satellites_used(), 4);
        assert_eq!(data.pdop(), Some(2.59));
        assert_eq!(data.hdop(), Some(2.4));
        assert_eq!(data.vdop(), Some(1.0));
        assert_eq!(data.system_id.as_deref(), Some("4"));
    }

    #[test]
    fn test_gsa_too_few_satellites() {
        assert_eq!(
            gsa(&mut Fields::new("A,2,34,21,07,44,2.59,2.40,1.00")),
            Err(Error::MissingField("satellite"))
        );
    }
}
