use std::fmt;

use chrono::NaiveDateTime;
use lcx6x::Snapshot;
use nmea::messages::FixQuality;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    /// No RMC sentence received yet
    Disconnected,
    /// The last RMC reported a valid fix
    Active,
    Warning,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Disconnected => write!(f, "DISCONNECTED"),
            Link::Active => write!(f, "ACTIVE"),
            Link::Warning => write!(f, "WARNING"),
        }
    }
}

/// Human-oriented summary of the latest receiver output.
#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub link: Link,
    pub time: Option<NaiveDateTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Meters above mean sea level
    pub altitude: Option<f64>,
    pub speed_kmh: Option<f64>,
    /// Degrees true
    pub course: Option<f64>,
    pub fix_quality: FixQuality,
    pub satellites: Option<u8>,
    pub hdop: Option<f32>,
}

impl From<&Snapshot> for Status {
    fn from(s: &Snapshot) -> Self {
        let rmc = s.rmc();
        let gga = s.gga();
        let vtg = s.vtg();

        let link = match rmc {
            None => Link::Disconnected,
            Some(rmc) if rmc.is_valid() => Link::Active,
            Some(_) => Link::Warning,
        };

        // RMC only says valid or not; GGA knows the kind of fix.
        let fix_quality = match gga.and_then(|gga| gga.fix_quality()) {
            Some(q) if q != FixQuality::Invalid => q,
            _ if link == Link::Active => FixQuality::Gps,
            _ => FixQuality::Invalid,
        };

        Self {
            link,
            time: rmc.and_then(|rmc| Some(rmc.date()?.and_time(rmc.time()?))),
            latitude: rmc.and_then(|rmc| rmc.latitude()),
            longitude: rmc.and_then(|rmc| rmc.longitude()),
            altitude: gga.and_then(|gga| gga.altitude()),
            speed_kmh: vtg
                .and_then(|vtg| vtg.speed_kmh())
                .or_else(|| rmc.and_then(|rmc| rmc.speed_kmh())),
            course: vtg
                .and_then(|vtg| vtg.course())
                .or_else(|| rmc.and_then(|rmc| rmc.course())),
            fix_quality,
            satellites: gga.and_then(|gga| gga.satellites()),
            hdop: gga
                .and_then(|gga| gga.hdop())
                .or_else(|| s.gsa().and_then(|gsa| gsa.hdop())),
        }
    }
}

/// `30.7394792, 'N', 'S'` -> `30°44'22.1"N`
fn fmt_dms(
    f: &mut fmt::Formatter<'_>,
    decimal: f64,
    positive: char,
    negative: char,
) -> fmt::Result {
    let hemisphere = if decimal < 0.0 { negative } else { positive };
    let decimal = decimal.abs();
    let degrees = decimal.trunc();
    let minutes = (decimal - degrees) * 60.0;
    let seconds = (minutes - minutes.trunc()) * 60.0;
    write!(
        f,
        "{}°{:02}'{:04.1}\"{}",
        degrees as u32,
        minutes.trunc() as u32,
        seconds,
        hemisphere
    )
}

fn compass(course: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    POINTS[((course.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8]
}

const NONE: &str = "-";

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "status     {}", self.link)?;

        match self.time {
            Some(t) => writeln!(f, "time       {} UTC", t.format("%Y-%m-%d %H:%M:%S%.3f"))?,
            None => writeln!(f, "time       {NONE}")?,
        }

        write!(f, "latitude   ")?;
        match self.latitude {
            Some(lat) => fmt_dms(f, lat, 'N', 'S')?,
            None => write!(f, "{NONE}")?,
        }
        writeln!(f)?;

        write!(f, "longitude  ")?;
        match self.longitude {
            Some(lon) => fmt_dms(f, lon, 'E', 'W')?,
            None => write!(f, "{NONE}")?,
        }
        writeln!(f)?;

        match self.altitude {
            Some(alt) => writeln!(f, "altitude   {alt:.1} m")?,
            None => writeln!(f, "altitude   {NONE}")?,
        }
        match self.speed_kmh {
            Some(speed) => writeln!(f, "speed      {speed:.2} km/h")?,
            None => writeln!(f, "speed      {NONE}")?,
        }
        match self.course {
            Some(course) => writeln!(f, "course     {course:.1}° ({})", compass(course))?,
            None => writeln!(f, "course     {NONE}")?,
        }

        writeln!(f, "fix        {}", self.fix_quality)?;
        match self.satellites {
            Some(n) => writeln!(f, "satellites {n}")?,
            None => writeln!(f, "satellites {NONE}")?,
        }
        match self.hdop {
            Some(hdop) => write!(f, "HDOP       {hdop:.2}"),
            None => write!(f, "HDOP       {NONE}"),
        }
    }
}
