use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take,
    character::complete::{anychar, char, digit1},
    combinator::{eof, map_res, opt, value},
    sequence::{preceded, terminated},
};

use chrono::{NaiveDate, NaiveTime};

use crate::checksum;
use crate::error::*;
use crate::field::Fields;
use crate::messages::*;

pub(crate) fn number<T: core::str::FromStr>(i: &str) -> IResult<&str, T> {
    map_res(digit1, str::parse::<T>).parse(i)
}

pub(crate) fn time_hms_nano(i: &str) -> IResult<&str, NaiveTime> {
    map_res(
        (
            map_res(take(2usize), str::parse::<u32>),
            map_res(take(2usize), str::parse::<u32>),
            map_res(take(2usize), str::parse::<u32>),
            opt(preceded(char('.'), digit1)),
        ),
        |(h, m, s, nanos)| {
            let nanos = if let Some(nanos) = nanos {
                let num = nanos.parse::<u32>().map_err(|_| "invalid time")?;
                let len = nanos.len() as u32;
                if len > 9 {
                    num / 10_u32.pow(len - 9)
                } else {
                    num * 10_u32.pow(9 - len)
                }
            } else {
                0
            };
            NaiveTime::from_hms_nano_opt(h, m, s, nanos).ok_or("invalid time")
        },
    )
    .parse(i)
}

pub(crate) fn date_dmy(i: &str) -> IResult<&str, NaiveDate> {
    map_res(
        (
            map_res(take(2usize), str::parse::<u32>),
            map_res(take(2usize), str::parse::<u32>),
            map_res(take(2usize), str::parse::<u32>),
        ),
        |(d, m, y)| {
            NaiveDate::from_ymd_opt(
                y as i32 + 2000, // assume 2000's
                m,
                d,
            )
            .ok_or("invalid date")
        },
    )
    .parse(i)
}

/// Runs `f` over a whole stored field, rejecting trailing input.
pub(crate) fn interpret<'a, T>(
    field: Option<&'a str>,
    f: fn(&'a str) -> IResult<&'a str, T>,
) -> Option<T> {
    match f(field?.trim()) {
        Ok(("", v)) => Some(v),
        _ => None,
    }
}

/// Converts `ddmm.mmmm` / `dddmm.mmmm` plus a hemisphere letter into signed
/// decimal degrees.
pub(crate) fn coordinate(value: Option<&str>, hemisphere: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    if !value.is_ascii() {
        return None;
    }
    let dot = value.find('.')?;
    if dot < 3 {
        return None;
    }
    let degrees = value[..dot - 2].parse::<f64>().ok()?;
    let minutes = value[dot - 2..].parse::<f64>().ok()?;
    let decimal = degrees + minutes / 60.0;
    match hemisphere? {
        "N" | "E" => Some(decimal),
        "S" | "W" => Some(-decimal),
        _ => None,
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Rmc,
    Gga,
    Gll,
    Gsa,
    Gsv,
    Vtg,
    Gst,
    Grs,
    Zda,
    Unknown,
}

impl Kind {
    pub fn from_tag(tag: &[u8]) -> Self {
        match tag {
            b"RMC" => Kind::Rmc,
            b"GGA" => Kind::Gga,
            b"GLL" => Kind::Gll,
            b"GSA" => Kind::Gsa,
            b"GSV" => Kind::Gsv,
            b"VTG" => Kind::Vtg,
            b"GST" => Kind::Gst,
            b"GRS" => Kind::Grs,
            b"ZDA" => Kind::Zda,
            _ => Kind::Unknown,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Kind::Rmc => "RMC",
            Kind::Gga => "GGA",
            Kind::Gll => "GLL",
            Kind::Gsa => "GSA",
            Kind::Gsv => "GSV",
            Kind::Vtg => "VTG",
            Kind::Gst => "GST",
            Kind::Grs => "GRS",
            Kind::Zda => "ZDA",
            Kind::Unknown => "???",
        }
    }
}

/// Classifies a sentence by the three character tag following the talker id.
/// Does not look at the checksum.
pub fn classify(s: &[u8]) -> Kind {
    match s {
        [b'$', _, _, a, b, c, ..] => Kind::from_tag(&[*a, *b, *c]),
        _ => Kind::Unknown,
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, PartialEq)]
pub enum SentenceData {
    Rmc(RmcData),
    Gga(GgaData),
    Gll(GllData),
    Gsa(GsaData),
    Gsv(GsvData),
    Vtg(VtgData),
    Gst(GstData),
    Grs(GrsData),
    Zda(ZdaData),
    Unknown((char, char, char)),
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Debug, PartialEq)]
pub struct Sentence {
    pub talker: (char, char),
    pub data: SentenceData,
}

impl Sentence {
    pub fn kind(&self) -> Kind {
        match self.data {
            SentenceData::Rmc(..) => Kind::Rmc,
            SentenceData::Gga(..) => Kind::Gga,
            SentenceData::Gll(..) => Kind::Gll,
            SentenceData::Gsa(..) => Kind::Gsa,
            SentenceData::Gsv(..) => Kind::Gsv,
            SentenceData::Vtg(..) => Kind::Vtg,
            SentenceData::Gst(..) => Kind::Gst,
            SentenceData::Grs(..) => Kind::Grs,
            SentenceData::Zda(..) => Kind::Zda,
            SentenceData::Unknown(..) => Kind::Unknown,
        }
    }
}

type Header = ((char, char), (char, char, char));

fn header(i: &str) -> IResult<&str, Header> {
    (
        (anychar, anychar),
        // A sentence without fields ends right after its tag
        terminated(
            (anychar, anychar, anychar),
            alt((value((), char(',')), value((), eof))),
        ),
    )
        .parse(i)
}

fn sentence(i: &str) -> Result<Sentence, Error<'_>> {
    let (i, (talker, mt)) = header(i)?;
    let f = &mut Fields::new(i);
    let data = match mt {
        ('R', 'M', 'C') => SentenceData::Rmc(rmc(f)?),
        ('G', 'G', 'A') => SentenceData::Gga(gga(f)?),
        ('G', 'L', 'L') => SentenceData::Gll(gll(f)?),
        ('G', 'S', 'A') => SentenceData::Gsa(gsa(f)?),
        ('G', 'S', 'V') => SentenceData::Gsv(gsv(f)?),
        ('V', 'T', 'G') => SentenceData::Vtg(vtg(f)?),
        ('G', 'S', 'T') => SentenceData::Gst(gst(f)?),
        ('G', 'R', 'S') => SentenceData::Grs(grs(f)?),
        ('Z', 'D', 'A') => SentenceData::Zda(zda(f)?),
        _ => SentenceData::Unknown(mt),
    };
    Ok(Sentence { talker, data })
}

/// Parses one `$...*HH` sentence, with or without its CRLF terminator.
///
/// The checksum must be present and valid. A sentence with any field longer
/// than the record can hold is rejected as a whole.
pub fn parse(s: &[u8]) -> Result<Sentence, Error<'_>> {
    let Some((s, expected)) = checksum::split(s) else {
        return Err(Error::InvalidFrame);
    };
    let actual = checksum::checksum(s);
    if expected != actual {
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    sentence(core::str::from_utf8(s)?)
}
