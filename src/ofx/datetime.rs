//! OFX date/time values, e.g. `20230105`, `20230105120000.000[-5:EST]`.

use std::str::FromStr;

use nom::{
    bytes::complete::{is_not, take_while_m_n},
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, opt},
    error::Error as BriefError,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::{de, Deserialize, Deserializer};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::error::{Error, Result};

/// A point in time as written in an OFX document. Values without a time zone are taken to be
/// UTC.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OfxDateTime(pub OffsetDateTime);

impl OfxDateTime {
    /// The calendar date of this instant in UTC.
    pub fn utc_date(&self) -> Date {
        self.0.to_offset(UtcOffset::UTC).date()
    }
}

impl From<OffsetDateTime> for OfxDateTime {
    fn from(value: OffsetDateTime) -> Self {
        OfxDateTime(value)
    }
}

struct TimeParts<'a> {
    hour: &'a str,
    minute: &'a str,
    second: Option<&'a str>,
    fraction: Option<&'a str>,
}

struct OffsetParts<'a> {
    negative: bool,
    hours: &'a str,
    fraction: Option<&'a str>,
}

fn digits<'a>(count: usize) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    take_while_m_n(count, count, |c: char| c.is_ascii_digit())
}

fn time_parts(input: &str) -> IResult<&str, TimeParts<'_>> {
    let (input, (hour, minute, second, fraction)) = tuple((
        digits(2),
        digits(2),
        opt(digits(2)),
        opt(preceded(char('.'), digit1)),
    ))(input)?;
    Ok((
        input,
        TimeParts {
            hour,
            minute,
            second,
            fraction,
        },
    ))
}

/// Parses the bracketed zone suffix, e.g. `[-5:EST]`, `[+5.5]`, `[0:GMT]`.
fn offset_parts(input: &str) -> IResult<&str, OffsetParts<'_>> {
    let (input, (sign, hours, fraction, _name)) = delimited(
        char('['),
        tuple((
            opt(one_of("+-")),
            digit1,
            opt(preceded(char('.'), digit1)),
            opt(preceded(char(':'), opt(is_not("]")))),
        )),
        char(']'),
    )(input)?;
    Ok((
        input,
        OffsetParts {
            negative: sign == Some('-'),
            hours,
            fraction,
        },
    ))
}

fn number<T: FromStr>(s: &str, original: &str) -> Result<T> {
    s.parse()
        .map_err(|_| Error::InvalidDateTime(String::from(original)))
}

fn millis(fraction: &str) -> String {
    let digits = &fraction[..fraction.len().min(3)];
    format!("{digits:0<3}")
}

fn offset(parts: &OffsetParts, original: &str) -> Result<UtcOffset> {
    let invalid = || Error::InvalidDateTime(String::from(original));
    let hours: i8 = number(parts.hours, original)?;
    // The fractional part is a decimal fraction of an hour.
    let minutes = match parts.fraction {
        Some(f) => {
            let fraction: f64 = number(&format!("0.{f}"), original)?;
            (fraction * 60.0).round() as i8
        }
        None => 0,
    };
    let (hours, minutes) = if parts.negative {
        (-hours, -minutes)
    } else {
        (hours, minutes)
    };
    UtcOffset::from_hms(hours, minutes, 0).map_err(|_| invalid())
}

impl FromStr for OfxDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDateTime(String::from(s));
        let parsed: IResult<&str, _, BriefError<&str>> = all_consuming(tuple((
            digits(4),
            digits(2),
            digits(2),
            opt(time_parts),
            opt(offset_parts),
        )))(s);
        let (_, (year, month, day, time_parts, offset_parts)) = parsed.map_err(|_| invalid())?;

        let month = Month::try_from(number::<u8>(month, s)?).map_err(|_| invalid())?;
        let date = Date::from_calendar_date(number(year, s)?, month, number(day, s)?)
            .map_err(|_| invalid())?;
        let time = match time_parts {
            Some(t) => Time::from_hms_milli(
                number(t.hour, s)?,
                number(t.minute, s)?,
                t.second.map_or(Ok(0), |v| number(v, s))?,
                t.fraction.map_or(Ok(0), |v| number(&millis(v), s))?,
            )
            .map_err(|_| invalid())?,
            None => Time::MIDNIGHT,
        };
        let offset = match offset_parts {
            Some(o) => offset(&o, s)?,
            None => UtcOffset::UTC,
        };

        Ok(OfxDateTime(
            PrimitiveDateTime::new(date, time).assume_offset(offset),
        ))
    }
}

impl<'de> Deserialize<'de> for OfxDateTime {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.trim().parse().map_err(de::Error::custom)
    }
}
