use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use nom::bytes::complete::tag;
use nom::character::complete::{digit1, space0};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::delimited;
use nom::IResult;
use thiserror::Error;

/// A time of day with millisecond resolution, as written in a timing line.
///
/// The fields are kept exactly as they were read. Nothing is carried over
/// into the next unit, so `00:75:00,000` stays 75 minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Timestamp {
    hours: u32,
    minutes: u32,
    seconds: u32,
    millis: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed timestamp '{text}', expected HH:MM:SS,mmm")]
pub struct TimestampError {
    text: String,
}

impl TimestampError {
    /// The rejected input.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Timestamp {
    pub const fn new(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// Splits a duration since midnight into normalised fields.
    /// Sub-millisecond precision is dropped.
    pub fn from_duration(duration: Duration) -> Self {
        let total_secs = duration.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        Self {
            hours: u32::try_from(hours).unwrap_or(u32::MAX),
            minutes: minutes as u32,
            seconds: seconds as u32,
            millis: duration.subsec_millis(),
        }
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(
            u64::from(self.millis)
                + u64::from(self.seconds) * 1000
                + u64::from(self.minutes) * 60 * 1000
                + u64::from(self.hours) * 60 * 60 * 1000,
        )
    }

    /// Field accessors return the values as parsed.
    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn millis(&self) -> u32 {
        self.millis
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timestamp(s)
    }
}

/// Writes the canonical `HH:MM:SS,mmm` form. Hours past 99 widen the field.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// Reads `H+:M+:S+,m+`. Field widths are not enforced, so `1:2:3,4` is
/// accepted as 01:02:03,004.
pub fn parse_timestamp(text: &str) -> Result<Timestamp, TimestampError> {
    match all_consuming(delimited(space0, timestamp, space0))(text) {
        Ok((_, ts)) => Ok(ts),
        Err(_) => Err(TimestampError {
            text: text.to_string(),
        }),
    }
}

/// Writes `ts` as `HH:MM:SS,mmm`, zero-padded.
///
/// Parsed fields are not normalised, so the output is only 12 characters
/// when hours, minutes and seconds are at most 99 and milliseconds at most
/// 999. Larger fields widen: `00:00:01,1500` comes back unchanged.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_string()
}

fn timestamp(input: &str) -> IResult<&str, Timestamp> {
    let (input, hours) = field(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = field(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = field(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, millis) = field(input)?;

    Ok((input, Timestamp::new(hours, minutes, seconds, millis)))
}

fn field(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse())(input)
}
