//! Streaming reader and writer for SubRip (`.srt`) subtitles.
//!
//! Blocks are parsed one line at a time and handed to a callback as soon as
//! they are complete, so arbitrarily long files never have to be held in
//! memory:
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! let input = "1\n00:00:01,000 --> 00:00:02,500\nHello\n";
//! let mut out = Vec::new();
//! subrip::parse_str(input, |sub| {
//!     subrip::encode(&sub, &mut out)?;
//!     Ok::<_, subrip::Error>(ControlFlow::Continue(()))
//! })
//! .unwrap();
//! assert_eq!(out, b"1\n00:00:01,000 --> 00:00:02,500\nHello\n\n");
//! ```

mod error;
mod parser;
mod serialiser;
mod srt;
mod timestamp;

pub use crate::error::Error;
pub use crate::parser::{parse, parse_lines, parse_str};
pub use crate::serialiser::encode;
pub use crate::srt::Subtitle;
pub use crate::timestamp::{format_timestamp, parse_timestamp, Timestamp, TimestampError};

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::ops::ControlFlow;

    fn round_trip(sub: &Subtitle) -> Vec<Subtitle> {
        let mut buf = Vec::new();
        encode(sub, &mut buf).expect("Failed to write to buffer");

        let mut parsed = Vec::new();
        parse(buf.as_slice(), |sub| {
            parsed.push(sub);
            Ok::<_, Infallible>(ControlFlow::Continue(()))
        })
        .expect("Failed to parse encoded block");
        parsed
    }

    macro_rules! test_round_trip {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let sub = $value;

                assert_eq!(round_trip(&sub), vec![sub]);
            }
        )*
        }
    }

    test_round_trip! {
        test_round_trip_0: Subtitle::new(
            1,
            Timestamp::new(0, 0, 35, 684),
            Timestamp::new(0, 0, 37, 54),
            "Lorem ipsum dolor sit amet,\nconsectetur adipiscing elit.",
        ),
        test_round_trip_1: Subtitle::new(
            982,
            Timestamp::new(1, 59, 59, 999),
            Timestamp::new(2, 0, 0, 0),
            "- Line one\n- Line two\n<i>Line three</i>",
        ),
        test_round_trip_2: Subtitle::new(5, Timestamp::new(0, 0, 0, 0), Timestamp::new(0, 0, 0, 1), "♪"),
        test_round_trip_3: Subtitle::new(1, Timestamp::new(0, 0, 1, 0), Timestamp::new(0, 0, 2, 0), "A\n   \nB"),
        test_round_trip_4: Subtitle::new(2, Timestamp::new(0, 0, 1, 0), Timestamp::new(0, 0, 2, 0), " "),
    }

    #[test]
    fn streaming_rewrite_preserves_file() {
        let input = "1\n00:00:35,684 --> 00:00:37,054\nLorem ipsum\n\n2\n00:00:37,184 --> 00:00:40,454\nDonec aliquet\narcu enim\n\n";
        let mut out = Vec::new();
        parse_str(input, |sub| {
            encode(&sub, &mut out)?;
            Ok::<_, Error>(ControlFlow::Continue(()))
        })
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), input);
    }
}
