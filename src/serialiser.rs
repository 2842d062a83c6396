use crate::error::Error;
use crate::srt::Subtitle;

use std::io::{self, Write};

/// Writes one block: index, timing line, text and a closing blank line.
///
/// The four writes are not atomic. On failure the sink may hold part of the
/// block and should be discarded.
pub fn encode<W: Write>(sub: &Subtitle, sink: &mut W) -> Result<(), Error> {
    write_sub(sink, sub).map_err(Error::SinkWrite)
}

fn write_sub<W: Write>(buf: &mut W, sub: &Subtitle) -> io::Result<()> {
    writeln!(buf, "{}", sub.index())?;
    writeln!(buf, "{} --> {}", sub.start(), sub.end())?;
    writeln!(buf, "{}", sub.text())?;
    writeln!(buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::Timestamp;
    use std::io::Cursor;

    fn encode_to_string(sub: &Subtitle) -> String {
        let mut buf = Cursor::new(vec![]);
        encode(sub, &mut buf).expect("Failed to write to buffer");
        String::from_utf8(buf.into_inner()).unwrap()
    }

    macro_rules! test_encode {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (sub, expected) = $value;

                assert_eq!(encode_to_string(&sub), expected);
            }
        )*
        }
    }

    test_encode! {
        test_encode_0: (
            Subtitle::new(
                1,
                Timestamp::new(0, 0, 35, 684),
                Timestamp::new(0, 0, 37, 54),
                "Lorem ipsum dolor sit amet,\nconsectetur adipiscing elit.",
            ),
            "1\n00:00:35,684 --> 00:00:37,054\nLorem ipsum dolor sit amet,\nconsectetur adipiscing elit.\n\n",
        ),
        test_encode_1: (
            Subtitle::new(42, Timestamp::new(1, 2, 3, 4), Timestamp::new(1, 2, 5, 0), "Hi"),
            "42\n01:02:03,004 --> 01:02:05,000\nHi\n\n",
        ),
        test_encode_2: (
            Subtitle::new(7, Timestamp::new(100, 0, 0, 0), Timestamp::new(100, 0, 1, 0), "  <i>kept</i>  "),
            "7\n100:00:00,000 --> 100:00:01,000\n  <i>kept</i>  \n\n",
        ),
    }

    struct FailAfter {
        writes_left: usize,
        written: Vec<u8>,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes_left == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.writes_left -= 1;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_is_reported() {
        let sub = Subtitle::new(1, Timestamp::new(0, 0, 1, 0), Timestamp::new(0, 0, 2, 0), "text");
        let mut sink = FailAfter {
            writes_left: 0,
            written: vec![],
        };

        match encode(&sub, &mut sink) {
            Err(Error::SinkWrite(err)) => assert_eq!(err.to_string(), "disk full"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(sink.written.is_empty());
    }

    #[test]
    fn sink_failure_midway_leaves_partial_block() {
        let sub = Subtitle::new(3, Timestamp::new(0, 0, 1, 0), Timestamp::new(0, 0, 2, 0), "text");
        let mut sink = FailAfter {
            writes_left: 2,
            written: vec![],
        };

        assert!(matches!(encode(&sub, &mut sink), Err(Error::SinkWrite(_))));
        assert!(sink.written.starts_with(b"3"));
        assert!(!sink.written.ends_with(b"text\n\n"));
    }
}
