use crate::error::Error;
use crate::srt::Subtitle;
use crate::timestamp::parse_timestamp;

use std::error::Error as StdError;
use std::io::{self, BufRead};
use std::ops::ControlFlow;

use log::{debug, trace};

const TIMING_SEPARATOR: &str = " --> ";

/// Parses SubRip blocks from `reader`, handing each one to `on_record` in
/// input order.
///
/// See [`parse_lines`] for the stop and error behaviour.
pub fn parse<R, F, E>(reader: R, on_record: F) -> Result<(), Error>
where
    R: BufRead,
    F: FnMut(Subtitle) -> Result<ControlFlow<()>, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    parse_lines(reader.lines(), on_record)
}

pub fn parse_str<F, E>(input: &str, on_record: F) -> Result<(), Error>
where
    F: FnMut(Subtitle) -> Result<ControlFlow<()>, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    parse_lines(input.lines().map(|line| Ok(line.to_string())), on_record)
}

/// Drives the block state machine over `lines`, which must already have
/// their terminators stripped.
///
/// Returning `ControlFlow::Break` from `on_record` ends parsing with `Ok(())`
/// and no further line is pulled from the source. An `Err` ends it with
/// [`Error::Consumer`]. Any other error aborts at the first offending line.
pub fn parse_lines<I, F, E>(lines: I, mut on_record: F) -> Result<(), Error>
where
    I: IntoIterator<Item = io::Result<String>>,
    F: FnMut(Subtitle) -> Result<ControlFlow<()>, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    let mut assembler = Assembler::new();
    let mut line_num = 0;

    for line in lines {
        line_num += 1;
        let line = line.map_err(|source| Error::SourceRead {
            line: line_num,
            source,
        })?;
        let line = if line_num == 1 {
            strip_bom(&line)
        } else {
            &line
        };

        if let Some(sub) = assembler.push(line_num, line)? {
            if deliver(&mut on_record, sub)?.is_break() {
                debug!("Consumer stopped parsing at line {}", line_num);
                return Ok(());
            }
        }
    }

    if let Some(sub) = assembler.finish(line_num)? {
        deliver(&mut on_record, sub)?;
    }
    Ok(())
}

fn deliver<F, E>(on_record: &mut F, sub: Subtitle) -> Result<ControlFlow<()>, Error>
where
    F: FnMut(Subtitle) -> Result<ControlFlow<()>, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    debug!("Emitting subtitle {}", sub.index());
    on_record(sub).map_err(|err| Error::Consumer(err.into()))
}

fn strip_bom(line: &str) -> &str {
    line.strip_prefix('\u{FEFF}').unwrap_or(line)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingIndex,
    AwaitingTiming,
    AccumulatingText,
}

/// Per-call accumulator for the block currently being read.
struct Assembler {
    state: State,
    index: Option<usize>,
    start_text: Option<String>,
    end_text: Option<String>,
    timing_line: usize,
    text: String,
}

impl Assembler {
    fn new() -> Self {
        Self {
            state: State::AwaitingIndex,
            index: None,
            start_text: None,
            end_text: None,
            timing_line: 0,
            text: String::new(),
        }
    }

    /// Feeds one line, returning a subtitle when `line` closes a block.
    fn push(&mut self, line_num: usize, line: &str) -> Result<Option<Subtitle>, Error> {
        match self.state {
            State::AwaitingIndex => {
                if is_blank(line) {
                    return Ok(None);
                }
                self.index = Some(parse_index(line_num, line)?);
                self.transition(State::AwaitingTiming);
                Ok(None)
            }
            State::AwaitingTiming => {
                let (start, end) = split_timing(line_num, line)?;
                self.start_text = Some(start.to_string());
                self.end_text = Some(end.to_string());
                self.timing_line = line_num;
                self.transition(State::AccumulatingText);
                Ok(None)
            }
            State::AccumulatingText => {
                if line.is_empty() {
                    if self.text.is_empty() {
                        // no caption yet, keep waiting for one
                        return Ok(None);
                    }
                    return self.complete().map(Some);
                }
                if !self.text.is_empty() {
                    self.text.push('\n');
                }
                self.text.push_str(line);
                Ok(None)
            }
        }
    }

    /// Closes the input. A block that has everything but its trailing blank
    /// line is still emitted.
    fn finish(&mut self, last_line: usize) -> Result<Option<Subtitle>, Error> {
        match self.state {
            State::AwaitingIndex => Ok(None),
            State::AccumulatingText if !self.text.is_empty() => self.complete().map(Some),
            _ => Err(Error::Truncated { line: last_line }),
        }
    }

    fn complete(&mut self) -> Result<Subtitle, Error> {
        let line = self.timing_line;
        let (index, start_text, end_text) =
            match (self.index.take(), self.start_text.take(), self.end_text.take()) {
                (Some(index), Some(start), Some(end)) => (index, start, end),
                _ => unreachable!("block completed outside of AccumulatingText"),
            };
        let text = std::mem::take(&mut self.text);
        self.transition(State::AwaitingIndex);

        let start = parse_timestamp(&start_text)
            .map_err(|source| Error::MalformedTimestamp { line, source })?;
        let end = parse_timestamp(&end_text)
            .map_err(|source| Error::MalformedTimestamp { line, source })?;

        Ok(Subtitle::new(index, start, end, text))
    }

    fn transition(&mut self, next: State) {
        trace!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

fn parse_index(line_num: usize, line: &str) -> Result<usize, Error> {
    match line.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(Error::InvalidIndex {
            line: line_num,
            content: line.to_string(),
        }),
    }
}

fn split_timing(line_num: usize, line: &str) -> Result<(&str, &str), Error> {
    let mut fields = line.split(TIMING_SEPARATOR);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(start), Some(end), None) => Ok((start, end)),
        _ => Err(Error::InvalidTiming {
            line: line_num,
            content: line.to_string(),
        }),
    }
}
