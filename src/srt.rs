use crate::timestamp::Timestamp;

/// A single SubRip block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtitle {
    index: usize,
    start: Timestamp,
    end: Timestamp,
    text: String,
}

impl Subtitle {
    /// `text` holds one or more caption lines joined by `\n`.
    pub fn new(index: usize, start: Timestamp, end: Timestamp, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    /// The sequence number as declared in the input.
    pub fn index(&self) -> usize {
        self.index
    }

    /// When the caption appears.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// When the caption disappears.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The caption split back into its lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
