//! Shared strings table for Excel files.
//!
//! Each `<si>` item may be a single `<t>` or a sequence of rich-text runs;
//! the runs are concatenated. Phonetic guides (`<rPh>`) are not part of the
//! cell text and are skipped.

use crate::common::error::Result;
use crate::common::xml::{push_reference, push_text};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Shared strings table for efficient string storage.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `xl/sharedStrings.xml`.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut strings = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;
        let mut phonetic_depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"si" => current = Some(String::new()),
                    b"rPh" => phonetic_depth += 1,
                    b"t" if phonetic_depth == 0 => in_text = true,
                    _ => {},
                },
                Event::Empty(ref e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                },
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"si" => strings.extend(current.take()),
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {},
                },
                Event::Text(ref e) if in_text => {
                    if let Some(s) = current.as_mut() {
                        push_text(s, e)?;
                    }
                },
                Event::GeneralRef(ref e) if in_text => {
                    if let Some(s) = current.as_mut() {
                        push_reference(s, e)?;
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by its index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
