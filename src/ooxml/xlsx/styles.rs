//! Number formats of `xl/styles.xml`, reduced to what value rendering needs.

use crate::common::error::Result;
use crate::common::xml::attr_value;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// How a numeric cell value should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberKind {
    #[default]
    General,
    /// Calendar date, possibly with a time of day
    Date,
    /// Time of day or duration without a date part
    Time,
}

/// Number kind per cell style index (`s` attribute of `<c>`).
#[derive(Debug, Clone, Default)]
pub struct CellStyles {
    kinds: Vec<NumberKind>,
}

impl CellStyles {
    /// Parse the stylesheet part.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut custom: HashMap<u32, NumberKind> = HashMap::new();
        let mut kinds = Vec::new();
        let mut in_cell_xfs = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = true,
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let decoder = reader.decoder();
                    match e.local_name().as_ref() {
                        b"numFmt" => {
                            let id = attr_value(e, b"numFmtId", decoder)?
                                .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok());
                            let code = attr_value(e, b"formatCode", decoder)?;
                            if let (Some(id), Some(code)) = (id, code) {
                                custom.insert(id, classify_format_code(&code));
                            }
                        },
                        b"xf" if in_cell_xfs => {
                            let id = attr_value(e, b"numFmtId", decoder)?
                                .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok())
                                .unwrap_or(0);
                            let kind = custom.get(&id).copied().unwrap_or_else(|| builtin_kind(id));
                            kinds.push(kind);
                        },
                        _ => {},
                    }
                },
                Event::End(ref e) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = false,
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { kinds })
    }

    /// Number kind of a style index; unknown indexes are general.
    pub fn kind(&self, style: usize) -> NumberKind {
        self.kinds.get(style).copied().unwrap_or_default()
    }
}

/// Kind of a built-in number format id.
pub fn builtin_kind(id: u32) -> NumberKind {
    match id {
        14..=17 | 22 | 27..=36 | 50..=58 => NumberKind::Date,
        18..=21 | 45..=47 => NumberKind::Time,
        _ => NumberKind::General,
    }
}

/// Classify a custom format code by the date and time tokens of its first
/// section, ignoring quoted literals, escapes and bracketed modifiers.
pub fn classify_format_code(code: &str) -> NumberKind {
    let mut escaped = false;
    let mut quoted = false;
    let mut brackets = 0u8;
    let mut has_date = false;
    let mut has_time = false;

    for ch in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' | '_' => escaped = true,
            '"' => quoted = !quoted,
            _ if quoted => {},
            ';' => break,
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            _ if brackets > 0 => {},
            'y' | 'Y' | 'd' | 'D' => has_date = true,
            'h' | 'H' | 's' | 'S' => has_time = true,
            'm' | 'M' => has_time |= !has_date,
            _ => {},
        }
    }

    match (has_date, has_time) {
        (true, _) => NumberKind::Date,
        (false, true) => NumberKind::Time,
        _ => NumberKind::General,
    }
}
