//! Cell references and value rendering for worksheet cells.

use super::styles::NumberKind;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Right-most column of a worksheet (`XFD`).
pub const MAX_COLUMNS: u32 = 16_384;
/// Last row of a worksheet.
pub const MAX_ROWS: u32 = 1_048_576;
/// Serial of 9999-12-31 23:59:59, the last representable spreadsheet date.
pub const MAX_DATE_SERIAL: f64 = 2_958_465.999_99;

/// Convert a column number (1-based) to letters (1 → `A`, 27 → `AA`).
pub fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        let letter = ((col % 26) as u8 + b'A') as char;
        letters.insert(0, letter);
        col /= 26;
    }

    letters
}

/// Split a cell reference such as `C12` into 1-based `(column, row)`.
///
/// Absolute markers (`$C$12`) are accepted. Returns `None` for anything
/// that is not a letters-then-digits reference, and for positions past
/// [`MAX_COLUMNS`] or [`MAX_ROWS`].
pub fn reference_to_coords(reference: &str) -> Option<(u32, u32)> {
    let reference = reference.as_bytes();
    let mut col = 0u32;
    let mut pos = 0;

    while pos < reference.len() {
        match reference[pos] {
            b'$' => {},
            b if b.is_ascii_alphabetic() => {
                col = col * 26 + u32::from(b.to_ascii_uppercase() - b'A') + 1;
                if col > MAX_COLUMNS {
                    return None;
                }
            },
            _ => break,
        }
        pos += 1;
    }

    let digits = reference[pos..].strip_prefix(b"$").unwrap_or(&reference[pos..]);
    let row = atoi_simd::parse::<u32>(digits).ok()?;
    (col > 0 && (1..=MAX_ROWS).contains(&row)).then_some((col, row))
}

/// Cell type from the `t` attribute of `<c>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellType {
    #[default]
    Number,
    SharedString,
    InlineString,
    FormulaString,
    Boolean,
    Error,
    Date,
}

impl CellType {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("s") => CellType::SharedString,
            Some("inlineStr") => CellType::InlineString,
            Some("str") => CellType::FormulaString,
            Some("b") => CellType::Boolean,
            Some("e") => CellType::Error,
            Some("d") => CellType::Date,
            _ => CellType::Number,
        }
    }
}

/// Render a stored numeric value.
///
/// Values written without a fraction or exponent are printed as integers,
/// everything else in shortest round-trip float form. Date-formatted values
/// become `YYYY-MM-DD HH:MM:SS`, time-only values below one day `HH:MM:SS`.
pub fn render_number(raw: &str, kind: NumberKind, date1904: bool) -> String {
    let raw = raw.trim();
    let Ok(value) = fast_float2::parse::<f64, _>(raw) else {
        return raw.to_string();
    };

    if kind != NumberKind::General
        && let Some(rendered) = render_serial(value, kind, date1904)
    {
        return rendered;
    }

    let is_integer_text = !raw.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));
    if is_integer_text && let Ok(int) = atoi_simd::parse::<i64>(raw.as_bytes()) {
        return int.to_string();
    }
    format_float(value)
}

/// Shortest round-trip rendering of a float (`3.5`, `2.0`, `1e-7`).
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let mut buffer = ryu::Buffer::new();
    buffer.format_finite(value).to_string()
}

/// Render a boolean cell (`1`/`0`) the way spreadsheet exports print them.
pub fn render_bool(raw: &str) -> String {
    match raw.trim() {
        "1" | "true" | "TRUE" => "True".to_string(),
        _ => "False".to_string(),
    }
}

fn render_serial(serial: f64, kind: NumberKind, date1904: bool) -> Option<String> {
    if serial < 0.0 {
        return None;
    }
    if kind == NumberKind::Time && serial < 1.0 {
        let seconds = (serial * 86_400.0).round() as i64 % 86_400;
        return Some(format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            seconds % 3600 / 60,
            seconds % 60
        ));
    }
    serial_to_datetime(serial, date1904).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Convert a spreadsheet serial date to a timestamp.
///
/// The 1900 system counts a nonexistent 1900-02-29, so serials before 61
/// are shifted by one day. Serials outside `0..=MAX_DATE_SERIAL` have no
/// date.
pub fn serial_to_datetime(serial: f64, date1904: bool) -> Option<NaiveDateTime> {
    if !(0.0..=MAX_DATE_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = if date1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)?
    } else if serial < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let millis = (serial * 86_400_000.0).round() as i64;
    let rounded_seconds = millis.checked_add(500)?.div_euclid(1000);
    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_seconds(rounded_seconds)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references() {
        assert_eq!(reference_to_coords("A1"), Some((1, 1)));
        assert_eq!(reference_to_coords("c12"), Some((3, 12)));
        assert_eq!(reference_to_coords("AA3"), Some((27, 3)));
        assert_eq!(reference_to_coords("$B$7"), Some((2, 7)));
        assert_eq!(reference_to_coords("12"), None);
        assert_eq!(reference_to_coords("A"), None);
        assert_eq!(reference_to_coords("A0"), None);
        assert_eq!(reference_to_coords("XFD1048576"), Some((MAX_COLUMNS, MAX_ROWS)));
        assert_eq!(reference_to_coords("XFE1"), None);
        assert_eq!(reference_to_coords("ZZZZ1"), None);
        assert_eq!(reference_to_coords("FXSHRXW1"), None);
        assert_eq!(reference_to_coords("A1048577"), None);
        assert_eq!(column_to_letters(1), "A");
        assert_eq!(column_to_letters(28), "AB");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(render_number("42", NumberKind::General, false), "42");
        assert_eq!(render_number("-7", NumberKind::General, false), "-7");
        assert_eq!(render_number("3.5", NumberKind::General, false), "3.5");
        assert_eq!(render_number("2.0", NumberKind::General, false), "2.0");
        assert_eq!(render_number("0.1", NumberKind::General, false), "0.1");
        assert_eq!(render_number("n/a", NumberKind::General, false), "n/a");
    }

    #[test]
    fn test_dates_and_times() {
        assert_eq!(render_number("45292", NumberKind::Date, false), "2024-01-01 00:00:00");
        assert_eq!(render_number("45292.5", NumberKind::Date, false), "2024-01-01 12:00:00");
        assert_eq!(render_number("1", NumberKind::Date, false), "1900-01-01 00:00:00");
        assert_eq!(render_number("0", NumberKind::Date, true), "1904-01-01 00:00:00");
        assert_eq!(render_number("0.75", NumberKind::Time, false), "18:00:00");
        assert_eq!(render_number("-1", NumberKind::Date, false), "-1");
        assert_eq!(render_number("2958465", NumberKind::Date, false), "9999-12-31 00:00:00");
    }

    #[test]
    fn test_serials_past_the_last_date_stay_numbers() {
        assert_eq!(render_number("1e300", NumberKind::Date, false), "1e300");
        assert_eq!(render_number("2958466", NumberKind::Date, true), "2958466");
        assert_eq!(serial_to_datetime(f64::INFINITY, false), None);
        assert_eq!(serial_to_datetime(f64::NAN, false), None);
    }

    #[test]
    fn test_bools_and_types() {
        assert_eq!(render_bool("1"), "True");
        assert_eq!(render_bool("0"), "False");
        assert_eq!(CellType::from_attr(Some("s")), CellType::SharedString);
        assert_eq!(CellType::from_attr(None), CellType::Number);
    }
}
