//! The main document part (`word/document.xml`) parsed in a single pass.
use super::table::{Table, TableBuilder, VMergeState};
use crate::common::error::{Error, Result};
use crate::common::xml::{attr_value, push_reference, push_text};
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};

/// Narrative text and tables of a document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBody {
    /// Text of each body-level paragraph, in document order
    pub paragraphs: Vec<String>,
    /// Top-level tables in document order; empty tables are omitted
    pub tables: Vec<Table>,
}

impl DocumentBody {
    /// Parse the XML of a main document part.
    ///
    /// Only tables that are direct content of the body are reported. A table
    /// nested in a cell adds its paragraphs to that cell's text. Content of
    /// text boxes and of `mc:Fallback` branches is ignored.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut state = BodyParser::default();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => state.start(e, reader.decoder())?,
                Event::Empty(ref e) => {
                    state.start(e, reader.decoder())?;
                    state.end(e.local_name().as_ref());
                },
                Event::End(ref e) => state.end(e.local_name().as_ref()),
                Event::Text(ref e) => {
                    if let Some(text) = state.text_sink() {
                        push_text(text, e)?;
                    }
                },
                Event::GeneralRef(ref e) => {
                    if let Some(text) = state.text_sink() {
                        push_reference(text, e)?;
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if !state.saw_body {
            return Err(Error::MalformedDocument(
                "document part has no w:body element".to_string(),
            ));
        }
        Ok(Self {
            paragraphs: state.paragraphs,
            tables: state.tables,
        })
    }

    /// Non-empty body paragraphs joined by newlines.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for paragraph in self.paragraphs.iter().filter(|p| !p.is_empty()) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(paragraph);
        }
        out
    }
}

#[derive(Default)]
struct BodyParser {
    paragraphs: Vec<String>,
    tables: Vec<Table>,
    saw_body: bool,
    /// Top-level tables opened so far, dropped ones included
    table_count: usize,
    table_depth: usize,
    /// Depth inside content that never contributes text
    skip_depth: usize,
    run_depth: usize,
    in_text: bool,
    paragraph: Option<String>,
    table: Option<TableBuilder>,
}

fn is_skipped(name: &[u8]) -> bool {
    matches!(name, b"txbxContent" | b"Fallback")
}

impl BodyParser {
    fn start(&mut self, e: &BytesStart<'_>, decoder: Decoder) -> Result<()> {
        let name = e.local_name();
        let name = name.as_ref();
        if is_skipped(name) {
            self.skip_depth += 1;
            return Ok(());
        }
        if self.skip_depth > 0 {
            return Ok(());
        }

        match name {
            b"body" => self.saw_body = true,
            b"tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table_count += 1;
                    self.table = Some(TableBuilder::new());
                }
            },
            b"tr" if self.table_depth == 1 => self.table_mut().start_row(),
            b"tc" if self.table_depth == 1 => self.table_mut().start_cell(),
            b"gridSpan" if self.table_depth == 1 => {
                let span = attr_value(e, b"val", decoder)?
                    .and_then(|v| atoi_simd::parse::<u64>(v.trim().as_bytes()).ok())
                    .map_or(1, |v| usize::try_from(v).unwrap_or(usize::MAX));
                self.table_mut().set_span(span);
            },
            b"vMerge" if self.table_depth == 1 => {
                let val = attr_value(e, b"val", decoder)?;
                self.table_mut().set_vmerge(VMergeState::from_val(val.as_deref()));
            },
            b"p" => self.paragraph = Some(String::new()),
            b"r" => self.run_depth += 1,
            b"t" if self.run_depth > 0 => self.in_text = true,
            b"tab" if self.run_depth > 0 => self.push_char('\t'),
            b"br" | b"cr" if self.run_depth > 0 => self.push_char('\n'),
            _ => {},
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        if is_skipped(name) {
            self.skip_depth = self.skip_depth.saturating_sub(1);
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"r" => self.run_depth = self.run_depth.saturating_sub(1),
            b"p" => {
                let Some(text) = self.paragraph.take() else {
                    return;
                };
                if self.table_depth == 0 {
                    self.paragraphs.push(text);
                } else if let Some(table) = self.table.as_mut() {
                    table.push_paragraph(text);
                }
            },
            b"tc" if self.table_depth == 1 => self.table_mut().end_cell(),
            b"tr" if self.table_depth == 1 => self.table_mut().end_row(),
            b"tbl" if self.table_depth > 0 => {
                if self.table_depth == 1
                    && let Some(table) = self.table.take().and_then(|b| b.finish(self.table_count))
                {
                    self.tables.push(table);
                }
                self.table_depth -= 1;
            },
            _ => {},
        }
    }

    fn text_sink(&mut self) -> Option<&mut String> {
        if self.in_text && self.skip_depth == 0 {
            self.paragraph.as_mut()
        } else {
            None
        }
    }

    fn push_char(&mut self, ch: char) {
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push(ch);
        }
    }

    fn table_mut(&mut self) -> &mut TableBuilder {
        self.table.get_or_insert_with(TableBuilder::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::table::MAX_GRID_COLUMNS;
    use crate::common::error::ErrorKind;
    use crate::test_support::{document_xml, paragraph, table};

    fn parse(body: &str) -> DocumentBody {
        DocumentBody::parse(document_xml(body).as_bytes()).unwrap()
    }

    #[test]
    fn test_two_by_three_table() {
        let body = parse(&table(&[&["A", "B", "C"], &["1", "2", "3"]]));
        assert_eq!(body.tables.len(), 1);
        let t = &body.tables[0];
        assert_eq!((t.index, t.rows, t.columns), (1, 2, 3));
        assert_eq!(t.data, vec![vec!["A", "B", "C"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_no_tables() {
        let body = parse(&format!("{}{}", paragraph("Intro"), paragraph("More")));
        assert!(body.tables.is_empty());
        assert_eq!(body.text(), "Intro\nMore");
    }

    #[test]
    fn test_text_excludes_tables_and_empty_paragraphs() {
        let xml = format!(
            "{}<w:p/>{}{}",
            paragraph("Before"),
            table(&[&["cell"]]),
            paragraph("After &amp; done")
        );
        let body = parse(&xml);
        assert_eq!(body.paragraphs.len(), 3);
        assert_eq!(body.text(), "Before\nAfter & done");
    }

    #[test]
    fn test_runs_tabs_and_breaks() {
        let xml = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t xml:space="preserve"> c</w:t></w:r><w:r><w:t>d</w:t></w:r></w:p>"#;
        assert_eq!(parse(xml).paragraphs, vec!["a\tb\n cd"]);
    }

    #[test]
    fn test_nested_table_feeds_outer_cell() {
        let inner = table(&[&["inner"]]);
        let xml = format!(
            "<w:tbl><w:tr><w:tc>{}{inner}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>",
            paragraph("outer"),
            paragraph("right")
        );
        let body = parse(&xml);
        assert_eq!(body.tables.len(), 1);
        assert_eq!(body.tables[0].data, vec![vec!["outer\ninner", "right"]]);
    }

    #[test]
    fn test_dropped_table_keeps_numbering() {
        let xml = format!("<w:tbl><w:tblPr/></w:tbl>{}", table(&[&["x"]]));
        let body = parse(&xml);
        assert_eq!(body.tables.len(), 1);
        assert_eq!(body.tables[0].index, 2);
    }

    #[test]
    fn test_row_without_cells_is_skipped() {
        let xml = format!(
            "<w:tbl><w:tr><w:trPr/></w:tr><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>",
            paragraph("only")
        );
        let t = &parse(&xml).tables[0];
        assert_eq!(t.rows, 1);
        assert_eq!(t.data, vec![vec!["only"]]);
    }

    #[test]
    fn test_grid_span() {
        let xml = format!(
            r#"<w:tbl><w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr>{}</w:tc></w:tr><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>"#,
            paragraph("wide"),
            paragraph("l"),
            paragraph("r")
        );
        let t = &parse(&xml).tables[0];
        assert_eq!(t.columns, 2);
        assert_eq!(t.data[0], vec!["wide", "wide"]);
    }

    #[test]
    fn test_oversized_grid_span() {
        let xml = format!(
            r#"<w:tbl><w:tr><w:tc><w:tcPr><w:gridSpan w:val="5000000000"/></w:tcPr>{}</w:tc></w:tr></w:tbl>"#,
            paragraph("wide")
        );
        let t = &parse(&xml).tables[0];
        assert_eq!(t.columns, MAX_GRID_COLUMNS);
        assert_eq!(t.data[0][MAX_GRID_COLUMNS - 1], "wide");
    }

    #[test]
    fn test_text_box_content_is_ignored() {
        let xml = r#"<w:p><w:r><w:t>visible</w:t></w:r><w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#;
        assert_eq!(parse(xml).text(), "visible");
    }

    #[test]
    fn test_malformed_markup() {
        let xml = document_xml("<w:p><w:r><w:t>oops</w:r></w:p>");
        let err = DocumentBody::parse(xml.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);

        let err = DocumentBody::parse(b"<w:document/>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }
}
