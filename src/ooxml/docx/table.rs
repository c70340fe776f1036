//! Table grid assembly for Word documents.
use serde::Serialize;

/// Widest grid Word lays out for a single table.
pub const MAX_GRID_COLUMNS: usize = 63;

/// Vertical merge state for table cells.
///
/// In OOXML, vertical merging uses the `<w:vMerge>` element:
/// - `restart`: Starts a new vertical merge (first cell in the merge)
/// - `continue`: Continues a vertical merge from the cell above (no `val` attribute or `val="continue"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMergeState {
    Restart,
    Continue,
}

impl VMergeState {
    /// Interpret the `w:val` attribute of a `<w:vMerge>` element.
    pub fn from_val(val: Option<&str>) -> Self {
        match val {
            Some("restart") => VMergeState::Restart,
            _ => VMergeState::Continue,
        }
    }
}

/// A table reconstructed as a grid of cell text.
///
/// `rows` always equals `data.len()` and `columns` equals the length of the
/// first row. Later rows may be shorter or longer; they are kept as found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// 1-based position among the top-level tables of the document
    pub index: usize,
    pub rows: usize,
    pub columns: usize,
    pub data: Vec<Vec<String>>,
}

impl Table {
    /// Get the text of a cell, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.data.get(row)?.get(column).map(String::as_str)
    }
}

#[derive(Debug, Default)]
struct CellBuilder {
    paragraphs: Vec<String>,
    span: usize,
    vmerge: Option<VMergeState>,
}

/// Incremental builder fed by the body parser while it walks one `<w:tbl>`.
#[derive(Debug, Default)]
pub(crate) struct TableBuilder {
    rows: Vec<Vec<String>>,
    row: Option<Vec<String>>,
    cell: Option<CellBuilder>,
}

impl TableBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn start_row(&mut self) {
        self.row = Some(Vec::new());
    }

    pub(crate) fn start_cell(&mut self) {
        self.cell = Some(CellBuilder {
            span: 1,
            ..CellBuilder::default()
        });
    }

    /// Record `<w:gridSpan>` for the open cell, clamped to `1..=MAX_GRID_COLUMNS`.
    pub(crate) fn set_span(&mut self, span: usize) {
        if let Some(cell) = self.cell.as_mut() {
            cell.span = span.clamp(1, MAX_GRID_COLUMNS);
        }
    }

    /// Record `<w:vMerge>` for the open cell.
    pub(crate) fn set_vmerge(&mut self, state: VMergeState) {
        if let Some(cell) = self.cell.as_mut() {
            cell.vmerge = Some(state);
        }
    }

    /// Append one finished paragraph to the open cell.
    ///
    /// Paragraphs of tables nested in the cell arrive here too.
    pub(crate) fn push_paragraph(&mut self, text: String) {
        if let Some(cell) = self.cell.as_mut() {
            cell.paragraphs.push(text);
        }
    }

    pub(crate) fn end_cell(&mut self) {
        let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) else {
            return;
        };

        let column = row.len();
        let mut text = cell.paragraphs.join("\n").trim().to_string();
        if cell.vmerge == Some(VMergeState::Continue)
            && let Some(above) = self.rows.last().and_then(|r| r.get(column))
        {
            text = above.clone();
        }

        for _ in 1..cell.span {
            row.push(text.clone());
        }
        row.push(text);
    }

    /// Close the open row. A row without cells is discarded.
    pub(crate) fn end_row(&mut self) {
        if let Some(row) = self.row.take()
            && !row.is_empty()
        {
            self.rows.push(row);
        }
    }

    /// Finish the table, or `None` when it ended up with no rows.
    pub(crate) fn finish(self, index: usize) -> Option<Table> {
        let columns = self.rows.first()?.len();
        Some(Table {
            index,
            rows: self.rows.len(),
            columns,
            data: self.rows,
        })
    }
}
