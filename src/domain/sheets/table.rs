use super::headers::normalize_headers;

/// Rectangular table of string cells keyed by unique column labels.
///
/// Every row holds exactly one value per header, in header order. A table
/// without columns never holds rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn empty() -> Self {
        Table::default()
    }

    /// Builds a table from raw sheet values, treating the first row as the
    /// header row.
    ///
    /// Data rows are aligned to the header positionally: missing trailing
    /// cells become empty strings and cells past the last header are dropped.
    pub fn from_raw_rows(raw_rows: Vec<Vec<String>>) -> Self {
        let mut raw_rows = raw_rows.into_iter();
        let Some(raw_headers) = raw_rows.next() else {
            return Table::empty();
        };

        let headers = normalize_headers(&raw_headers);
        if headers.is_empty() {
            return Table::empty();
        }

        let width = headers.len();
        let rows = raw_rows
            .enumerate()
            .map(|(index, mut row)| {
                if row.len() > width {
                    tracing::debug!(
                        row = index + 2,
                        cells = row.len(),
                        columns = width,
                        "Dropping cells past the last header"
                    );
                }
                row.resize(width, String::new());
                row
            })
            .collect();

        Table { headers, rows }
    }

    /// Assembles a table from already aligned parts.
    pub(crate) fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == headers.len()));
        if headers.is_empty() {
            return Table::empty();
        }
        Table { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<TableRow<'_>> {
        self.rows.get(index).map(|values| TableRow {
            headers: &self.headers,
            values,
        })
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = TableRow<'_>> {
        self.rows.iter().map(|values| TableRow {
            headers: &self.headers,
            values,
        })
    }

    /// Returns a copy holding only the first `count` rows.
    pub fn head(&self, count: usize) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(count).cloned().collect(),
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }
}

/// Borrowed view of one table row, addressable by column label.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> TableRow<'a> {
    pub fn get(&self, label: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|header| header == label)
            .map(|index| self.values[index].as_str())
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }
}
