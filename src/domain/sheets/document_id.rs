use std::fmt::Formatter;

pub const SPREADSHEET_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

const ID_MARKER: &str = "/d/";

/// Opaque identifier of a remote spreadsheet document.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        DocumentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the URL under which the document can be opened in a browser.
    /// # Examples
    /// ```
    /// use sheet_export::domain::DocumentId;
    /// let id = DocumentId::new("abc123");
    /// assert_eq!(id.viewable_url(), "https://docs.google.com/spreadsheets/d/abc123");
    /// ```
    pub fn viewable_url(&self) -> String {
        format!("{}{}", SPREADSHEET_URL_PREFIX, self.0)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracts the document identifier from a sharing URL.
///
/// The identifier is whatever follows the first `/d/` up to the next `/`, or
/// the end of the string. URLs without the marker, or with nothing after it,
/// yield `None`.
pub fn extract_identifier(url: &str) -> Option<DocumentId> {
    let (_, after_marker) = url.split_once(ID_MARKER)?;
    let id = after_marker.split('/').next().unwrap_or_default();

    if id.is_empty() {
        return None;
    }

    Some(DocumentId::new(id))
}
