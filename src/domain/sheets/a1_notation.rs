use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl A1Notation {
    /// Range covering every populated cell of the sheet titled `sheet_title`.
    ///
    /// Titles are always quoted; embedded single quotes are doubled.
    /// # Examples
    /// ```
    /// use sheet_export::domain::sheets::a1_notation::A1Notation;
    /// assert_eq!(A1Notation::whole_sheet("Feuille 1").as_ref(), "'Feuille 1'");
    /// assert_eq!(A1Notation::whole_sheet("L'école").as_ref(), "'L''école'");
    /// ```
    pub fn whole_sheet(sheet_title: &str) -> Self {
        A1Notation(format!("'{}'", sheet_title.replace('\'', "''")))
    }
}

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
