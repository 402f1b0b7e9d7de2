use serde_json::Value;

pub trait IntoCellStrings {
    fn into_cell_strings(self) -> Vec<Vec<String>>;
}

impl IntoCellStrings for Vec<Vec<Value>> {
    fn into_cell_strings(self) -> Vec<Vec<String>> {
        self.into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

/// Text of a cell as returned by the values API. Strings are kept verbatim,
/// `null` becomes empty, anything else keeps its JSON spelling.
pub fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
