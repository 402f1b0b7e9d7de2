use super::table::Table;

/// Projects `table` onto the columns named in `whitelist`.
///
/// A column is kept when its label matches a whitelist entry exactly. Kept
/// columns stay in table order. Returns the projected table and the labels
/// that were kept; when nothing matches both are empty.
pub fn filter_columns<S: AsRef<str>>(table: Table, whitelist: &[S]) -> (Table, Vec<String>) {
    let (headers, rows) = table.into_parts();

    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| whitelist.iter().any(|name| name.as_ref() == header.as_str()))
        .map(|(index, _)| index)
        .collect();

    if kept.is_empty() {
        return (Table::empty(), Vec::new());
    }

    let resolved: Vec<String> = kept.iter().map(|&index| headers[index].clone()).collect();
    let rows = rows
        .into_iter()
        .map(|row| kept.iter().map(|&index| row[index].clone()).collect())
        .collect();

    (Table::from_parts(resolved.clone(), rows), resolved)
}
