use std::collections::HashMap;

/// Turns a raw header row into column labels that can be used as keys.
///
/// Cells are trimmed. A label seen before gets `_<n>` appended, where `n` is
/// how many times that trimmed label already appeared.
///
/// # Examples
/// ```
/// use sheet_export::domain::normalize_headers;
/// let labels = normalize_headers(&["Nom", " Nom ", "Prénom", "Nom"]);
/// assert_eq!(labels, vec!["Nom", "Nom_1", "Prénom", "Nom_2"]);
/// ```
pub fn normalize_headers<S: AsRef<str>>(raw_headers: &[S]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    raw_headers
        .iter()
        .map(|raw| {
            let label = raw.as_ref().trim();
            let count = seen.entry(label).or_insert(0);
            let normalized = if *count == 0 {
                label.to_owned()
            } else {
                format!("{}_{}", label, count)
            };
            *count += 1;
            normalized
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_pairwise_distinct(labels: &[String]) {
        let unique: HashSet<&String> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len(), "labels not distinct: {:?}", labels);
    }

    #[test]
    fn test_repeated_label() {
        assert_eq!(
            normalize_headers(&["Nom", "Nom", "Nom"]),
            vec!["Nom", "Nom_1", "Nom_2"]
        );
    }

    #[test]
    fn test_unique_labels_unchanged() {
        assert_eq!(
            normalize_headers(&["Classe", "Nom", "Prénom"]),
            vec!["Classe", "Nom", "Prénom"]
        );
    }

    #[test]
    fn test_trims_before_counting() {
        assert_eq!(
            normalize_headers(&["  Genre", "Genre  ", "\tGenre\n"]),
            vec!["Genre", "Genre_1", "Genre_2"]
        );
    }

    #[test]
    fn test_empty_labels() {
        assert_eq!(
            normalize_headers(&["", "  ", "Nom", ""]),
            vec!["", "_1", "Nom", "_2"]
        );
    }

    #[test]
    fn test_case_sensitive() {
        let labels = normalize_headers(&["nom", "Nom", "NOM"]);
        assert_eq!(labels, vec!["nom", "Nom", "NOM"]);
    }

    #[test]
    fn test_empty_input() {
        let labels = normalize_headers::<&str>(&[]);
        assert!(labels.is_empty());
    }

    #[test]
    fn test_length_and_distinctness() {
        let inputs: Vec<Vec<&str>> = vec![
            vec!["a", "b", "a", "c", "b", "a"],
            vec!["", "", "", ""],
            vec![" x", "x ", "y", " y ", "x"],
            vec!["Responsable 1 Nom", "Responsable 1 Nom", "Responsable 1 Prénom"],
        ];

        for input in inputs {
            let labels = normalize_headers(&input);
            assert_eq!(labels.len(), input.len());
            assert_pairwise_distinct(&labels);
        }
    }

    #[test]
    fn test_literal_suffix_can_collide_with_generated_label() {
        let labels = normalize_headers(&["Nom", "Nom", "Nom_1"]);
        assert_eq!(labels, vec!["Nom", "Nom_1", "Nom_1"]);
    }

    #[test]
    fn test_owned_strings() {
        let raw = vec!["Nom".to_string(), "Nom".to_string()];
        assert_eq!(normalize_headers(&raw), vec!["Nom", "Nom_1"]);
    }
}
