use crate::item::{Creator, UNKNOWN_AUTHOR};

/// `"John Ronald Reuel"` -> `"J. R. R."`.
pub fn initials(given: &str) -> String {
    given
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .map(|c| format!("{c}."))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One creator as it appears in a reference list entry.
pub fn reference_name(creator: &Creator) -> Option<String> {
    match (&creator.last_name, &creator.name) {
        (Some(last), _) => {
            let given = creator.first_name.as_deref().map(initials).unwrap_or_default();
            if given.is_empty() {
                Some(last.clone())
            } else {
                Some(format!("{last}, {given}"))
            }
        }
        (None, Some(name)) => Some(name.clone()),
        (None, None) => None,
    }
}

/// Join every creator: `A`, `A & B`, `A, B & C`.
pub fn author_list(creators: &[Creator]) -> String {
    let mut names: Vec<String> = creators.iter().filter_map(reference_name).collect();
    match names.len() {
        0 => UNKNOWN_AUTHOR.to_string(),
        1 => names.remove(0),
        _ => {
            let last = names.pop().unwrap_or_default();
            format!("{} & {}", names.join(", "), last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(last: &str, first: &str) -> Creator {
        Creator {
            last_name: Some(last.to_string()),
            first_name: Some(first.to_string()).filter(|f| !f.is_empty()),
            name: None,
        }
    }

    #[test]
    fn initials_take_first_character_of_each_word() {
        assert_eq!(initials("John Ronald Reuel"), "J. R. R.");
        assert_eq!(initials("  Émile   "), "É.");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn author_list_joins_with_ampersand() {
        let smith = person("Smith", "Jane Q");
        let doe = person("Doe", "John");
        let org = Creator {
            name: Some("World Health Organization".to_string()),
            ..Creator::default()
        };
        assert_eq!(author_list(std::slice::from_ref(&smith)), "Smith, J. Q.");
        assert_eq!(author_list(&[smith.clone(), doe.clone()]), "Smith, J. Q. & Doe, J.");
        assert_eq!(
            author_list(&[smith, doe, org]),
            "Smith, J. Q., Doe, J. & World Health Organization"
        );
    }

    #[test]
    fn author_list_handles_missing_names() {
        assert_eq!(author_list(&[]), UNKNOWN_AUTHOR);
        assert_eq!(author_list(&[Creator::default()]), UNKNOWN_AUTHOR);
        assert_eq!(author_list(&[person("Plato", "")]), "Plato");
    }
}
