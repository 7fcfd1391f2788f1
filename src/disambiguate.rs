//! Year suffixes for works by the same authors in the same year.
//!
//! Records are grouped by their sorted author names and the year their label falls under. In
//! every group of two or more, keys are sorted and the letters `a`, `b`, `c`, ... are appended
//! to the end of the label in that order: `2020` becomes `2020a`, `2020, March 15` becomes
//! `2020, March 15a`, and `n.d.` becomes `n.d.-a`. The transform is not idempotent; run it once
//! per load.

use std::collections::BTreeMap;

use tracing::debug;

use crate::field::date::year_bucket;
use crate::item::NO_DATE;
use crate::loader::Bibliography;

pub fn disambiguate(bib: &mut Bibliography) {
    let mut groups: BTreeMap<(Vec<String>, String), Vec<String>> = BTreeMap::new();
    for (key, record) in bib.iter() {
        let bucket = year_bucket(&record.display_year).to_string();
        groups
            .entry((record.all_author_names.clone(), bucket))
            .or_default()
            .push(key.clone());
    }

    for ((authors, year), mut keys) in groups {
        if keys.len() < 2 {
            continue;
        }
        keys.sort();
        debug!(authors = ?authors, year = %year, keys = ?keys, "disambiguating");
        for (idx, key) in keys.iter().enumerate() {
            if let Some(record) = bib.get_mut(key) {
                record.display_year = with_suffix(&record.display_year, &suffix(idx));
            }
        }
    }
}

/// `0 -> "a"`, `25 -> "z"`, `26 -> "aa"`.
pub fn suffix(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'a' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

fn with_suffix(label: &str, letters: &str) -> String {
    if label == NO_DATE {
        format!("{NO_DATE}-{letters}")
    } else {
        format!("{label}{letters}")
    }
}
