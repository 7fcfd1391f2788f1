//! Replace `@key` citation markers in prose with citation markup.
//!
//! Two forms are recognised, left to right and without overlap:
//!
//! - bracketed: `[see @key, p. 5]` becomes one parenthetical citation carrying the text around
//!   the first key as prefix and suffix. Brackets without a key are copied through untouched.
//! - bare: `@key` becomes `Author (Year)`, or `(Author, Year)` with [`BareStyle::Parenthetical`].
//!
//! Keys that are not in the bibliography are rendered with the key as author and `n.d.` as year.

use std::{borrow::Cow, collections::HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::item::BibRecord;
use crate::loader::Bibliography;
use crate::markup::{citation_anchor, escape};

/// Characters allowed in a citation key, shared by both marker forms.
const KEY_MARKER: &str = r"@([A-Za-z0-9_-]+)";

static KEY_ANYWHERE: Lazy<Regex> = Lazy::new(|| Regex::new(KEY_MARKER).unwrap());
static KEY_AT_START: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{KEY_MARKER}")).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BareStyle {
    /// `Smith (2020)`: author as running text, year linked.
    #[default]
    Narrative,
    /// `(Smith, 2020)`: the whole label linked.
    Parenthetical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationForm {
    Bracketed,
    Bare,
}

/// One marker that was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub key: String,
    pub form: CitationForm,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub html: String,
    pub citations: Vec<Citation>,
}

impl Rendered {
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.citations
            .iter()
            .filter(|c| !c.resolved)
            .map(|c| c.key.as_str())
    }
}

pub struct Scanner<'b> {
    bib: &'b Bibliography,
    style: BareStyle,
}

impl<'b> Scanner<'b> {
    pub fn new(bib: &'b Bibliography, style: BareStyle) -> Self {
        Scanner { bib, style }
    }

    pub fn render(&self, text: &str) -> Rendered {
        if text.is_empty() {
            return Rendered::default();
        }
        if self.bib.is_empty() {
            return Rendered {
                html: text.to_string(),
                citations: Vec::new(),
            };
        }

        let mut out = Rendered {
            html: String::with_capacity(text.len() + text.len() / 2),
            citations: Vec::new(),
        };
        let pairs = bracket_pairs(text);
        let mut pos = 0;
        while let Some(off) = text[pos..].find(['[', '@']) {
            let at = pos + off;
            out.html.push_str(&text[pos..at]);

            if text[at..].starts_with('[') {
                match pairs.get(&at).copied() {
                    Some(close) => {
                        let inner = &text[at + 1..close];
                        if let Some(caps) = KEY_ANYWHERE.captures(inner) {
                            let whole = caps.get(0).map_or(0..0, |m| m.range());
                            let key = &caps[1];
                            let prefix = inner[..whole.start].trim();
                            let suffix = inner[whole.end..].trim();
                            self.bracketed(&mut out, key, prefix, suffix);
                        } else {
                            out.html.push_str(&text[at..=close]);
                        }
                        pos = close + 1;
                    }
                    None => {
                        out.html.push('[');
                        pos = at + 1;
                    }
                }
                continue;
            }

            match KEY_AT_START.captures(&text[at..]) {
                Some(caps) => {
                    self.bare(&mut out, &caps[1]);
                    pos = at + caps[0].len();
                }
                None => {
                    out.html.push('@');
                    pos = at + 1;
                }
            }
        }
        out.html.push_str(&text[pos..]);
        out
    }

    fn bracketed(&self, out: &mut Rendered, key: &str, prefix: &str, suffix: &str) {
        let (record, resolved) = self.resolve(key);
        let mut label = String::new();
        if !prefix.is_empty() {
            label.push_str(prefix);
            label.push(' ');
        }
        label.push_str(&record.display_author);
        label.push_str(", ");
        label.push_str(&record.display_year);
        if !suffix.is_empty() {
            if !suffix.starts_with(|c: char| c.is_ascii_punctuation()) {
                label.push_str(", ");
            }
            label.push_str(suffix);
        }
        out.html
            .push_str(&citation_anchor(key, &format!("({})", escape(&label))));
        out.citations.push(Citation {
            key: key.to_string(),
            form: CitationForm::Bracketed,
            resolved,
        });
    }

    fn bare(&self, out: &mut Rendered, key: &str) {
        let (record, resolved) = self.resolve(key);
        let html = match self.style {
            BareStyle::Narrative => format!(
                "{} {}",
                escape(&record.display_author),
                citation_anchor(key, &format!("({})", escape(&record.display_year)))
            ),
            BareStyle::Parenthetical => citation_anchor(
                key,
                &format!(
                    "({}, {})",
                    escape(&record.display_author),
                    escape(&record.display_year)
                ),
            ),
        };
        out.html.push_str(&html);
        out.citations.push(Citation {
            key: key.to_string(),
            form: CitationForm::Bare,
            resolved,
        });
    }

    fn resolve(&self, key: &str) -> (Cow<'_, BibRecord>, bool) {
        match self.bib.get(key) {
            Some(record) => (Cow::Borrowed(record), true),
            None => {
                debug!(key, "citation key not found in bibliography");
                (Cow::Owned(BibRecord::placeholder(key)), false)
            }
        }
    }
}

/// Maps the byte index of every balanced `[` to the byte index of its `]`.
fn bracket_pairs(text: &str) -> HashMap<usize, usize> {
    let mut pairs = HashMap::new();
    let mut open = Vec::new();
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => open.push(idx),
            ']' => {
                if let Some(start) = open.pop() {
                    pairs.insert(start, idx);
                }
            }
            _ => {}
        }
    }
    pairs
}
