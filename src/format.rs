//! Reference list entries.
//!
//! Every entry starts with `Authors (Year). <i>Title</i>` and continues with fields specific to
//! the item type. Unrecognised types get the generic tail: a DOI or URL link when present.

use crate::enhance::TextEnhancer;
use crate::field::{date, link, name};
use crate::item::{BibRecord, ItemType};
use crate::loader::Bibliography;
use crate::markup::{escape, external_link, url_text};

pub struct EntryFormatter<'e> {
    enhancer: &'e dyn TextEnhancer,
}

impl<'e> EntryFormatter<'e> {
    pub fn new(enhancer: &'e dyn TextEnhancer) -> Self {
        EntryFormatter { enhancer }
    }

    /// `<ul class="bibliography">` with one `<li>` per record, or `""` for an empty bibliography.
    pub fn list(&self, bib: &Bibliography) -> String {
        if bib.is_empty() {
            return String::new();
        }
        let items: Vec<String> = bib
            .iter()
            .map(|(key, record)| format!(r#"<li id="{}">{}</li>"#, escape(key), self.entry(record)))
            .collect();
        format!(r#"<ul class="bibliography">{}</ul>"#, items.join("\n"))
    }

    pub fn entry(&self, record: &BibRecord) -> String {
        let authors = name::author_list(&record.creators());
        let title = record.field("title").unwrap_or_default();
        let mut out = format!(
            "<span>{}</span> ({}). <i>{}</i>",
            escape(&authors),
            escape(&record.display_year),
            self.prose(&title)
        );
        let field = |n: &str| record.field(n);

        match &record.item_type {
            ItemType::Book => {
                if let Some(edition) = field("edition") {
                    out.push_str(&format!(" ({})", self.prose(&edition)));
                }
                match field("publisher") {
                    Some(publisher) => out.push_str(&format!(". {}.", self.prose(&publisher))),
                    None => out.push('.'),
                }
            }
            ItemType::JournalArticle => {
                match field("publicationTitle") {
                    Some(journal) => {
                        out.push_str(&format!(". {}", self.prose(&journal)));
                        for part in [field("volume"), field("pages")].into_iter().flatten() {
                            out.push_str(&format!(", {}", escape(&part)));
                        }
                        out.push('.');
                    }
                    None => out.push('.'),
                }
                if let Some(doi) = field("DOI") {
                    out.push(' ');
                    out.push_str(&doi_link(&doi));
                }
            }
            ItemType::Webpage | ItemType::BlogPost | ItemType::NewspaperArticle => {
                let container = match record.item_type {
                    ItemType::Webpage => "websiteTitle",
                    ItemType::BlogPost => "blogTitle",
                    _ => "publicationTitle",
                };
                sentence(&mut out, field(container));
                if let Some(url) = field("url") {
                    out.push(' ');
                    if let Some(accessed) = field("accessDate") {
                        out.push_str(&retrieved(&accessed));
                    }
                    out.push_str(&url_link(&url));
                }
            }
            ItemType::Presentation => {
                bracketed_kind(&mut out, field("presentationType"));
                if let Some(meeting) = field("meetingName") {
                    out.push_str(&format!(" {}.", escape(&meeting)));
                }
                trailing_url(&mut out, field("url"));
            }
            ItemType::Film => {
                bracketed_kind(&mut out, field("genre"));
                trailing_url(&mut out, field("url"));
            }
            ItemType::Interview => {
                sentence(&mut out, field("interviewMedium"));
                trailing_url(&mut out, field("url"));
            }
            ItemType::Podcast => {
                match field("seriesTitle") {
                    Some(series) => {
                        out.push_str(&format!(". {}", escape(&series)));
                        if let Some(episode) = field("episodeNumber") {
                            out.push_str(&format!(" (No. {})", escape(&episode)));
                        }
                        out.push('.');
                    }
                    None => out.push('.'),
                }
                trailing_url(&mut out, field("url"));
            }
            ItemType::Other(_) => match (field("DOI"), field("url")) {
                (Some(doi), _) => out.push_str(&format!(". {}", doi_link(&doi))),
                (None, Some(url)) => out.push_str(&format!(". {}", url_link(&url))),
                (None, None) => out.push('.'),
            },
        }
        out
    }

    fn prose(&self, text: &str) -> String {
        escape(&self.enhancer.enhance(text)).into_owned()
    }
}

/// `. Value.` when present, otherwise just the closing period.
fn sentence(out: &mut String, value: Option<String>) {
    match value {
        Some(v) => out.push_str(&format!(". {}.", escape(&v))),
        None => out.push('.'),
    }
}

/// ` [Kind].` when present, otherwise just the closing period.
fn bracketed_kind(out: &mut String, kind: Option<String>) {
    match kind {
        Some(kind) => out.push_str(&format!(" [{}].", escape(&kind))),
        None => out.push('.'),
    }
}

fn trailing_url(out: &mut String, url: Option<String>) {
    if let Some(url) = url {
        out.push(' ');
        out.push_str(&url_link(&url));
    }
}

fn url_link(url: &str) -> String {
    external_link(url, &url_text(&link::url_label(url)))
}

fn doi_link(doi: &str) -> String {
    external_link(&link::doi_href(doi), &escape(doi))
}

fn retrieved(accessed: &str) -> String {
    format!("Retrieved {}, from ", escape(&date::long_date(accessed)))
}
