use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use url::{Position, Url};

/// Display form of a link: host without `www.`, and the rest of the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLabel {
    pub domain: String,
    pub path: String,
}

pub fn url_label(raw: &str) -> UrlLabel {
    let raw = raw.trim();
    if let Ok(url) = Url::parse(raw)
        && let Some(host) = url.host_str()
    {
        let domain = strip_www(host).to_string();
        let rest = &url[Position::BeforePath..];
        let path = if rest == "/" {
            String::new()
        } else {
            percent_decode_str(rest).decode_utf8_lossy().into_owned()
        };
        return UrlLabel { domain, path };
    }

    // Not an absolute URL; strip whatever looks like a scheme and split on the first slash.
    static SCHEME_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());
    let bare = SCHEME_RE.replace(raw, "");
    let bare = strip_www(&bare);
    match bare.find('/') {
        Some(idx) if &bare[idx..] != "/" => UrlLabel {
            domain: bare[..idx].to_string(),
            path: bare[idx..].to_string(),
        },
        Some(idx) => UrlLabel {
            domain: bare[..idx].to_string(),
            path: String::new(),
        },
        None => UrlLabel {
            domain: bare.to_string(),
            path: String::new(),
        },
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Resolver URL for a DOI. DOIs already written as URLs are kept as they are.
pub fn doi_href(doi: &str) -> String {
    let doi = doi.trim();
    if doi.starts_with("http://") || doi.starts_with("https://") {
        return doi.to_string();
    }
    let bare = doi
        .strip_prefix("doi:")
        .or_else(|| doi.strip_prefix("DOI:"))
        .unwrap_or(doi)
        .trim_start();
    format!("https://doi.org/{bare}")
}
