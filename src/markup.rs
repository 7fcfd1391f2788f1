use std::borrow::Cow;

use crate::field::link::UrlLabel;

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// `<span class="citation"><a href="#key">label</a></span>`; `label` must already be markup.
pub fn citation_anchor(key: &str, label: &str) -> String {
    format!(
        r##"<span class="citation"><a href="#{}">{}</a></span>"##,
        escape(key),
        label
    )
}

/// External link opening in a new tab; `text` must already be markup.
pub fn external_link(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank">{}</a>"#,
        escape(href),
        text
    )
}

pub fn url_text(label: &UrlLabel) -> String {
    let mut out = format!(r#"<span class="url-domain">{}</span>"#, escape(&label.domain));
    if !label.path.is_empty() {
        out.push_str(&format!(
            r#"<span class="url-path">{}</span>"#,
            escape(&label.path)
        ));
    }
    out
}
