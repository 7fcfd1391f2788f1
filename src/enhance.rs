//! Optional typographic processing applied to titles and a few prose fields.
//!
//! Enhancers receive and return plain text. The entry formatter escapes their output, so an
//! enhancer never has to care about markup.

use std::borrow::Cow;

pub trait TextEnhancer: Send + Sync {
    fn enhance<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl TextEnhancer for PlainText {
    fn enhance<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Curly quotes, en and em dashes, and ellipses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartPunctuation;

impl TextEnhancer for SmartPunctuation {
    fn enhance<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains(['"', '\'', '-', '.']) {
            return Cow::Borrowed(text);
        }
        let text = text
            .replace("---", "\u{2014}")
            .replace("--", "\u{2013}")
            .replace("...", "\u{2026}");

        let mut out = String::with_capacity(text.len());
        // The previous input character, and whether it was a quote that opened.
        let mut prev: Option<(char, bool)> = None;
        for ch in text.chars() {
            let opening = match prev {
                None => true,
                Some((p, opened)) => opens_quote(p) || (opened && p != ch),
            };
            let (replaced, opened) = match ch {
                '"' if opening => ('\u{201C}', true),
                '"' => ('\u{201D}', false),
                '\'' if opening => ('\u{2018}', true),
                '\'' => ('\u{2019}', false),
                other => (other, false),
            };
            out.push(replaced);
            prev = Some((ch, opened));
        }
        Cow::Owned(out)
    }
}

/// Whether a quote following `c` starts a quotation.
fn opens_quote(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '(' | '[' | '{' | '\u{2013}' | '\u{2014}' | '\u{201C}' | '\u{2018}'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_borrows() {
        assert!(matches!(PlainText.enhance("a \"b\""), Cow::Borrowed("a \"b\"")));
    }

    #[test]
    fn smart_punctuation_curls_quotes_by_context() {
        assert_eq!(
            SmartPunctuation.enhance(r#"The "new" machine's guts"#),
            "The \u{201C}new\u{201D} machine\u{2019}s guts"
        );
        assert_eq!(
            SmartPunctuation.enhance("'Tis a (\"quote\")"),
            "\u{2018}Tis a (\u{201C}quote\u{201D})"
        );
    }

    #[test]
    fn adjacent_quotes_open_then_close() {
        assert_eq!(SmartPunctuation.enhance("\"\""), "\u{201C}\u{201D}");
        assert_eq!(SmartPunctuation.enhance("''"), "\u{2018}\u{2019}");
        assert_eq!(
            SmartPunctuation.enhance("\"'Tis\""),
            "\u{201C}\u{2018}Tis\u{201D}"
        );
    }

    #[test]
    fn smart_punctuation_dashes_and_ellipses() {
        assert_eq!(
            SmartPunctuation.enhance("pp. 10--12 --- and so on..."),
            "pp. 10\u{2013}12 \u{2014} and so on\u{2026}"
        );
    }

    #[test]
    fn smart_punctuation_only_touches_punctuation() {
        proptest::proptest!(|(s in "[A-Za-z0-9 ,;:!?]{0,64}")| {
            proptest::prop_assert_eq!(SmartPunctuation.enhance(&s), s.as_str());
        })
    }
}
