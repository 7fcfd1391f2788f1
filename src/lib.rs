//! Inline citations and reference lists from exported bibliography JSON.
//!
//! Every entry point takes the raw bibliography blob and builds its records from scratch: load,
//! disambiguate, then render. Nothing is cached between calls and nothing here returns an error;
//! a bad bibliography renders as if there were none.
//!
//! ```
//! let blob = r#"{"items": [{"citationKey": "A", "date": "2020",
//!                            "creators": [{"lastName": "Smith"}]}]}"#;
//! let html = bibcite::render_citations("[see @A, p. 5]", blob);
//! assert_eq!(
//!     html,
//!     r##"<span class="citation"><a href="#A">(see Smith, 2020, p. 5)</a></span>"##
//! );
//! ```

pub mod citation;
pub mod disambiguate;
pub mod enhance;
pub mod field;
pub mod format;
pub mod item;
pub mod loader;
pub mod markup;
pub mod source;

pub use citation::{BareStyle, Citation, CitationForm, Rendered};
pub use enhance::{PlainText, SmartPunctuation, TextEnhancer};
pub use item::{BibRecord, Creator, ItemType};
pub use loader::{Bibliography, LoadError, try_load};
pub use source::{BibliographySource, SourceChain};

use citation::Scanner;
use format::EntryFormatter;

/// A configured rendering engine.
pub struct Renderer {
    enhancer: Box<dyn TextEnhancer>,
    bare_style: BareStyle,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer {
            enhancer: Box::new(PlainText),
            bare_style: BareStyle::default(),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enhancer(mut self, enhancer: impl TextEnhancer + 'static) -> Self {
        self.enhancer = Box::new(enhancer);
        self
    }

    pub fn with_bare_style(mut self, style: BareStyle) -> Self {
        self.bare_style = style;
        self
    }

    /// Records with their final, disambiguated year labels.
    pub fn entries(&self, blob: impl AsRef<[u8]>) -> Bibliography {
        let mut bib = loader::load(blob);
        disambiguate::disambiguate(&mut bib);
        bib
    }

    pub fn render_citations(&self, text: &str, blob: impl AsRef<[u8]>) -> String {
        self.render_report(text, blob).html
    }

    /// Rendered text along with every citation that was replaced.
    pub fn render_report(&self, text: &str, blob: impl AsRef<[u8]>) -> Rendered {
        if text.is_empty() {
            return Rendered::default();
        }
        let bib = self.entries(blob);
        Scanner::new(&bib, self.bare_style).render(text)
    }

    pub fn render_bibliography(&self, blob: impl AsRef<[u8]>) -> String {
        let bib = self.entries(blob);
        EntryFormatter::new(self.enhancer.as_ref()).list(&bib)
    }
}

/// Parse a bibliography blob without disambiguating it.
pub fn load_bibliography(blob: impl AsRef<[u8]>) -> Bibliography {
    loader::load(blob)
}

/// Parse and disambiguate a bibliography blob.
pub fn list_entries(blob: impl AsRef<[u8]>) -> Bibliography {
    Renderer::default().entries(blob)
}

/// Replace citation markers in `text` using the default [`Renderer`].
///
/// Bracketed citations always render as `(Smith, 2020, p. 5)`. Bare `@key` citations use
/// [`BareStyle::Narrative`], `Smith (2020)` with only the year linked. For the
/// [`BareStyle::Parenthetical`] form, `(Smith, 2020)` linked as a whole, build the renderer
/// yourself:
///
/// ```
/// use bibcite::{BareStyle, Renderer};
///
/// let blob = r#"{"items": [{"citationKey": "A", "date": "2020", "creators": [{"lastName": "Smith"}]}]}"#;
/// assert!(bibcite::render_citations("@A", blob).starts_with("Smith <span"));
/// let html = Renderer::new()
///     .with_bare_style(BareStyle::Parenthetical)
///     .render_citations("@A", blob);
/// assert!(html.contains(">(Smith, 2020)</a>"));
/// ```
pub fn render_citations(text: &str, blob: impl AsRef<[u8]>) -> String {
    Renderer::default().render_citations(text, blob)
}

pub fn render_bibliography_list(blob: impl AsRef<[u8]>) -> String {
    Renderer::default().render_bibliography(blob)
}
