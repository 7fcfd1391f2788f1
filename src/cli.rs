use std::{fs, path::PathBuf, str::FromStr};

use bibcite::{BareStyle, SourceChain};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace citation markers in a text with citation markup
    Render {
        /// Text to process, or `-` for stdin
        #[arg(value_name = "TEXT")]
        input: PathBuf,
        #[command(flatten)]
        bib: BibArgs,
        /// How bare `@key` citations are rendered
        #[arg(long, value_enum, default_value_t = Style::Narrative)]
        style: Style,
    },
    /// Render the formatted reference list
    Bibliography {
        #[command(flatten)]
        bib: BibArgs,
        /// Use curly quotes, dashes and ellipses in titles
        #[arg(long)]
        smart: bool,
    },
    /// Print the parsed records as JSON
    Entries {
        #[command(flatten)]
        bib: BibArgs,
    },
}

#[derive(Args, Debug)]
pub struct BibArgs {
    /// Bibliography sources in priority order: inline JSON or a `.json` file
    #[arg(short = 'b', long = "bib", value_name = "SRC", required = true)]
    pub sources: Vec<Source>,
}

impl BibArgs {
    /// Inline texts take precedence over files, each kept in command-line order.
    pub fn chain(&self) -> SourceChain {
        let mut chain = SourceChain::new();
        for src in &self.sources {
            chain = match src {
                Source::Inline(text) => chain.text(text.clone()),
                Source::File(path) => chain.file(path.clone()),
            };
        }
        chain
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Style {
    /// Smith (2020)
    Narrative,
    /// (Smith, 2020)
    Parenthetical,
}

impl From<Style> for BareStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Narrative => BareStyle::Narrative,
            Style::Parenthetical => BareStyle::Parenthetical,
        }
    }
}

#[derive(Clone, Debug)]
/// Where a bibliography can come from, which can either be
///
/// - inline JSON text, or
/// - an uploaded bibliography file.
pub enum Source {
    Inline(String),
    File(PathBuf),
}

impl FromStr for Source {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Is this a path?
        if let Ok(path) = fs::canonicalize(s) {
            Ok(Source::File(path))
        }
        // No? Must be the bibliography itself then.
        else {
            Ok(Source::Inline(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibcite::BibliographySource;
    use tempfile::NamedTempFile;

    #[test]
    fn from_str_identifies_existing_file() {
        let tmp = NamedTempFile::new().expect("tmp file");
        let path = tmp.path().to_path_buf();
        let src = Source::from_str(path.to_str().unwrap()).expect("parse");
        match src {
            Source::File(p) => {
                let can = std::fs::canonicalize(&path).unwrap();
                assert_eq!(p, can);
            }
            _ => panic!("expected file source"),
        }
    }

    #[test]
    fn from_str_falls_back_to_inline() {
        proptest::proptest!(|(s in r#"\{"items": \[[a-z ]{0,16}\]\}"#)| {
            let path = PathBuf::from(&s);
            proptest::prop_assume!(!path.exists());
            let src = Source::from_str(&s).expect("parse");
            match src {
                Source::Inline(text) => proptest::prop_assert_eq!(text, s),
                Source::File(_) => proptest::prop_assert!(false, "should not be a file"),
            }
        })
    }

    #[test]
    fn inline_sources_outrank_files() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("tmp file");
        std::io::Write::write_all(&mut file, b"from file").expect("write");
        let cli = Cli::try_parse_from([
            "bibcite",
            "entries",
            "--bib",
            file.path().to_str().unwrap(),
            "--bib",
            r#"{"items": []}"#,
        ])
        .expect("parse");
        let Command::Entries { bib } = cli.command else {
            panic!("expected entries command");
        };
        assert_eq!(bib.chain().resolve(), r#"{"items": []}"#);
    }
}
