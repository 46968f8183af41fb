//! Classification of source references.

use std::fmt;

/// Input kind declared by the state key a reference was read from.
///
/// Takes precedence over sniffing the reference itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    JsonDir,
    XmlDir,
    CsvDir,
    Generic,
}

impl InputKind {
    /// Map a state key name to its declared kind.
    pub fn from_key(key: &str) -> Self {
        match key {
            "json_dir" => Self::JsonDir,
            "xml_dir" => Self::XmlDir,
            "csv_dir" => Self::CsvDir,
            _ => Self::Generic,
        }
    }

    /// Whether content of this kind is used verbatim.
    pub fn is_literal(self) -> bool {
        !matches!(self, Self::Generic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::JsonDir => "json_dir",
            Self::XmlDir => "xml_dir",
            Self::CsvDir => "csv_dir",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified source reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// Structured data (JSON, XML, CSV) used as-is
    LiteralData(&'a str),
    /// Markup supplied in-process; cleaned but never fetched
    LocalPath(&'a str),
    /// An `http(s)://` URL to acquire
    RemoteUrl(&'a str),
}

impl<'a> Source<'a> {
    /// Classify `reference` given the declared `kind`.
    pub fn classify(kind: InputKind, reference: &'a str) -> Self {
        if kind.is_literal() {
            Self::LiteralData(reference)
        } else if !has_http_scheme(reference) {
            Self::LocalPath(reference)
        } else {
            Self::RemoteUrl(reference)
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteUrl(_))
    }
}

fn has_http_scheme(reference: &str) -> bool {
    let starts_with = |prefix: &str| {
        reference
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}
