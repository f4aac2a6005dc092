use serde::{Deserialize, Serialize};
use std::fmt;

/// A content language understood by this backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Html,
    Css,
    Svg,
    Js,
}

impl Language {
    /// All languages, in registration order.
    pub const ALL: [Language; 4] = [Language::Html, Language::Css, Language::Svg, Language::Js];

    /// The tag used for this language in workbooks and artifacts (e.g. "html").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Svg => "svg",
            Self::Js => "js",
        }
    }

    /// Human-readable description of the language standard.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Html => "Hypertext Markup Language (HTML5)",
            Self::Css => "Cascading Style Sheets (CSS3)",
            Self::Svg => "Scalable Vector Graphics",
            Self::Js => "Javascript (ES6)",
        }
    }

    /// Look a language up by its tag. Tags are matched case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Language> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.tag().eq_ignore_ascii_case(tag.trim()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
