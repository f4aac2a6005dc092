/// Workbook data model — scenes, fragments, imports, and loading.
use ron::extensions::Extensions;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::classification::{Classification, Mode};
use super::language::Language;
use super::value::Value;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_module_name() -> String {
    "workbook".to_string()
}

/// The full document being compiled: an ordered sequence of scenes plus
/// the module name and imports used by the scripting output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default = "default_module_name")]
    pub module_name: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Default for Workbook {
    fn default() -> Self {
        Self {
            module_name: default_module_name(),
            imports: Vec::new(),
            scenes: Vec::new(),
        }
    }
}

impl Workbook {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            ..Self::default()
        }
    }

    /// Load a workbook from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Workbook, WorkbookError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a workbook from a RON string. Optional fields may be written
    /// without `Some(..)`.
    pub fn parse_ron(input: &str) -> Result<Workbook, WorkbookError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(input)?)
    }

    /// Parse a workbook from a JSON string.
    pub fn parse_json(input: &str) -> Result<Workbook, WorkbookError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Append a scene and return a handle to it for filling in fragments.
    pub fn add_scene(&mut self) -> &mut Scene {
        self.scenes.push(Scene::default());
        let last = self.scenes.len() - 1;
        &mut self.scenes[last]
    }

    pub fn with_import(mut self, import: ImportSpec) -> Self {
        self.imports.push(import);
        self
    }
}

/// One ordered unit of the workbook. Its 0-based index is its position in
/// `Workbook::scenes`; output renders it 1-based.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl Scene {
    pub fn push(&mut self, fragment: Fragment) -> &mut Self {
        self.fragments.push(fragment);
        self
    }
}

/// One tagged block of content-language text within a scene.
///
/// `classification` is the verdict the host stored when the fragment was
/// written; unclassified fragments are treated as evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub language: Language,
    pub code: String,
    #[serde(default)]
    pub attrs: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
}

impl Fragment {
    pub fn new(language: Language, code: impl Into<String>) -> Self {
        Self {
            language,
            code: code.into(),
            attrs: HashMap::new(),
            classification: None,
        }
    }

    pub fn classified(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn mode(&self) -> Mode {
        self.classification
            .as_ref()
            .map(|c| c.mode)
            .unwrap_or_default()
    }
}

/// Which names an import brings into scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expose {
    /// `"*"`: a namespace import.
    All,
    /// An ordered list of named imports.
    Names(Vec<String>),
}

impl Serialize for Expose {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("*"),
            Self::Names(names) => names.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Expose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Star(String),
            Names(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Star(s) if s == "*" => Ok(Self::All),
            Raw::Star(s) => Err(serde::de::Error::custom(format!(
                "expose must be \"*\" or a list of names, got \"{}\"",
                s
            ))),
            Raw::Names(names) => Ok(Self::Names(names)),
        }
    }
}

/// An import statement for the generated scripting module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    pub from: String,
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expose: Option<Expose>,
}

impl ImportSpec {
    /// A bare side-effect import.
    pub fn bare(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            binding: None,
            expose: None,
        }
    }

    pub fn binding(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(name.into());
        self
    }

    pub fn expose_all(mut self) -> Self {
        self.expose = Some(Expose::All);
        self
    }

    pub fn expose<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expose = Some(Expose::Names(names.into_iter().map(Into::into).collect()));
        self
    }
}
