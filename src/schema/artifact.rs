use serde::{Deserialize, Serialize};

use super::classification::Mode;
use super::language::Language;

/// A named output document produced by a collator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// File name downstream consumers look for (`templates.html`, `scene-2.svg`, ...).
    pub name: String,
    pub language: Language,
    pub mode: Mode,
    pub code: String,
    /// 1-based scene number, for artifacts that belong to a single scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<usize>,
    /// Module name, for the scripting module artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, language: Language, mode: Mode, code: String) -> Self {
        Self {
            name: name.into(),
            language,
            mode,
            code,
            scene: None,
            module_name: None,
        }
    }

    pub fn for_scene(mut self, scene_number: usize) -> Self {
        self.scene = Some(scene_number);
        self
    }

    pub fn for_module(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = Some(module_name.into());
        self
    }
}
