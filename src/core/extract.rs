/// Extraction — the seam between workbook storage and the collators.
///
/// Collators never walk a workbook directly. They ask a [`WorkbookSource`]
/// for the definitions and scene fragments of one language, each tagged with
/// the 0-based index of the scene it came from. Fragments with no stored
/// verdict are classified on the way out.
use std::collections::{BTreeMap, HashMap};

use crate::core::classify::classifier_for;
use crate::schema::classification::{Classification, Mode};
use crate::schema::language::Language;
use crate::schema::value::Value;
use crate::schema::workbook::{ImportSpec, Workbook};

/// One fragment as handed to a collator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFragment {
    /// 0-based index of the originating scene.
    pub scene: usize,
    pub attrs: HashMap<String, Value>,
    pub code: String,
    pub classification: Classification,
}

impl ExtractedFragment {
    pub fn new(scene: usize, code: impl Into<String>) -> Self {
        Self {
            scene,
            attrs: HashMap::new(),
            code: code.into(),
            classification: Classification::default(),
        }
    }

    /// The 1-based scene number used in output.
    pub fn scene_number(&self) -> usize {
        self.scene + 1
    }
}

/// All fragments of one language, split by mode, in extraction order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub scenes: Vec<ExtractedFragment>,
    pub definitions: Vec<ExtractedFragment>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty() && self.definitions.is_empty()
    }

    /// Scene fragments stably sorted by scene index, so fragments of the
    /// same scene keep their extraction order.
    pub fn scenes_in_order(&self) -> Vec<&ExtractedFragment> {
        let mut ordered: Vec<&ExtractedFragment> = self.scenes.iter().collect();
        ordered.sort_by_key(|f| f.scene);
        ordered
    }

    /// Scene fragments grouped per scene index, ascending.
    pub fn scenes_grouped(&self) -> Vec<(usize, Vec<&ExtractedFragment>)> {
        let mut groups: BTreeMap<usize, Vec<&ExtractedFragment>> = BTreeMap::new();
        for fragment in &self.scenes {
            groups.entry(fragment.scene).or_default().push(fragment);
        }
        groups.into_iter().collect()
    }
}

/// Anything a collator can read a workbook from.
pub trait WorkbookSource {
    fn module_name(&self) -> &str;
    fn imports(&self) -> &[ImportSpec];
    fn extract(&self, language: Language) -> Extraction;
}

impl WorkbookSource for Workbook {
    fn module_name(&self) -> &str {
        &self.module_name
    }

    fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    fn extract(&self, language: Language) -> Extraction {
        let classify = classifier_for(language);
        let mut extraction = Extraction::default();
        for (index, scene) in self.scenes.iter().enumerate() {
            for fragment in scene.fragments.iter().filter(|f| f.language == language) {
                let classification = fragment
                    .classification
                    .clone()
                    .unwrap_or_else(|| classify(&fragment.code));
                let mode = classification.mode;
                let extracted = ExtractedFragment {
                    scene: index,
                    attrs: fragment.attrs.clone(),
                    code: fragment.code.clone(),
                    classification,
                };
                match mode {
                    Mode::Define => extraction.definitions.push(extracted),
                    Mode::Eval => extraction.scenes.push(extracted),
                }
            }
        }
        extraction
    }
}
