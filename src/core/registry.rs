/// Language registry — the (classify, collate) pair for every supported
/// language, and the registration handshake with the host.
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use crate::core::classify;
use crate::core::collate::{ClassifyFn, CollateError, CollateFn};
use crate::core::extract::WorkbookSource;
use crate::core::{graphics, markup, script, styling};
use crate::schema::artifact::Artifact;
use crate::schema::classification::Classification;
use crate::schema::language::Language;
use crate::schema::workbook::{Fragment, Workbook};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("language already registered: {0}")]
    DuplicateLanguage(Language),
    #[error("unknown language tag: {0:?}")]
    UnknownLanguage(String),
    #[error("no plugin registered for language: {0}")]
    NotRegistered(Language),
}

/// Classifier and collator for one language.
#[derive(Debug, Clone, Copy)]
pub struct LanguagePlugin {
    pub language: Language,
    classify: ClassifyFn,
    collate: CollateFn,
}

impl LanguagePlugin {
    pub fn new(language: Language, classify: ClassifyFn, collate: CollateFn) -> Self {
        Self {
            language,
            classify,
            collate,
        }
    }

    pub fn classify(&self, code: &str) -> Classification {
        let verdict = (self.classify)(code);
        log::trace!("classified {} fragment as {:?}", self.language, verdict.mode);
        verdict
    }

    pub fn collate(&self, source: &dyn WorkbookSource) -> Result<Vec<Artifact>, CollateError> {
        (self.collate)(source)
    }
}

/// The host side of registration.
pub trait Capabilities {
    fn provides_language(&mut self, plugin: LanguagePlugin) -> Result<(), RegistryError>;
}

/// Every plugin this crate provides, in registration order.
pub fn build_plugins() -> Vec<LanguagePlugin> {
    vec![
        LanguagePlugin::new(Language::Html, classify::classify_html, markup::collate),
        LanguagePlugin::new(Language::Css, classify::classify_css, styling::collate),
        LanguagePlugin::new(Language::Svg, classify::classify_svg, graphics::collate),
        LanguagePlugin::new(Language::Js, classify::classify_js, script::collate),
    ]
}

/// Offer every plugin to the host, once each, in a fixed order.
pub fn register(capabilities: &mut dyn Capabilities) -> Result<(), RegistryError> {
    for plugin in build_plugins() {
        capabilities.provides_language(plugin)?;
    }
    Ok(())
}

/// Descriptive metadata for the plugin as a whole.
#[derive(Debug, Clone, Serialize)]
pub struct PluginManifest {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub languages: Vec<LanguageInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageInfo {
    pub tag: &'static str,
    pub description: &'static str,
}

pub fn manifest() -> PluginManifest {
    PluginManifest {
        name: "web-standard",
        display_name: "Web (W3C Standard)",
        description: "Standard technologies supported by nearly all browsers",
        languages: build_plugins()
            .iter()
            .map(|p| LanguageInfo {
                tag: p.language.tag(),
                description: p.language.description(),
            })
            .collect(),
    }
}

/// A host-side table from language to plugin. Rejects duplicates.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    plugins: FxHashMap<Language, LanguagePlugin>,
    order: Vec<Language>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every plugin in this crate.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for plugin in build_plugins() {
            // Each language appears once in `build_plugins`.
            registry.plugins.insert(plugin.language, plugin);
            registry.order.push(plugin.language);
        }
        registry
    }

    pub fn get(&self, language: Language) -> Result<&LanguagePlugin, RegistryError> {
        self.plugins
            .get(&language)
            .ok_or(RegistryError::NotRegistered(language))
    }

    pub fn get_by_tag(&self, tag: &str) -> Result<&LanguagePlugin, RegistryError> {
        let language =
            Language::from_tag(tag).ok_or_else(|| RegistryError::UnknownLanguage(tag.to_string()))?;
        self.get(language)
    }

    /// Languages in registration order.
    pub fn languages(&self) -> &[Language] {
        &self.order
    }

    /// Build a fragment and store the registered classifier's verdict on it.
    pub fn classify_fragment(
        &self,
        language: Language,
        code: impl Into<String>,
    ) -> Result<Fragment, RegistryError> {
        let plugin = self.get(language)?;
        let fragment = Fragment::new(language, code);
        let verdict = plugin.classify(&fragment.code);
        Ok(fragment.classified(verdict))
    }

    /// Classify every fragment that has no stored verdict yet. Fragments of
    /// unregistered languages are left alone. Returns how many were classified.
    pub fn classify_workbook(&self, workbook: &mut Workbook) -> usize {
        let mut classified = 0;
        for scene in &mut workbook.scenes {
            for fragment in &mut scene.fragments {
                if fragment.classification.is_some() {
                    continue;
                }
                if let Some(plugin) = self.plugins.get(&fragment.language) {
                    fragment.classification = Some(plugin.classify(&fragment.code));
                    classified += 1;
                }
            }
        }
        log::debug!("classified {} stored fragments", classified);
        classified
    }

    /// Run every registered collator, in registration order.
    pub fn collate_all(&self, source: &dyn WorkbookSource) -> Result<Vec<Artifact>, CollateError> {
        let mut artifacts = Vec::new();
        for language in &self.order {
            if let Some(plugin) = self.plugins.get(language) {
                artifacts.extend(plugin.collate(source)?);
            }
        }
        Ok(artifacts)
    }
}

impl Capabilities for Registry {
    fn provides_language(&mut self, plugin: LanguagePlugin) -> Result<(), RegistryError> {
        if self.plugins.contains_key(&plugin.language) {
            return Err(RegistryError::DuplicateLanguage(plugin.language));
        }
        log::debug!("registered language {}", plugin.language);
        self.plugins.insert(plugin.language, plugin);
        self.order.push(plugin.language);
        Ok(())
    }
}
