//! WASM bindings for workbook-web — lets an in-browser editor classify
//! fragments and preview collated artifacts.
//!
//! Everything crosses the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use workbook_web::core::registry::{manifest as plugin_manifest, Registry};
use workbook_web::schema::artifact::Artifact;
use workbook_web::schema::classification::Classification;
use workbook_web::schema::workbook::Workbook;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct CollateOutput<'a> {
    language: Option<&'a str>,
    artifacts: &'a [Artifact],
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

fn parse_workbook(workbook_json: &str, registry: &Registry) -> Result<Workbook, JsError> {
    let mut workbook =
        Workbook::parse_json(workbook_json).map_err(|e| JsError::new(&e.to_string()))?;
    registry.classify_workbook(&mut workbook);
    Ok(workbook)
}

fn classify_with(registry: &Registry, language: &str, code: &str) -> Result<Classification, JsError> {
    let plugin = registry
        .get_by_tag(language)
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(plugin.classify(code))
}

// ---------------------------------------------------------------------------
// Exported entry points
// ---------------------------------------------------------------------------

/// Plugin name, description, and languages as JSON.
#[wasm_bindgen]
pub fn manifest() -> Result<String, JsError> {
    to_json(&plugin_manifest())
}

/// Classify one fragment; returns `{"mode": ..., "subtype"?, "definition_name"?}`.
#[wasm_bindgen]
pub fn classify(language: &str, code: &str) -> Result<String, JsError> {
    to_json(&classify_with(&Registry::standard(), language, code)?)
}

/// Collate one language of a JSON workbook.
#[wasm_bindgen]
pub fn collate(language: &str, workbook_json: &str) -> Result<String, JsError> {
    let registry = Registry::standard();
    let plugin = registry
        .get_by_tag(language)
        .map_err(|e| JsError::new(&e.to_string()))?;
    let workbook = parse_workbook(workbook_json, &registry)?;
    let artifacts = plugin
        .collate(&workbook)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_json(&CollateOutput {
        language: Some(plugin.language.tag()),
        artifacts: &artifacts,
    })
}

/// Collate every language of a JSON workbook.
#[wasm_bindgen(js_name = collateAll)]
pub fn collate_all(workbook_json: &str) -> Result<String, JsError> {
    let registry = Registry::standard();
    let workbook = parse_workbook(workbook_json, &registry)?;
    let artifacts = registry
        .collate_all(&workbook)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_json(&CollateOutput {
        language: None,
        artifacts: &artifacts,
    })
}
