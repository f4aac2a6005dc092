/// HTML collation — hoisted templates and scene-tagged markup.
use crate::core::extract::{ExtractedFragment, WorkbookSource};
use crate::core::collate::CollateError;
use crate::schema::artifact::Artifact;
use crate::schema::classification::Mode;
use crate::schema::language::Language;

pub const TEMPLATES_FILE: &str = "templates.html";
pub const SCENES_FILE: &str = "scenes.html";

/// Custom element the host page uses to show and hide scenes.
pub const SCENE_ELEMENT: &str = "kram-scene";

/// Collate all HTML fragments.
///
/// Emits `templates.html` when there are definitions and `scenes.html`
/// when there are scene fragments; an empty workbook yields nothing.
pub fn collate(source: &dyn WorkbookSource) -> Result<Vec<Artifact>, CollateError> {
    let extraction = source.extract(Language::Html);
    let mut artifacts = Vec::new();

    if !extraction.definitions.is_empty() {
        let code = extraction
            .definitions
            .iter()
            .map(|d| d.code.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        artifacts.push(Artifact::new(TEMPLATES_FILE, Language::Html, Mode::Define, code));
    }

    if !extraction.scenes.is_empty() {
        let code = extraction
            .scenes_in_order()
            .into_iter()
            .map(wrap_scene)
            .collect::<Vec<_>>()
            .join("\n");
        artifacts.push(Artifact::new(SCENES_FILE, Language::Html, Mode::Eval, code));
    }

    log::debug!(
        "collated html: {} definitions, {} scene fragments, {} artifacts",
        extraction.definitions.len(),
        extraction.scenes.len(),
        artifacts.len()
    );
    Ok(artifacts)
}

fn wrap_scene(fragment: &ExtractedFragment) -> String {
    format!(
        "<{el} scene=\"{n}\">{code}</{el}>",
        el = SCENE_ELEMENT,
        n = fragment.scene_number(),
        code = fragment.code
    )
}
