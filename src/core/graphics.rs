/// SVG collation — a hidden defs document plus one document per scene.
use crate::core::collate::CollateError;
use crate::core::extract::{ExtractedFragment, WorkbookSource};
use crate::schema::artifact::Artifact;
use crate::schema::classification::Mode;
use crate::schema::language::Language;

pub const DEFS_FILE: &str = "defs.svg";

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// `scene-<n>.svg` for a 1-based scene number.
pub fn scene_file_name(scene_number: usize) -> String {
    format!("scene-{}.svg", scene_number)
}

/// Collate all SVG fragments.
///
/// `defs.svg` is always emitted, even when empty. Each scene with SVG
/// content gets its own standalone document; several fragments in one scene
/// share that document, newline-joined.
pub fn collate(source: &dyn WorkbookSource) -> Result<Vec<Artifact>, CollateError> {
    let extraction = source.extract(Language::Svg);

    let defs = extraction
        .definitions
        .iter()
        .map(|d| d.code.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let mut artifacts = vec![Artifact::new(
        DEFS_FILE,
        Language::Svg,
        Mode::Define,
        format!(
            "<svg xmlns=\"{}\" style=\"display:none;\"><defs>{}</defs></svg>",
            SVG_NS, defs
        ),
    )];

    for (index, fragments) in extraction.scenes_grouped() {
        let number = index + 1;
        artifacts.push(
            Artifact::new(
                scene_file_name(number),
                Language::Svg,
                Mode::Eval,
                scene_document(&fragments),
            )
            .for_scene(number),
        );
    }

    log::debug!(
        "collated svg: {} definitions, {} scene files",
        extraction.definitions.len(),
        artifacts.len() - 1
    );
    Ok(artifacts)
}

fn scene_document(fragments: &[&ExtractedFragment]) -> String {
    let body = fragments
        .iter()
        .map(|f| f.code.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!("<svg xmlns=\"{}\">{}</svg>", SVG_NS, body)
}
