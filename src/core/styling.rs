/// CSS collation — one stylesheet with a provenance comment per fragment.
use crate::core::collate::CollateError;
use crate::core::extract::{ExtractedFragment, WorkbookSource};
use crate::schema::artifact::Artifact;
use crate::schema::classification::Mode;
use crate::schema::language::Language;

pub const STYLES_FILE: &str = "styles.css";

/// Collate all CSS fragments into `styles.css`, in extraction order.
///
/// Always yields exactly one artifact; an empty workbook gives empty code.
/// CSS fragments a host stored as scene content are still styles; they
/// follow the definitions in scene order.
pub fn collate(source: &dyn WorkbookSource) -> Result<Vec<Artifact>, CollateError> {
    let extraction = source.extract(Language::Css);
    if !extraction.scenes.is_empty() {
        log::debug!(
            "appending {} css fragments stored as scene content",
            extraction.scenes.len()
        );
    }

    let code = extraction
        .definitions
        .iter()
        .chain(extraction.scenes_in_order())
        .map(with_provenance)
        .collect::<Vec<_>>()
        .join("\n");

    log::debug!(
        "collated css: {} definitions, {} scene fragments",
        extraction.definitions.len(),
        extraction.scenes.len()
    );
    Ok(vec![Artifact::new(STYLES_FILE, Language::Css, Mode::Define, code)])
}

fn with_provenance(fragment: &ExtractedFragment) -> String {
    format!("/* Kram: CSS in Scene {} */\n{}", fragment.scene_number(), fragment.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::testing::Fixed;
    use crate::core::extract::Extraction;

    #[test]
    fn empty_yields_one_empty_stylesheet() {
        let out = collate(&Fixed(Extraction::default())).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "styles.css");
        assert_eq!(out[0].language, Language::Css);
        assert_eq!(out[0].mode, Mode::Define);
        assert_eq!(out[0].code, "");
    }

    #[test]
    fn provenance_comments_name_scene_numbers() {
        let out = collate(&Fixed(Extraction {
            scenes: vec![],
            definitions: vec![
                ExtractedFragment::new(2, "p { margin: 0 }"),
                ExtractedFragment::new(0, "h1 { color: red }"),
            ],
        }))
        .unwrap();
        assert_eq!(
            out[0].code,
            "/* Kram: CSS in Scene 3 */\np { margin: 0 }\n/* Kram: CSS in Scene 1 */\nh1 { color: red }"
        );
    }

    #[test]
    fn scene_fragments_are_not_dropped() {
        let out = collate(&Fixed(Extraction {
            scenes: vec![ExtractedFragment::new(1, "em { font-style: normal }")],
            definitions: vec![ExtractedFragment::new(0, "p {}")],
        }))
        .unwrap();
        assert_eq!(
            out[0].code,
            "/* Kram: CSS in Scene 1 */\np {}\n/* Kram: CSS in Scene 2 */\nem { font-style: normal }"
        );
    }
}
