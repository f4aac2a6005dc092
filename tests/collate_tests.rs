/// Collation integration tests — fixture workbook through every language.

use workbook_web::core::collate::CollateError;
use workbook_web::core::extract::WorkbookSource;
use workbook_web::core::registry::Registry;
use workbook_web::core::script::ImportError;
use workbook_web::core::{graphics, markup, script, styling};
use workbook_web::schema::artifact::Artifact;
use workbook_web::schema::classification::Mode;
use workbook_web::schema::language::Language;
use workbook_web::schema::workbook::{Fragment, ImportSpec, Workbook};

fn fixture() -> Workbook {
    let path = std::path::Path::new("tests/fixtures/workbook.ron");
    let mut wb = Workbook::load_from_ron(path).unwrap();
    Registry::standard().classify_workbook(&mut wb);
    wb
}

fn named<'a>(artifacts: &'a [Artifact], name: &str) -> &'a Artifact {
    artifacts
        .iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| panic!("missing artifact {}", name))
}

#[test]
fn fixture_classifies_every_fragment() {
    let path = std::path::Path::new("tests/fixtures/workbook.ron");
    let mut wb = Workbook::load_from_ron(path).unwrap();
    assert_eq!(Registry::standard().classify_workbook(&mut wb), 13);

    let js = wb.extract(Language::Js);
    let names: Vec<_> = js
        .definitions
        .iter()
        .map(|d| {
            (
                d.classification.subtype.as_deref().unwrap(),
                d.classification.definition_name.as_deref().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        names,
        vec![("constant", "G"), ("variable", "bodies"), ("function", "orbit")]
    );
    assert_eq!(js.scenes.len(), 2);
}

#[test]
fn collate_all_in_registration_order() {
    let artifacts = Registry::standard().collate_all(&fixture()).unwrap();
    let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "templates.html",
            "scenes.html",
            "styles.css",
            "defs.svg",
            "scene-2.svg",
            "scene-3.svg",
            "module.js",
        ]
    );
}

#[test]
fn html_artifacts() {
    let artifacts = markup::collate(&fixture()).unwrap();
    let templates = named(&artifacts, "templates.html");
    assert_eq!(templates.mode, Mode::Define);
    assert_eq!(
        templates.code,
        "<template id=\"planet\"><span class=\"planet\"></span></template>"
    );
    let scenes = named(&artifacts, "scenes.html");
    assert_eq!(scenes.mode, Mode::Eval);
    assert_eq!(
        scenes.code,
        "<kram-scene scene=\"1\"><h1>Orbits</h1></kram-scene>\n<kram-scene scene=\"2\"><p>One planet</p></kram-scene>"
    );
}

#[test]
fn css_artifact() {
    let artifacts = styling::collate(&fixture()).unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(
        artifacts[0].code,
        "/* Kram: CSS in Scene 1 */\n.planet { border-radius: 50%; }\n/* Kram: CSS in Scene 3 */\nh1 { font-weight: 300; }"
    );
}

#[test]
fn svg_artifacts() {
    let artifacts = graphics::collate(&fixture()).unwrap();
    let defs = named(&artifacts, "defs.svg");
    assert!(defs.code.contains("<defs><symbol id=\"sun\"><circle r=\"10\"/></symbol></defs>"));
    assert!(defs.scene.is_none());

    let two = named(&artifacts, "scene-2.svg");
    assert_eq!(two.scene, Some(2));
    assert_eq!(
        two.code,
        "<svg xmlns=\"http://www.w3.org/2000/svg\"><use href=\"#sun\"/></svg>"
    );
    assert_eq!(named(&artifacts, "scene-3.svg").scene, Some(3));
}

#[test]
fn two_svg_scenes_give_two_scene_files() {
    let mut wb = Workbook::new("svg");
    wb.add_scene().push(Fragment::new(Language::Svg, "<rect/>"));
    wb.add_scene().push(Fragment::new(Language::Svg, "<circle/>"));
    let artifacts = graphics::collate(&wb).unwrap();
    let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["defs.svg", "scene-1.svg", "scene-2.svg"]);
    for scene in &artifacts[1..] {
        assert!(scene.code.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\">"));
        assert!(scene.code.ends_with("</svg>"));
    }
}

#[test]
fn js_module() {
    let artifacts = script::collate(&fixture()).unwrap();
    assert_eq!(artifacts.len(), 1);
    let module = &artifacts[0];
    assert_eq!(module.name, "module.js");
    assert_eq!(module.module_name.as_deref(), Some("orbits"));

    let code = &module.code;
    assert!(code.starts_with(
        "// module orbits (ES6)\n\
         import { step, gravity } from './physics.js'\n\
         import d3, * from './vendor/d3.js'\n\
         import './polyfills.js'\n\
         console.log('Loading module \"orbits\"')\n"
    ));
    assert!(code.contains("// JS definition from scene 1\nconst G = 6.674e-11\n"));
    assert!(code.contains("// JS definition from scene 2\nfunction orbit(body)"));
    assert!(code.contains("\"1\": function () {\nbodies.push(orbit({ mass: 1 }))\n}"));
    assert!(code.contains("\"2\": function () {\nbodies.forEach(orbit)\n}"));
    assert!(!code.contains("\"0\":"));
    assert!(code.contains("export function mount (mountpoint, initial)"));
}

#[test]
fn empty_workbook() {
    let wb = Workbook::default();
    assert!(markup::collate(&wb).unwrap().is_empty());

    let svg = graphics::collate(&wb).unwrap();
    assert_eq!(svg.len(), 1);
    assert_eq!(svg[0].name, "defs.svg");

    let css = styling::collate(&wb).unwrap();
    assert_eq!(css.len(), 1);
    assert!(css[0].code.is_empty());

    let js = script::collate(&wb).unwrap();
    assert_eq!(js.len(), 1);
    assert!(js[0].code.contains("return ({\n})"));
}

#[test]
fn collation_is_idempotent() {
    let wb = fixture();
    let registry = Registry::standard();
    let first = registry.collate_all(&wb).unwrap();
    let second = registry.collate_all(&wb).unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_import_is_a_collation_error() {
    let wb = Workbook::new("bad")
        .with_import(ImportSpec::bare("./ok.js"))
        .with_import(ImportSpec::bare("./lib.js").expose(Vec::<String>::new()));
    let err = script::collate(&wb).unwrap_err();
    match err {
        CollateError::Import { index, source } => {
            assert_eq!(index, 1);
            assert_eq!(source, ImportError::EmptyExposeList("./lib.js".to_string()));
        }
    }
    assert!(Registry::standard().collate_all(&wb).is_err());
}

#[test]
fn unclassified_fragments_collate_by_their_language_rules() {
    let mut wb = Workbook::new("raw");
    wb.add_scene()
        .push(Fragment::new(Language::Css, "p { color: red }"))
        .push(Fragment::new(Language::Html, "<template id=\"t\"></template>"))
        .push(Fragment::new(Language::Html, "<p>hello</p>"))
        .push(Fragment::new(Language::Js, "const n = 1"));

    let artifacts = Registry::standard().collate_all(&wb).unwrap();
    assert_eq!(
        named(&artifacts, "styles.css").code,
        "/* Kram: CSS in Scene 1 */\np { color: red }"
    );
    assert_eq!(named(&artifacts, "templates.html").code, "<template id=\"t\"></template>");
    assert_eq!(
        named(&artifacts, "scenes.html").code,
        "<kram-scene scene=\"1\"><p>hello</p></kram-scene>"
    );
    let module = &named(&artifacts, "module.js").code;
    assert!(module.contains("// JS definition from scene 1\nconst n = 1\n"));
    assert!(module.contains("return ({\n})"));
}

#[test]
fn renamed_imports_reach_the_module() {
    let wb = Workbook::new("renames")
        .with_import(ImportSpec::bare("./geometry.js").expose(["vec as v", "dot"]))
        .with_import(ImportSpec::bare("./greek.js").binding("π"));
    let module = &script::collate(&wb).unwrap()[0].code;
    assert!(module.contains("import { vec as v, dot } from './geometry.js'\n"));
    assert!(module.contains("import π from './greek.js'\n"));
}
