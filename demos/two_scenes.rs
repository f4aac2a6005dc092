/// Two scenes — build a small workbook in code, collate it, and run a
/// matching program against a mounted store.
///
/// Run with: cargo run --example two_scenes

use std::collections::BTreeMap;

use workbook_web::core::registry::Registry;
use workbook_web::runtime::program::Program;
use workbook_web::schema::language::Language;
use workbook_web::schema::value::Value;
use workbook_web::schema::workbook::{ImportSpec, Workbook};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::standard();

    let mut workbook = Workbook::new("counter").with_import(ImportSpec::bare("./ui.js").expose(["render"]));
    workbook
        .add_scene()
        .push(registry.classify_fragment(Language::Html, "<template id=\"tally\"><b></b></template>")?)
        .push(registry.classify_fragment(Language::Css, "b { color: teal; }")?)
        .push(registry.classify_fragment(Language::Js, "const store = connectStore()")?)
        .push(registry.classify_fragment(Language::Js, "store.set('count', 0)")?);
    workbook
        .add_scene()
        .push(registry.classify_fragment(Language::Html, "<p>Counting</p>")?)
        .push(registry.classify_fragment(Language::Svg, "<circle r=\"4\"/>")?)
        .push(registry.classify_fragment(Language::Js, "store.set('count', store.get('count') + 1)")?);

    for artifact in registry.collate_all(&workbook)? {
        println!("=== {} ===\n{}\n", artifact.name, artifact.code);
    }

    // The same two scenes, expressed against the Rust store.
    let program: Program<Vec<String>> = Program::new()
        .scene(|store, out: &mut Vec<String>| {
            store.root_mut()?.set("count", 0i64);
            out.push("scene 1".to_string());
            Ok(())
        })
        .scene(|store, out: &mut Vec<String>| {
            let mut root = store.root_mut()?;
            let count = match root.get("count") {
                Some(Value::Int(n)) => *n,
                _ => 0,
            };
            root.set("count", count + 1);
            out.push(format!("scene 2: count = {}", count + 1));
            Ok(())
        });

    let mut mounted = program.mount(BTreeMap::from([("label".to_string(), Value::from("demo"))]));
    let mut out = Vec::new();
    mounted.dispatch(1, &mut out)?;
    mounted.dispatch(2, &mut out)?;
    for line in out {
        println!("{}", line);
    }
    Ok(())
}
