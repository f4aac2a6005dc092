/// JavaScript collation — assembles the generated ES module.
///
/// The module has, in order: a header comment, the workbook's imports, a
/// load-time log line, an exported `Program` factory holding every hoisted
/// definition and a dispatch table of scene functions, and an exported
/// `mount` that creates a fresh store and returns a scene dispatcher.
use thiserror::Error;

use crate::core::collate::CollateError;
use crate::core::extract::{ExtractedFragment, WorkbookSource};
use crate::schema::artifact::Artifact;
use crate::schema::classification::Mode;
use crate::schema::language::Language;
use crate::schema::workbook::{Expose, ImportSpec};

pub const MODULE_FILE: &str = "module.js";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("import source cannot be quoted: {0:?}")]
    UnquotableSource(String),
    #[error("default binding is blank or spans lines: {0:?}")]
    InvalidBinding(String),
    #[error("exposed name is blank or spans lines: {0:?}")]
    InvalidExposedName(String),
    #[error("import from '{0}' exposes an empty list, which is neither a named nor a bare import")]
    EmptyExposeList(String),
}

/// Runtime appended to every module. `connectStore` walks a key path from
/// the store root; `mount` returns a 1-based scene dispatcher that also
/// carries `connectStore` for the host.
const MOUNT_RUNTIME: &str = r#"export function mount (mountpoint, initial) {
  const Store = {
    root: Object.assign({}, initial),
  };
  const connectStore = (path = ["root"]) => {
    let root = Store;
    path.forEach((key) => {
      if (root === null || typeof root !== "object" || !Object.prototype.hasOwnProperty.call(root, key)) {
        throw new Error(`connectStore: no entry "${key}" in path ${JSON.stringify(path)}`);
      }
      root = root[key];
    });
    return ({
      root,
      get: (key) => root[key],
      set: (key, value) => { root[key] = value },
      keys: () => Object.keys(root),
    });
  };
  const program = Program({connectStore});
  const dispatch = (n, container) => {
    const scene = program[n - 1];
    if (typeof scene !== "function") {
      throw new RangeError(`scene ${n} is out of range`);
    }
    scene.call(container);
  };
  dispatch.connectStore = connectStore;
  return dispatch;
}
"#;

/// Collate all JavaScript fragments into `module.js`.
pub fn collate(source: &dyn WorkbookSource) -> Result<Vec<Artifact>, CollateError> {
    let module_name = source.module_name();
    let extraction = source.extract(Language::Js);

    let mut imports = Vec::with_capacity(source.imports().len());
    for (index, spec) in source.imports().iter().enumerate() {
        match render_import(spec) {
            Ok(line) => imports.push(line),
            Err(e) => {
                log::warn!("rejecting import #{} from {:?}: {}", index, spec.from, e);
                return Err(CollateError::Import { index, source: e });
            }
        }
    }

    let scenes = extraction.scenes_grouped();
    let code = assemble_module(module_name, &imports, &extraction.definitions, &scenes);

    log::debug!(
        "collated js module {:?}: {} imports, {} definitions, {} scenes",
        module_name,
        imports.len(),
        extraction.definitions.len(),
        scenes.len()
    );
    Ok(vec![
        Artifact::new(MODULE_FILE, Language::Js, Mode::Define, code).for_module(module_name),
    ])
}

/// Render one import statement.
///
/// - `expose: "*"` → `import [as, ]* from 'from'`
/// - `expose: [..]` → `import [as, ]{ a, b } from 'from'`
/// - `as` only → `import as from 'from'`
/// - neither → `import 'from'`
pub fn render_import(spec: &ImportSpec) -> Result<String, ImportError> {
    validate_import(spec)?;

    let line = match (&spec.expose, &spec.binding) {
        (Some(expose), binding) => {
            let list = match expose {
                Expose::All => "*".to_string(),
                Expose::Names(names) => format!("{{ {} }}", names.join(", ")),
            };
            let default = binding
                .as_ref()
                .map(|b| format!("{}, ", b))
                .unwrap_or_default();
            format!("import {}{} from '{}'", default, list, spec.from)
        }
        (None, Some(binding)) => format!("import {} from '{}'", binding, spec.from),
        (None, None) => format!("import '{}'", spec.from),
    };
    Ok(line)
}

/// Only rejects what cannot be written as one import line. Names are passed
/// through as written, so `"a as b"` renames and non-ASCII identifiers work.
fn validate_import(spec: &ImportSpec) -> Result<(), ImportError> {
    if spec.from.contains(['\'', '\\', '\n', '\r']) {
        return Err(ImportError::UnquotableSource(spec.from.clone()));
    }
    if let Some(binding) = &spec.binding {
        if !is_single_token(binding) {
            return Err(ImportError::InvalidBinding(binding.clone()));
        }
    }
    if let Some(Expose::Names(names)) = &spec.expose {
        if names.is_empty() {
            return Err(ImportError::EmptyExposeList(spec.from.clone()));
        }
        if let Some(bad) = names.iter().find(|n| !is_single_token(n)) {
            return Err(ImportError::InvalidExposedName(bad.clone()));
        }
    }
    Ok(())
}

fn is_single_token(text: &str) -> bool {
    !text.trim().is_empty() && !text.contains(['\n', '\r'])
}

fn assemble_module(
    module_name: &str,
    imports: &[String],
    definitions: &[ExtractedFragment],
    scenes: &[(usize, Vec<&ExtractedFragment>)],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("// module {} (ES6)\n", single_line(module_name)));
    for line in imports {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!(
        "console.log('Loading module \"{}\"')\n",
        escape_single_quoted(module_name)
    ));

    out.push_str("export function Program ({connectStore, initializeStore}) {\n");
    for definition in definitions {
        out.push_str(&format!(
            "// JS definition from scene {}\n{}\n",
            definition.scene_number(),
            definition.code
        ));
    }
    let entries: Vec<String> = scenes
        .iter()
        .map(|(index, fragments)| scene_entry(*index, fragments))
        .collect();
    out.push_str("return ({\n");
    out.push_str(&entries.join(",\n"));
    if !entries.is_empty() {
        out.push('\n');
    }
    out.push_str("})\n}\n");

    out.push_str(MOUNT_RUNTIME);
    out
}

/// One dispatch-table entry, keyed by the 0-based scene index as a string.
fn scene_entry(index: usize, fragments: &[&ExtractedFragment]) -> String {
    let body = fragments
        .iter()
        .map(|f| f.code.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "// JS scene {}\n\"{}\": function () {{\n{}\n}}",
        index + 1,
        index,
        body
    )
}

fn single_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

fn escape_single_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
