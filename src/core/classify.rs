/// Fragment classifiers — decide whether a fragment is hoisted or evaluated.
///
/// These are heuristics, not parsers: each classifier runs a small ordered
/// table of patterns anchored at the start of the fragment (leading
/// whitespace ignored) and looks at nothing past the first match. A
/// multi-statement fragment is classified by its first statement only.
/// Any text that matches nothing is an evaluation; classification never
/// fails.
use regex::Regex;
use std::sync::OnceLock;

use crate::core::collate::ClassifyFn;
use crate::schema::classification::Classification;
use crate::schema::language::Language;

/// HTML container tags whose content is inert and hoisted.
const HTML_DEFINITION_TAGS: &[&str] = &["template"];

/// SVG container tags whose content is only rendered by reference.
const SVG_DEFINITION_TAGS: &[&str] = &["defs", "symbol"];

/// Declaration keyword → definition subtype. `let` and `var` share a category.
const JS_DECLARATIONS: &[(&str, &str)] = &[
    ("function", "function"),
    ("const", "constant"),
    ("let", "variable"),
    ("var", "variable"),
];

/// The built-in classifier for a language.
pub fn classifier_for(language: Language) -> ClassifyFn {
    match language {
        Language::Html => classify_html,
        Language::Css => classify_css,
        Language::Svg => classify_svg,
        Language::Js => classify_js,
    }
}

pub fn classify_html(code: &str) -> Classification {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    match_opening_tag(TABLE.get_or_init(|| tag_table(HTML_DEFINITION_TAGS)), code)
}

pub fn classify_svg(code: &str) -> Classification {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    match_opening_tag(TABLE.get_or_init(|| tag_table(SVG_DEFINITION_TAGS)), code)
}

/// Stylesheets have no scene-local behavior; every fragment is hoisted.
pub fn classify_css(_code: &str) -> Classification {
    Classification::define()
}

pub fn classify_js(code: &str) -> Classification {
    for (re, subtype) in js_table() {
        if let Some(caps) = re.captures(code) {
            return Classification::define_as(*subtype).named(&caps[1]);
        }
    }
    Classification::eval()
}

/// One anchored, case-insensitive opening-tag pattern per tag name. The tag
/// name must end at whitespace, `/` or `>`, so `<templates>` is not a match.
fn tag_table(tags: &[&'static str]) -> Vec<(Regex, &'static str)> {
    tags.iter()
        .map(|tag| {
            let re = Regex::new(&format!(r"(?i)\A\s*<{}(?:[\s/][^>]*)?>", regex::escape(tag)))
                .expect("definition tag regex must compile");
            (re, *tag)
        })
        .collect()
}

fn match_opening_tag(table: &[(Regex, &'static str)], code: &str) -> Classification {
    table
        .iter()
        .find(|(re, _)| re.is_match(code))
        .map(|(_, tag)| Classification::define_as(*tag))
        .unwrap_or_default()
}

fn js_table() -> &'static [(Regex, &'static str)] {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        JS_DECLARATIONS
            .iter()
            .map(|(keyword, subtype)| {
                let re = Regex::new(&format!(r"\A\s*{}\s+([\w$]+)", keyword))
                    .expect("declaration regex must compile");
                (re, *subtype)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::classification::Mode;

    #[test]
    fn html_template_is_definition() {
        let c = classify_html("  <template id=\"card\"><div></div></template>");
        assert_eq!(c.mode, Mode::Define);
        assert_eq!(c.subtype.as_deref(), Some("template"));
        assert!(c.definition_name.is_none());
    }

    #[test]
    fn html_tag_match_ignores_case() {
        let c = classify_html("<TEMPLATE>x</TEMPLATE>");
        assert_eq!(c.subtype.as_deref(), Some("template"));
    }

    #[test]
    fn html_other_tags_evaluate() {
        assert_eq!(classify_html("<div><template></template></div>"), Classification::eval());
        assert_eq!(classify_html("<templates>"), Classification::eval());
        assert_eq!(classify_html("text <template>"), Classification::eval());
    }

    #[test]
    fn svg_defs_and_symbol() {
        assert_eq!(classify_svg("<defs>").subtype.as_deref(), Some("defs"));
        assert_eq!(
            classify_svg("\n\t<symbol id=\"dot\" viewBox=\"0 0 2 2\">").subtype.as_deref(),
            Some("symbol")
        );
        assert_eq!(classify_svg("<symbol/>").subtype.as_deref(), Some("symbol"));
        assert_eq!(classify_svg("<circle r=\"1\"/>").mode, Mode::Eval);
    }

    #[test]
    fn css_always_defines() {
        assert_eq!(classify_css("").mode, Mode::Define);
        assert_eq!(classify_css("p { color: red }").mode, Mode::Define);
    }

    #[test]
    fn js_declarations() {
        let cases = [
            ("function draw(ctx) {}", "function", "draw"),
            ("const RADIUS = 4", "constant", "RADIUS"),
            ("  let count = 0", "variable", "count"),
            ("var $el = null", "variable", "$el"),
        ];
        for (code, subtype, name) in cases {
            let c = classify_js(code);
            assert_eq!(c.mode, Mode::Define, "{}", code);
            assert_eq!(c.subtype.as_deref(), Some(subtype), "{}", code);
            assert_eq!(c.definition_name.as_deref(), Some(name), "{}", code);
        }
    }

    #[test]
    fn js_statements_evaluate() {
        for code in ["draw(ctx)", "constant = 1", "letter()", "x = function f() {}", ""] {
            assert_eq!(classify_js(code), Classification::eval(), "{:?}", code);
        }
    }

    #[test]
    fn js_first_statement_decides() {
        let c = classify_js("const a = 1;\ndraw(a);");
        assert_eq!(c.definition_name.as_deref(), Some("a"));
        assert_eq!(classify_js("draw(a);\nconst a = 1;").mode, Mode::Eval);
    }

    #[test]
    fn classifier_for_each_language() {
        assert_eq!(classifier_for(Language::Css)("p {}").mode, Mode::Define);
        assert_eq!(classifier_for(Language::Html)("<template>").mode, Mode::Define);
        assert_eq!(classifier_for(Language::Svg)("<rect/>").mode, Mode::Eval);
        assert_eq!(
            classifier_for(Language::Js)("var k = 1").definition_name.as_deref(),
            Some("k")
        );
    }

    #[test]
    fn empty_and_garbage_input() {
        let classifiers: [fn(&str) -> Classification; 3] = [classify_html, classify_svg, classify_js];
        for classify in classifiers {
            assert_eq!(classify(""), Classification::eval());
            assert_eq!(classify("<<<\u{0}>>>"), Classification::eval());
        }
    }
}
