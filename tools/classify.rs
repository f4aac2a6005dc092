/// Classify — report how fragments would be stored.
///
/// Usage: classify <language> [file]
///
/// Reads fragment text from `file` (or stdin) and prints the verdict as
/// JSON. Fragments are separated by lines containing only `---`.

use std::io::{self, Read};
use std::process;

use workbook_web::core::registry::Registry;

const SEPARATOR: &str = "---";

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: classify <language> [file]");
        println!("Fragments are separated by lines containing only '{}'.", SEPARATOR);
        return;
    }

    let registry = Registry::standard();
    let plugin = match registry.get_by_tag(&args[1]) {
        Ok(plugin) => *plugin,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let text = match args.get(2) {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    };
    let text = match text {
        Ok(text) => text,
        Err(e) => {
            eprintln!("ERROR: Failed to read input: {}", e);
            process::exit(1);
        }
    };

    let mut defines = 0;
    let fragments = split_fragments(&text);
    for (n, fragment) in fragments.iter().enumerate() {
        let verdict = plugin.classify(fragment);
        if verdict.is_definition() {
            defines += 1;
        }
        match serde_json::to_string(&verdict) {
            Ok(json) => println!("{}: {}", n + 1, json),
            Err(e) => eprintln!("ERROR: {}", e),
        }
    }

    println!(
        "\nSummary: {} fragments, {} definitions, {} evaluations",
        fragments.len(),
        defines,
        fragments.len() - defines
    );
}

fn split_fragments(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim() == SEPARATOR {
            fragments.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        fragments.push(current.join("\n"));
    }
    fragments
}
