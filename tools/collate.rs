/// Collate — compile a workbook file into its web artifacts.
///
/// Usage: collate <workbook.ron|workbook.json> [--out <dir>] [--language <tag>]
///
/// Fragments without a stored classification are classified first. With
/// `--out`, artifacts are written to files named after them; otherwise
/// they are printed to stdout with a header line each.

use std::path::{Path, PathBuf};
use std::process;

use workbook_web::core::registry::Registry;
use workbook_web::schema::artifact::Artifact;
use workbook_web::schema::workbook::{Workbook, WorkbookError};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let input = PathBuf::from(&args[1]);
    let mut out_dir = None;
    let mut language = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--out" if i + 1 < args.len() => {
                i += 1;
                out_dir = Some(PathBuf::from(&args[i]));
            }
            "--language" if i + 1 < args.len() => {
                i += 1;
                language = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut workbook = match load_workbook(&input) {
        Ok(wb) => wb,
        Err(e) => {
            eprintln!("ERROR: Failed to load workbook {}: {}", input.display(), e);
            process::exit(1);
        }
    };

    let registry = Registry::standard();
    let classified = registry.classify_workbook(&mut workbook);
    log::info!(
        "loaded {} scenes from {} ({} fragments classified)",
        workbook.scenes.len(),
        input.display(),
        classified
    );

    let result = match language {
        Some(ref tag) => match registry.get_by_tag(tag) {
            Ok(plugin) => plugin.collate(&workbook),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(1);
            }
        },
        None => registry.collate_all(&workbook),
    };

    let artifacts = match result {
        Ok(artifacts) => artifacts,
        Err(e) => {
            eprintln!("ERROR: Collation failed: {}", e);
            process::exit(1);
        }
    };

    match out_dir {
        Some(dir) => {
            if let Err(e) = write_artifacts(&dir, &artifacts) {
                eprintln!("ERROR: Failed to write artifacts to {}: {}", dir.display(), e);
                process::exit(1);
            }
            println!("Wrote {} artifacts to {}", artifacts.len(), dir.display());
        }
        None => print_artifacts(&artifacts),
    }
}

fn load_workbook(path: &Path) -> Result<Workbook, WorkbookError> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let contents = std::fs::read_to_string(path)?;
        Workbook::parse_json(&contents)
    } else {
        Workbook::load_from_ron(path)
    }
}

fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for artifact in artifacts {
        let path = dir.join(&artifact.name);
        std::fs::write(&path, &artifact.code)?;
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

fn print_artifacts(artifacts: &[Artifact]) {
    for artifact in artifacts {
        let scene = artifact
            .scene
            .map(|n| format!(", scene {}", n))
            .unwrap_or_default();
        println!(
            "=== {} ({}, {:?}{}) ===",
            artifact.name, artifact.language, artifact.mode, scene
        );
        println!("{}", artifact.code);
        println!();
    }
}

fn print_usage() {
    println!("Usage: collate <workbook.ron|workbook.json> [--out <dir>] [--language <tag>]");
    println!();
    println!("Languages: html, css, svg, js (default: all)");
    println!("Set RUST_LOG=debug for collation details.");
}
