use super::print_json;
use crate::cli::OutputFormat;
use crate::summary::collect_map;
use colored::Colorize;
use std::path::Path;

pub fn run(path: Option<&Path>, format: OutputFormat) -> Result<(), String> {
    let root = path.unwrap_or_else(|| Path::new("."));
    if !root.is_dir() {
        return Err(format!("Not a directory: {}", root.display()));
    }

    let entries = collect_map(root);

    if format == OutputFormat::Json {
        print_json(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No Swift files found under {}", root.display());
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}:", entry.file_path.bold());
        println!("{}", entry.outline);
    }

    Ok(())
}
