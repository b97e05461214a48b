use super::print_json;
use crate::cli::OutputFormat;
use crate::outline::{outline_or_error, parse_swift};
use std::path::Path;

pub fn run(file: &Path, format: OutputFormat) -> Result<(), String> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;

    match format {
        OutputFormat::Json => {
            // JSON consumers want structured nodes, not degraded text,
            // so parse failures surface as real errors here.
            let nodes = parse_swift(&content).map_err(|e| e.to_string())?;
            print_json(&nodes);
        }
        OutputFormat::Text => println!("{}", outline_or_error(&content)),
    }

    Ok(())
}
