// src/utils/debug_dump.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::section::{Section, SectionMap};
use crate::utils::error::AppError;

/// Wraps every section span found in `text` with `[[name]]` / `[[/name]]` markers.
/// Spans are located by their first occurrence; a span overlapping an earlier
/// one is left unmarked.
pub fn annotate_sections(text: &str, sections: &SectionMap) -> String {
    let mut highlights: Vec<(usize, usize, Section)> = sections
        .iter()
        .filter(|(section, span)| *section != Section::Other && !span.is_empty())
        .filter_map(|(section, span)| text.find(span).map(|start| (start, start + span.len(), section)))
        .collect();
    highlights.sort_by_key(|h| h.0); // Sort by position

    let mut annotated = String::with_capacity(text.len() + highlights.len() * 32);
    let mut last_pos = 0;

    for (start, end, section) in highlights {
        if start < last_pos {
            tracing::debug!("Section '{}' overlaps an earlier span, not marked", section);
            continue;
        }
        annotated.push_str(&text[last_pos..start]);
        annotated.push_str(&format!("[[{}]]", section));
        annotated.push_str(&text[start..end]);
        annotated.push_str(&format!("[[/{}]]", section));
        last_pos = end;
    }

    if last_pos < text.len() {
        annotated.push_str(&text[last_pos..]);
    }
    annotated
}

/// Saves the raw text, the resolved sections and an annotated copy of the text
/// under `debug_dir` for inspecting segmentation on a real document.
pub fn write_debug_dump(debug_dir: &Path, text: &str, sections: &SectionMap) -> Result<PathBuf, AppError> {
    fs::create_dir_all(debug_dir)?;

    fs::write(debug_dir.join("raw_text.txt"), text)?;

    let sections_json = serde_json::to_string_pretty(sections)
        .map_err(|e| AppError::Processing(format!("Failed to serialize sections: {}", e)))?;
    fs::write(debug_dir.join("sections.json"), sections_json)?;

    let annotated_path = debug_dir.join("annotated.txt");
    fs::write(&annotated_path, annotate_sections(text, sections))?;

    tracing::info!("Saved debug dump to {}", debug_dir.display());
    Ok(annotated_path)
}
