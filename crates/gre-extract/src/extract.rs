use std::fs;
use std::path::Path;

use colored::Colorize;

use gre_extract_core::answer_key::{parse_answer_key, truncate_at_explanations};
use gre_extract_core::assemble::{build_section, build_test};
use gre_extract_core::explanations::parse_explanations;
use gre_extract_core::format::BookFormat;
use gre_extract_core::model::MockTest;
use gre_extract_core::outline::{section_boundaries, segment_outline, OutlineEntry, TestBoundaries};
use gre_extract_core::ExtractError;
use pdf::{DocumentReader, Pdf};

use crate::prelude::{eprintln, println, *};
use crate::App;

pub fn run(app: App) -> Result<()> {
    fs::create_dir_all(&app.output_dir).wrap_err_with(|| {
        format!(
            "cannot create output directory {}",
            app.output_dir.display()
        )
    })?;

    println!("Opening PDF: {}", app.pdf.display().to_string().cyan());
    let doc =
        Pdf::open(&app.pdf).wrap_err_with(|| format!("cannot open {}", app.pdf.display()))?;

    extract_all(&doc, &app.output_dir)
}

/// Extract every practice test the outline declares, one JSON file per
/// test. Per-test failures are reported and skipped; one malformed test
/// never takes down the batch.
pub fn extract_all(doc: &impl DocumentReader, output_dir: &Path) -> Result<()> {
    println!("Parsing table of contents...");
    let entries: Vec<OutlineEntry> = doc
        .outline()
        .into_iter()
        .map(|e| OutlineEntry::new(e.depth, e.title, e.page))
        .collect();
    let tests = segment_outline(&entries, doc.page_count());
    if tests.is_empty() {
        return Err(eyre!("document outline contains no practice tests"));
    }

    let format = BookFormat::barrons();
    let mut written = 0usize;
    for boundaries in &tests {
        println!();
        println!(
            "Extracting Practice Test {}...",
            boundaries.test_number.to_string().bold()
        );
        match extract_single_test(doc, &format, boundaries) {
            Ok(test) => {
                let path = output_dir.join(format.output_file_name(boundaries.test_number));
                let json = serde_json::to_string_pretty(&test)?;
                fs::write(&path, json)
                    .wrap_err_with(|| format!("cannot write {}", path.display()))?;

                let questions: u32 = test.sections.iter().map(|s| s.question_count).sum();
                println!(
                    "  \u{2192} {} ({} sections, {} questions)",
                    path.display(),
                    test.section_count,
                    questions
                );
                written += 1;
            }
            Err(err) => {
                eprintln!("  {} {err:#}", "skipped:".yellow());
            }
        }
    }

    println!();
    println!("Done! {written} of {} tests extracted.", tests.len());
    Ok(())
}

/// Run the full pipeline for one test: lookup tables first, then one
/// section record per outline boundary.
fn extract_single_test(
    doc: &impl DocumentReader,
    format: &BookFormat,
    boundaries: &TestBoundaries,
) -> Result<MockTest> {
    let test_number = boundaries.test_number;
    let answer_key_page = boundaries
        .answer_key_page
        .ok_or(ExtractError::OutlineIncomplete {
            test: test_number,
            missing: "Answer Key",
        })?;
    let explanation_start = boundaries
        .explanation_start
        .ok_or(ExtractError::OutlineIncomplete {
            test: test_number,
            missing: "Answer Explanations",
        })?;

    // The answer key regularly spills onto the first explanation page, so
    // read through that page and cut at the heading.
    let key_text = doc.read_range(answer_key_page, explanation_start + 1)?;
    let answers = parse_answer_key(truncate_at_explanations(&key_text));

    let explanation_text = doc.read_range(explanation_start, boundaries.explanation_end)?;
    let explanations = parse_explanations(&explanation_text);

    let mut sections = Vec::new();
    for boundary in section_boundaries(boundaries) {
        let raw_text = doc.read_range(boundary.start, boundary.end)?;
        match build_section(
            format,
            test_number,
            &boundary.label,
            &raw_text,
            &answers,
            &explanations,
        ) {
            Ok(section) => sections.push(section),
            Err(err @ ExtractError::SectionLabelUnrecognized(_)) => {
                eprintln!("  {} {err}", "dropping section:".dimmed());
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(build_test(format, test_number, sections))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
