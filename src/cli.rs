//! CLI front door.
//!
//! Provides the command helpers behind the `doctag` binary:
//! - `scan` - report tag occurrences in a text buffer
//! - `annotate` - run the Python docstring annotator over an outline
//! - `quote` - build a double-quoted string literal
//!
//! All functions return `Result<T, DoctagError>`; `main.rs` turns errors into
//! JSON error responses and exit codes.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use doctag_core::config::ResolvedConfig;
use doctag_core::error::{DoctagError, ScanError};
use doctag_core::literal::{LiteralValueBuilder, SourceText};
use doctag_core::output::{HighlightInfo, HighlightResponse};
use doctag_core::{Boundary, DocStringFormat, Highlight, StyleTag, TagIter, TagSet};
use doctag_python::model::File;
use doctag_python::DocStringAnnotator;

/// Read a UTF-8 input file.
pub fn read_input(path: &Path) -> Result<String, DoctagError> {
    fs::read_to_string(path).map_err(|e| DoctagError::from_io(path.display().to_string(), e))
}

/// Pick the tag set to scan with.
///
/// Explicit `custom` tags win over the format's table. Returns `None` when
/// neither yields tags, in which case scanning is skipped.
pub fn select_tags(format: DocStringFormat, custom: &[String], word_end: bool) -> Option<TagSet> {
    if custom.is_empty() {
        return format.tags();
    }
    let boundary = if word_end {
        Boundary::WordEnd
    } else {
        Boundary::Any
    };
    Some(TagSet::new(custom.iter().cloned()).with_boundary(boundary))
}

/// Scan `text` from `start` and report every tag, shifted by `base_offset`.
pub fn run_scan(
    text: &str,
    tags: Option<&TagSet>,
    start: usize,
    base_offset: usize,
) -> Result<Vec<HighlightInfo>, DoctagError> {
    let Some(tags) = tags else {
        info!("no tags for this format, skipping scan");
        return Ok(Vec::new());
    };

    let highlights = TagIter::new(text, start, tags)?
        .map(|range| -> Result<HighlightInfo, ScanError> {
            let highlight = Highlight {
                range: range.shift_right(base_offset)?,
                style: StyleTag::DocCommentTag,
            };
            Ok(HighlightInfo::new(&highlight).with_source(text, base_offset))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = highlights.len(), "scan complete");
    Ok(highlights)
}

/// Execute `scan` on a file.
pub fn scan_file(
    path: &Path,
    config: &ResolvedConfig,
    custom_tags: &[String],
    word_end: bool,
    start: usize,
) -> Result<HighlightResponse, DoctagError> {
    let text = read_input(path)?;
    let format = config.format.value;
    let tags = select_tags(format, custom_tags, word_end);
    let highlights = run_scan(&text, tags.as_ref(), start, config.base_offset.value)?;

    let (format_name, source) = if custom_tags.is_empty() {
        (format.name(), config.format.source.name())
    } else {
        ("custom", "cli")
    };
    Ok(HighlightResponse::new(format_name, source, highlights))
}

/// Run the annotator over a JSON outline.
pub fn run_annotate(outline_json: &str, config: &ResolvedConfig) -> Result<HighlightResponse, DoctagError> {
    let file: File = serde_json::from_str(outline_json)?;
    let annotator = DocStringAnnotator::for_file(&file, config.format.value);

    let mut sink: Vec<Highlight> = Vec::new();
    annotator.annotate_file(&file, &mut sink)?;
    debug!(count = sink.len(), format = %annotator.format(), "annotation complete");

    let source = if file.format.is_some() {
        "file"
    } else {
        config.format.source.name()
    };
    let highlights = sink.iter().map(HighlightInfo::new).collect();
    Ok(HighlightResponse::new(annotator.format().name(), source, highlights))
}

/// Execute `annotate` on an outline file.
pub fn annotate_outline(path: &Path, config: &ResolvedConfig) -> Result<HighlightResponse, DoctagError> {
    let json = read_input(path)?;
    run_annotate(&json, config)
}

/// Build the double-quoted literal for `value`.
pub fn run_quote(value: &str) -> String {
    match LiteralValueBuilder::new(SourceText).create_literal_value(value) {
        Ok(literal) => literal,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctag_core::config::{CliOverrides, ConfigSource, ConfigValue};

    fn config(format: DocStringFormat) -> ResolvedConfig {
        ResolvedConfig {
            format: ConfigValue::new(format, ConfigSource::CliFlag),
            ..ResolvedConfig::default()
        }
    }

    #[test]
    fn select_tags_prefers_custom() {
        let custom = vec!["TODO".to_string()];
        let tags = select_tags(DocStringFormat::Rest, &custom, false).unwrap();
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["TODO"]);
        assert_eq!(tags.boundary(), Boundary::Any);
        assert!(select_tags(DocStringFormat::Plain, &[], true).is_none());
    }

    #[test]
    fn run_scan_shifts_and_locates() {
        let text = "Doc.\n:param x: y";
        let tags = DocStringFormat::Rest.tags();
        let highlights = run_scan(text, tags.as_ref(), 0, 100).unwrap();
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].start, 105);
        assert_eq!(highlights[0].end, 111);
        assert_eq!(highlights[0].line, Some(2));
        assert_eq!(highlights[0].text.as_deref(), Some(":param"));
    }

    #[test]
    fn run_scan_rejects_overflowing_base_offset() {
        let tags = DocStringFormat::Epytext.tags();
        let err = run_scan("@param x", tags.as_ref(), 0, usize::MAX).unwrap_err();
        match err {
            DoctagError::InvalidArguments { details, .. } => {
                assert_eq!(details.unwrap()["offset"], 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Nothing to shift, nothing to overflow.
        assert!(run_scan("no tags", tags.as_ref(), 0, usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn run_scan_without_tags_is_empty() {
        assert!(run_scan("@param", None, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn run_scan_rejects_bad_start() {
        let tags = DocStringFormat::Epytext.tags();
        let err = run_scan("abc", tags.as_ref(), 10, 0).unwrap_err();
        assert!(matches!(err, DoctagError::InvalidArguments { .. }));
    }

    #[test]
    fn run_annotate_uses_file_format() {
        let json = r#"{"format": "epytext", "body": [
            {"kind": "expression", "expression": {"kind": "string", "text": "'@see x'", "range": {"start": 0, "end": 8}}}
        ]}"#;
        let response = run_annotate(json, &config(DocStringFormat::Rest)).unwrap();
        assert_eq!(response.format, "epytext");
        assert_eq!(response.format_source, "file");
        assert_eq!(response.highlights.len(), 1);
        assert_eq!(response.highlights[0].start, 1);
    }

    #[test]
    fn run_annotate_rejects_malformed_outline() {
        let err = run_annotate("{\"body\": 3}", &config(DocStringFormat::Rest)).unwrap_err();
        assert!(matches!(err, DoctagError::InvalidArguments { .. }));
    }

    #[test]
    fn run_annotate_rejects_inverted_literal_range() {
        let json = r#"{"body": [
            {"kind": "assignment", "targets": ["__doc__"],
             "value": {"kind": "string", "text": "'abcdefgh'", "range": {"start": 9, "end": 1}}}
        ]}"#;
        let err = run_annotate(json, &config(DocStringFormat::Rest)).unwrap_err();
        assert!(matches!(err, DoctagError::InvalidArguments { .. }));
    }

    #[test]
    fn run_annotate_rejects_literal_length_mismatch() {
        let json = r#"{"body": [
            {"kind": "expression", "expression": {"kind": "string", "text": "'@see x'", "range": {"start": 0, "end": 3}}}
        ]}"#;
        let err = run_annotate(json, &config(DocStringFormat::Epytext)).unwrap_err();
        assert!(err.to_string().contains("text is 8 bytes"), "{err}");
    }

    #[test]
    fn run_annotate_near_end_of_offsets() {
        // The literal fits exactly, so shifted tags fit as well.
        let start = usize::MAX - 8;
        let end = start + 8;
        let json = format!(
            r#"{{"body": [
                {{"kind": "expression", "expression": {{"kind": "string", "text": "'@see x'", "range": {{"start": {start}, "end": {end}}}}}}}
            ]}}"#
        );
        let response = run_annotate(&json, &config(DocStringFormat::Epytext)).unwrap();
        assert_eq!(response.highlights.len(), 1);
        assert_eq!(response.highlights[0].start, start + 1);
        assert_eq!(response.highlights[0].end, start + 5);
    }

    #[test]
    fn run_quote_escapes() {
        assert_eq!(run_quote("a \"b\"\n"), "\"a \\\"b\\\"\\n\"");
    }

    #[test]
    fn default_config_resolves() {
        let config = ResolvedConfig::resolve_with(|_| None, &CliOverrides::default()).unwrap();
        assert_eq!(config.format.value, DocStringFormat::Plain);
    }
}
