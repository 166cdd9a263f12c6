//! Table formatting utilities for CLI output.

use comfy_table::{presets, Cell, Color, ContentArrangement, Table};

/// Coverage data for a single language.
pub struct LanguageCoverage {
    /// Language code (e.g., "de", "fr").
    pub language: String,
    /// Number of source keys with a translation.
    pub translated: usize,
    /// Source keys without a translation, as `namespace:key`.
    pub missing: Vec<String>,
    /// Keys present only in this language.
    pub extra: Vec<String>,
}

impl LanguageCoverage {
    /// Share of source keys translated, in percent.
    pub fn percent(&self, source_count: usize) -> f64 {
        if source_count == 0 {
            100.0
        } else {
            self.translated as f64 * 100.0 / source_count as f64
        }
    }
}

/// Format coverage data as a table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Missing", "Extra"]);

    for lang in coverage {
        let color = if lang.missing.is_empty() {
            Color::Green
        } else {
            Color::Yellow
        };
        table.add_row(vec![
            Cell::new(&lang.language),
            Cell::new(format!(
                "{}/{} ({:.0}%)",
                lang.translated,
                source_count,
                lang.percent(source_count)
            ))
            .fg(color),
            Cell::new(lang.missing.len()),
            Cell::new(lang.extra.len()),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_each_language() {
        let coverage = vec![
            LanguageCoverage {
                language: "de".to_string(),
                translated: 3,
                missing: vec![],
                extra: vec![],
            },
            LanguageCoverage {
                language: "fr".to_string(),
                translated: 1,
                missing: vec!["translation:b".to_string(), "translation:c".to_string()],
                extra: vec!["translation:z".to_string()],
            },
        ];
        let rendered = format_coverage_table(3, &coverage).to_string();
        assert!(rendered.contains("3/3 (100%)"));
        assert!(rendered.contains("1/3 (33%)"));
    }

    #[test]
    fn empty_source_is_fully_covered() {
        let coverage = LanguageCoverage {
            language: "de".to_string(),
            translated: 0,
            missing: vec![],
            extra: vec![],
        };
        assert_eq!(coverage.percent(0), 100.0);
    }
}
