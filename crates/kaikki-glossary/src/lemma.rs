use std::collections::HashSet;

use kaikki_pos::{PosTable, SkippedPos};
use kaikki_types::{LemmaRow, SourceRecord};

use crate::extract::Extractor;

/// Turns usable records into term bank rows.
#[derive(Clone, Debug)]
pub struct LemmaAssembler<'a> {
    extractor: Extractor,
    pos_table: &'a PosTable,
}

impl<'a> LemmaAssembler<'a> {
    pub fn new(extractor: Extractor, pos_table: &'a PosTable) -> Self {
        Self {
            extractor,
            pos_table,
        }
    }

    /// Build a row, or `None` when `word`, `pos` or `senses` is missing or no
    /// target-language gloss survives.
    ///
    /// Part-of-speech tags outside the table are kept as-is and counted in `skipped`.
    pub fn assemble(&self, record: &SourceRecord, skipped: &mut SkippedPos) -> Option<LemmaRow> {
        if !has_text(record.word.as_deref()) || record.senses.is_none() {
            return None;
        }
        let pos = record.pos.as_deref().filter(|p| !p.is_empty())?;
        let extraction = self.extractor.extract(record)?;
        if extraction.word.is_empty() {
            return None;
        }

        let pos = self.pos_table.normalize(pos, skipped);
        Some(LemmaRow::new(
            extraction.word,
            extraction.reading,
            pos,
            dedup_glosses(extraction.glosses),
        ))
    }
}

/// Drop repeated glosses, keeping the first occurrence.
pub fn dedup_glosses(glosses: Vec<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(glosses.len());
    for gloss in glosses {
        if seen.insert(gloss) {
            out.push(gloss.to_string());
        }
    }
    out
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ReadingStrategy;

    fn table() -> PosTable {
        PosTable::from_groups([vec!["n", "noun"], vec!["v", "verb"]]).unwrap()
    }

    fn assemble(table: &PosTable, json: &str, skipped: &mut SkippedPos) -> Option<LemmaRow> {
        let record: SourceRecord = serde_json::from_str(json).expect("valid record");
        LemmaAssembler::new(Extractor::new("en", ReadingStrategy::Identity), table)
            .assemble(&record, skipped)
    }

    #[test]
    fn builds_row_with_placeholders() {
        let table = table();
        let mut skipped = SkippedPos::default();
        let row = assemble(
            &table,
            r#"{"word":"gato","pos":"noun","senses":[{"translations":[{"code":"en","word":"cat"}]}]}"#,
            &mut skipped,
        )
        .expect("row");
        assert_eq!(row, LemmaRow::new("gato", "gato", "n", vec!["cat".into()]));
        assert_eq!(row.frequency, 0);
        assert_eq!(row.sequence, 0);
        assert_eq!(row.term_tags, "");
        assert!(skipped.is_empty());
    }

    #[test]
    fn collapses_duplicate_glosses_across_senses() {
        let table = table();
        let mut skipped = SkippedPos::default();
        let row = assemble(
            &table,
            r#"{"word":"correr","pos":"verb","senses":[
                {"translations":[{"code":"en","word":"run"},{"code":"en","word":"race"}]},
                {"translations":[{"code":"en","word":"run"}]}
            ]}"#,
            &mut skipped,
        )
        .expect("row");
        assert_eq!(row.glosses, vec!["run", "race"]);
        assert_eq!(row.pos_primary, "v");
        assert_eq!(row.pos_secondary, "v");
    }

    #[test]
    fn drops_records_missing_required_fields() {
        let table = table();
        let mut skipped = SkippedPos::default();
        let senses = r#"[{"translations":[{"code":"en","word":"cat"}]}]"#;
        for json in [
            format!(r#"{{"pos":"noun","senses":{senses}}}"#),
            format!(r#"{{"word":"","pos":"noun","senses":{senses}}}"#),
            format!(r#"{{"word":"gato","senses":{senses}}}"#),
            format!(r#"{{"word":"gato","pos":"","senses":{senses}}}"#),
            r#"{"word":"gato","pos":"noun"}"#.to_string(),
            r#"{"word":"gato","pos":"noun","senses":[]}"#.to_string(),
            format!(
                r#"{{"word":"gato","pos":"noun","forms":[{{"form":"","tags":["canonical"]}}],"senses":{senses}}}"#
            ),
        ] {
            assert_eq!(assemble(&table, &json, &mut skipped), None, "{json}");
        }
        assert!(skipped.is_empty());
    }

    #[test]
    fn unmapped_pos_is_kept_and_counted() {
        let table = table();
        let mut skipped = SkippedPos::default();
        let row = assemble(
            &table,
            r#"{"word":"ni","pos":"conj","senses":[{"translations":[{"code":"en","word":"nor"}]}]}"#,
            &mut skipped,
        )
        .expect("row");
        assert_eq!(row.pos_primary, "conj");
        assert_eq!(skipped.count("conj"), 1);
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(
            dedup_glosses(vec!["b", "a", "b", "c", "a"]),
            vec!["b".to_string(), "a".into(), "c".into()]
        );
    }
}
