//! Headword, reading and gloss extraction from a single Kaikki record.

use kaikki_types::{CANONICAL_TAG, ROMANIZATION_TAG, SourceRecord, Translation};

/// How the reading column is derived for a source language.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadingStrategy {
    /// Reading is the headword itself.
    Identity,
    /// First form tagged only `romanization`, falling back to the headword.
    Romanization,
}

impl ReadingStrategy {
    pub fn for_language(source_iso: &str) -> Self {
        match source_iso {
            "fa" => ReadingStrategy::Romanization,
            _ => ReadingStrategy::Identity,
        }
    }

    pub fn reading<'r>(self, word: &'r str, record: &'r SourceRecord) -> &'r str {
        match self {
            ReadingStrategy::Identity => word,
            ReadingStrategy::Romanization => romanization(record).unwrap_or(word),
        }
    }
}

/// Borrowed fields pulled out of one record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Extraction<'r> {
    pub word: &'r str,
    pub reading: &'r str,
    /// Target-language glosses in sense order, duplicates kept.
    pub glosses: Vec<&'r str>,
}

#[derive(Clone, Debug)]
pub struct Extractor {
    target_iso: String,
    reading: ReadingStrategy,
}

impl Extractor {
    pub fn new(target_iso: impl Into<String>, reading: ReadingStrategy) -> Self {
        Self {
            target_iso: target_iso.into(),
            reading,
        }
    }

    /// Returns `None` when the record has no headword or no glosses in the
    /// target language.
    pub fn extract<'r>(&self, record: &'r SourceRecord) -> Option<Extraction<'r>> {
        let word = canonical_form(record)?;
        let glosses = self.glosses(record);
        if glosses.is_empty() {
            return None;
        }
        Some(Extraction {
            word,
            reading: self.reading.reading(word, record),
            glosses,
        })
    }

    pub fn glosses<'r>(&self, record: &'r SourceRecord) -> Vec<&'r str> {
        record
            .senses
            .iter()
            .flatten()
            .flat_map(|sense| sense.translations.iter())
            .filter(|t| t.is_for(&self.target_iso))
            .filter_map(Translation::gloss)
            .collect()
    }
}

/// Form tagged `canonical`, otherwise the record's `word`.
pub fn canonical_form(record: &SourceRecord) -> Option<&str> {
    let word = record.word.as_deref();
    let Some(forms) = record.forms.as_deref() else {
        return word;
    };
    forms
        .iter()
        .find(|f| f.has_tag(CANONICAL_TAG))
        .map(|f| f.form.as_str())
        .or(word)
}

fn romanization(record: &SourceRecord) -> Option<&str> {
    record
        .forms
        .as_deref()?
        .iter()
        .find(|f| f.has_only_tag(ROMANIZATION_TAG) && !f.form.is_empty())
        .map(|f| f.form.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> SourceRecord {
        serde_json::from_str(json).expect("valid record")
    }

    #[test]
    fn canonical_form_overrides_word() {
        let rec = record(
            r#"{"word":"kitab","forms":[{"form":"kitaby","tags":["plural"]},{"form":"kitāb","tags":["canonical"]},{"form":"other","tags":["canonical"]}]}"#,
        );
        assert_eq!(canonical_form(&rec), Some("kitāb"));
    }

    #[test]
    fn canonical_form_falls_back_to_word() {
        assert_eq!(canonical_form(&record(r#"{"word":"gato"}"#)), Some("gato"));
        let rec = record(r#"{"word":"gato","forms":[{"form":"gatos","tags":["plural"]}]}"#);
        assert_eq!(canonical_form(&rec), Some("gato"));
        assert_eq!(canonical_form(&record("{}")), None);
    }

    #[test]
    fn romanized_reading_requires_single_tag_and_text() {
        let rec = record(
            r#"{"word":"کتاب","forms":[{"form":"","tags":["romanization"]},{"form":"kitab","tags":["romanization","archaic"]},{"form":"ketāb","tags":["romanization"]}]}"#,
        );
        assert_eq!(ReadingStrategy::Romanization.reading("کتاب", &rec), "ketāb");
        assert_eq!(ReadingStrategy::Identity.reading("کتاب", &rec), "کتاب");

        let bare = record(r#"{"word":"کتاب"}"#);
        assert_eq!(ReadingStrategy::Romanization.reading("کتاب", &bare), "کتاب");
    }

    #[test]
    fn strategy_is_chosen_by_source_language() {
        assert_eq!(ReadingStrategy::for_language("fa"), ReadingStrategy::Romanization);
        assert_eq!(ReadingStrategy::for_language("es"), ReadingStrategy::Identity);
    }

    #[test]
    fn collects_target_glosses_in_order() {
        let rec = record(
            r#"{"word":"gato","senses":[
                {"translations":[{"code":"en","word":"cat"},{"code":"de","word":"Katze"},{"code":"en","note":"tomcat"}]},
                {"form_of":[{"word":"gata"}]},
                {"translations":[{"code":"en","word":""},{"code":"en"},{"code":"en","word":"cat"}]}
            ]}"#,
        );
        let extractor = Extractor::new("en", ReadingStrategy::Identity);
        let extraction = extractor.extract(&rec).expect("usable record");
        assert_eq!(extraction.word, "gato");
        assert_eq!(extraction.reading, "gato");
        assert_eq!(extraction.glosses, vec!["cat", "tomcat", "cat"]);
    }

    #[test]
    fn records_without_target_glosses_are_unusable() {
        let extractor = Extractor::new("en", ReadingStrategy::Identity);
        let other_language =
            record(r#"{"word":"gato","senses":[{"translations":[{"code":"fr","word":"chat"}]}]}"#);
        assert_eq!(extractor.extract(&other_language), None);
        assert_eq!(extractor.extract(&record(r#"{"word":"gato"}"#)), None);
    }
}
