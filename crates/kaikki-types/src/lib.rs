//! Shared types that mirror Kaikki's Wiktionary extract and the Yomitan
//! dictionary format.
//!
//! Input side: [`SourceRecord`] is one parsed JSONL line. Every field the
//! glossary builder reads is optional so presence checks stay explicit;
//! unknown keys are ignored.
//!
//! Output side: [`LemmaRow`] serializes as the fixed 8-element term bank tuple
//! and [`IndexDescriptor`] is the `index.json` manifest.
//!
//! ```rust
//! use kaikki_types::{LemmaRow, SourceRecord};
//!
//! let record: SourceRecord = serde_json::from_str(r#"{"word":"gato","pos":"noun"}"#).unwrap();
//! assert_eq!(record.word.as_deref(), Some("gato"));
//! assert!(record.senses.is_none());
//!
//! let row = LemmaRow::new("gato", "gato", "n", vec!["cat".into()]);
//! let json = serde_json::to_string(&row).unwrap();
//! assert_eq!(json, r#"["gato","gato","n","n",0,["cat"],0,""]"#);
//! ```

use serde::de::IgnoredAny;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tag marking the preferred spelling of a headword in `forms`.
pub const CANONICAL_TAG: &str = "canonical";
/// Tag marking a transliteration in `forms`.
pub const ROMANIZATION_TAG: &str = "romanization";

/// One word-sense record from a Kaikki JSONL extract.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SourceRecord {
    pub word: Option<String>,
    pub pos: Option<String>,
    pub senses: Option<Vec<Sense>>,
    pub forms: Option<Vec<Form>>,
}

/// Alternative written form of a headword along with its tags.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Form {
    #[serde(default, deserialize_with = "null_as_default")]
    pub form: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Form {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when `tag` is the one and only tag on this form.
    pub fn has_only_tag(&self, tag: &str) -> bool {
        self.tags.len() == 1 && self.tags[0] == tag
    }
}

/// A single sense and the translations attached to it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Sense {
    #[serde(default, deserialize_with = "null_as_default")]
    pub translations: Vec<Translation>,
    /// Present when the sense is an inflection of another headword.
    ///
    /// Only presence is kept; the glossary does not use it yet.
    #[serde(default)]
    pub form_of: Option<IgnoredAny>,
}

impl Sense {
    pub fn is_form_of(&self) -> bool {
        self.form_of.is_some()
    }
}

/// Translation of a sense into another language.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Translation {
    pub code: Option<String>,
    pub word: Option<String>,
    pub note: Option<String>,
}

impl Translation {
    /// Gloss text: `word` when non-empty, otherwise a non-empty `note`.
    pub fn gloss(&self) -> Option<&str> {
        non_empty(self.word.as_deref()).or_else(|| non_empty(self.note.as_deref()))
    }

    pub fn is_for(&self, iso: &str) -> bool {
        self.code.as_deref() == Some(iso)
    }
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

/// One term bank entry.
///
/// Serialized as `[term, reading, pos, pos, frequency, glosses, sequence, term_tags]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LemmaRow {
    pub term: String,
    pub reading: String,
    pub pos_primary: String,
    pub pos_secondary: String,
    pub frequency: i64,
    pub glosses: Vec<String>,
    pub sequence: i64,
    pub term_tags: String,
}

impl LemmaRow {
    /// Row with both part-of-speech slots set to `pos` and the placeholder
    /// frequency, sequence and term tags.
    pub fn new(
        term: impl Into<String>,
        reading: impl Into<String>,
        pos: impl Into<String>,
        glosses: Vec<String>,
    ) -> Self {
        let pos = pos.into();
        Self {
            term: term.into(),
            reading: reading.into(),
            pos_primary: pos.clone(),
            pos_secondary: pos,
            frequency: 0,
            glosses,
            sequence: 0,
            term_tags: String::new(),
        }
    }
}

impl Serialize for LemmaRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(8)?;
        tuple.serialize_element(&self.term)?;
        tuple.serialize_element(&self.reading)?;
        tuple.serialize_element(&self.pos_primary)?;
        tuple.serialize_element(&self.pos_secondary)?;
        tuple.serialize_element(&self.frequency)?;
        tuple.serialize_element(&self.glosses)?;
        tuple.serialize_element(&self.sequence)?;
        tuple.serialize_element(&self.term_tags)?;
        tuple.end()
    }
}

pub const INDEX_FORMAT: u8 = 3;
pub const INDEX_AUTHOR: &str = "Kaikki-to-Yomitan contributors";
pub const INDEX_URL: &str = "https://github.com/themoeway/kaikki-to-yomitan";
pub const INDEX_DESCRIPTION: &str = "Dictionaries for various language pairs generated from Wiktionary data, via Kaikki and Kaikki-to-Yomitan.";
pub const INDEX_ATTRIBUTION: &str = "https://kaikki.org/";

/// Contents of a dictionary's `index.json`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDescriptor {
    pub title: String,
    pub format: u8,
    pub revision: String,
    pub sequenced: bool,
    pub author: String,
    pub url: String,
    pub description: String,
    pub attribution: String,
    pub source_language: String,
    pub target_language: String,
}

impl IndexDescriptor {
    /// Descriptor for a `kty-<source>-<target>-gloss` dictionary.
    pub fn gloss(source_iso: &str, target_iso: &str, revision: impl Into<String>) -> Self {
        Self {
            title: format!("kty-{source_iso}-{target_iso}-gloss"),
            format: INDEX_FORMAT,
            revision: revision.into(),
            sequenced: true,
            author: INDEX_AUTHOR.to_string(),
            url: INDEX_URL.to_string(),
            description: INDEX_DESCRIPTION.to_string(),
            attribution: INDEX_ATTRIBUTION.to_string(),
            source_language: source_iso.to_string(),
            target_language: target_iso.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_records() {
        let record: SourceRecord = serde_json::from_str(
            r#"{"word":"ketab","lang":"Persian","forms":[{"form":"ketāb","tags":["romanization"]},{"form":"x"}],
                "senses":[{"form_of":[{"word":"kotob"}]},{"translations":[{"code":"en","note":"book"}]}]}"#,
        )
        .unwrap();
        assert!(record.pos.is_none());

        let forms = record.forms.unwrap();
        assert!(forms[0].has_only_tag(ROMANIZATION_TAG));
        assert!(forms[1].tags.is_empty());

        let senses = record.senses.unwrap();
        assert!(senses[0].is_form_of());
        assert!(senses[0].translations.is_empty());
        assert!(!senses[1].is_form_of());
        assert_eq!(senses[1].translations[0].gloss(), Some("book"));
    }

    #[test]
    fn null_lists_and_forms_read_as_empty() {
        let record: SourceRecord = serde_json::from_str(
            r#"{"word":"gato","forms":[{"form":null,"tags":null}],
                "senses":[{"translations":null},{"translations":[{"code":"en","word":"cat"}]}]}"#,
        )
        .unwrap();

        let forms = record.forms.unwrap();
        assert_eq!(forms[0].form, "");
        assert!(forms[0].tags.is_empty());

        let senses = record.senses.unwrap();
        assert!(senses[0].translations.is_empty());
        assert_eq!(senses[1].translations[0].gloss(), Some("cat"));
    }

    #[test]
    fn translation_gloss_prefers_word_over_note() {
        let t = Translation {
            code: Some("en".into()),
            word: Some("cat".into()),
            note: Some("feline".into()),
        };
        assert_eq!(t.gloss(), Some("cat"));
        assert!(t.is_for("en"));
        assert!(!t.is_for("de"));

        let empty_word = Translation {
            code: None,
            word: Some(String::new()),
            note: Some("feline".into()),
        };
        assert_eq!(empty_word.gloss(), Some("feline"));
        assert!(!empty_word.is_for("en"));

        assert_eq!(Translation::default().gloss(), None);
    }

    #[test]
    fn form_tag_checks() {
        let form = Form {
            form: "ketāb".into(),
            tags: vec!["romanization".into(), "canonical".into()],
        };
        assert!(form.has_tag(CANONICAL_TAG));
        assert!(!form.has_only_tag(ROMANIZATION_TAG));
    }

    #[test]
    fn index_descriptor_uses_camel_case_keys() {
        let index = IndexDescriptor::gloss("fa", "en", "2024.01.15");
        let value = serde_json::to_value(&index).unwrap();
        assert_eq!(value["title"], "kty-fa-en-gloss");
        assert_eq!(value["format"], 3);
        assert_eq!(value["sequenced"], true);
        assert_eq!(value["sourceLanguage"], "fa");
        assert_eq!(value["targetLanguage"], "en");
        assert_eq!(value["revision"], "2024.01.15");
    }
}
