pub mod config;
pub mod extract;
pub mod lemma;
pub mod pipeline;
pub mod source;
pub mod writer;

pub use config::{Config, ConfigError};
pub use extract::{Extraction, Extractor, ReadingStrategy, canonical_form};
pub use lemma::{LemmaAssembler, dedup_glosses};
pub use pipeline::{Pipeline, PipelineError, PipelineSummary, run};
pub use source::{LineSource, ReadMode, SourceError};
pub use writer::{DictionaryWriter, WriteError, WriteSummary, revision_today, term_bank_file_name};
