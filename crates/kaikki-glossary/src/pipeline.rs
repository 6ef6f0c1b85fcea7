//! Streaming driver: source lines in, term banks out.
//!
//! A [`Pipeline`] owns everything that accumulates during a run (rows, drop
//! counts, unmapped part-of-speech tags). Lines are fed one at a time through
//! [`Pipeline::process_line`] or [`Pipeline::consume`]; [`Pipeline::finish`]
//! consumes the pipeline and hands the rows to a [`DictionaryWriter`] exactly
//! once. A JSON error aborts the run before anything is written.

use kaikki_pos::{PosTable, SkippedPos};
use kaikki_types::{IndexDescriptor, LemmaRow, SourceRecord};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::extract::Extractor;
use crate::lemma::LemmaAssembler;
use crate::source::{LineSource, SourceError};
use crate::writer::{DictionaryWriter, WriteError, WriteSummary};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("invalid record on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Counters and diagnostics of a finished run.
#[derive(Clone, Debug)]
pub struct PipelineSummary {
    /// Non-empty lines read.
    pub processed: usize,
    pub rows: usize,
    pub dropped: usize,
    pub skipped_pos: SkippedPos,
    pub written: WriteSummary,
}

pub struct Pipeline<'a> {
    assembler: LemmaAssembler<'a>,
    progress_interval: usize,
    rows: Vec<LemmaRow>,
    skipped_pos: SkippedPos,
    processed: usize,
    dropped: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(assembler: LemmaAssembler<'a>, progress_interval: usize) -> Self {
        Self {
            assembler,
            progress_interval: progress_interval.max(1),
            rows: Vec::new(),
            skipped_pos: SkippedPos::default(),
            processed: 0,
            dropped: 0,
        }
    }

    /// Parse and assemble one line. Empty lines are ignored and not counted.
    pub fn process_line(&mut self, line_number: usize, line: &str) -> Result<(), PipelineError> {
        if line.is_empty() {
            return Ok(());
        }
        self.processed += 1;

        let record: SourceRecord =
            serde_json::from_str(line).map_err(|source| PipelineError::Parse {
                line: line_number,
                source,
            })?;
        match self.assembler.assemble(&record, &mut self.skipped_pos) {
            Some(row) => self.rows.push(row),
            None => self.dropped += 1,
        }

        if self.processed % self.progress_interval == 0 {
            info!(
                "processing lines: {} ({} rows so far)",
                self.processed,
                self.rows.len()
            );
        }
        Ok(())
    }

    /// Feed every line from `lines`, numbering them from 1.
    pub fn consume<I>(&mut self, lines: I) -> Result<(), PipelineError>
    where
        I: IntoIterator<Item = Result<String, SourceError>>,
    {
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line?;
            self.process_line(idx + 1, &line)?;
        }
        Ok(())
    }

    pub fn rows(&self) -> &[LemmaRow] {
        &self.rows
    }

    pub fn skipped_pos(&self) -> &SkippedPos {
        &self.skipped_pos
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Write everything collected so far and end the run.
    pub fn finish(self, writer: &DictionaryWriter) -> Result<PipelineSummary, PipelineError> {
        info!(
            "processed {} lines: {} rows, {} records dropped",
            self.processed,
            self.rows.len(),
            self.dropped
        );
        report_skipped(&self.skipped_pos);

        let rows = self.rows.len();
        let written = writer.write(self.rows)?;
        Ok(PipelineSummary {
            processed: self.processed,
            rows,
            dropped: self.dropped,
            skipped_pos: self.skipped_pos,
            written,
        })
    }
}

/// Run a whole conversion as configured.
pub fn run(
    config: &Config,
    pos_table: &PosTable,
    index: IndexDescriptor,
) -> Result<PipelineSummary, PipelineError> {
    let extractor = Extractor::new(config.target_iso.clone(), config.reading_strategy());
    let mut pipeline = Pipeline::new(
        LemmaAssembler::new(extractor, pos_table),
        config.progress_interval,
    );

    let source = LineSource::open(&config.kaikki_file, config.read_mode)?;
    pipeline.consume(source)?;

    let writer = DictionaryWriter::new(config.dict_dir(), index, config.term_bank_size);
    pipeline.finish(&writer)
}

fn report_skipped(skipped: &SkippedPos) {
    if skipped.is_empty() {
        return;
    }
    warn!(
        "{} part-of-speech tags not in table ({} records)",
        skipped.len(),
        skipped.total()
    );
    for (tag, count) in skipped.sorted() {
        warn!("unmapped part of speech `{tag}`: {count}");
    }
}
