use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use kaikki_types::{IndexDescriptor, LemmaRow};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

pub const INDEX_FILE: &str = "index.json";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to serialize {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// What a [`DictionaryWriter::write`] call left on disk.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WriteSummary {
    pub rows: usize,
    pub term_banks: usize,
    pub removed: usize,
}

/// Writes `index.json` and numbered term banks into one directory.
#[derive(Clone, Debug)]
pub struct DictionaryWriter {
    dict_dir: PathBuf,
    index: IndexDescriptor,
    batch_size: usize,
}

impl DictionaryWriter {
    pub fn new(dict_dir: impl Into<PathBuf>, index: IndexDescriptor, batch_size: usize) -> Self {
        Self {
            dict_dir: dict_dir.into(),
            index,
            batch_size: batch_size.max(1),
        }
    }

    /// Replace the directory contents with the index and `rows` split into
    /// term banks of at most `batch_size` rows, numbered from 1.
    ///
    /// Not transactional: a failure part way leaves whatever was written.
    pub fn write(&self, rows: Vec<LemmaRow>) -> Result<WriteSummary, WriteError> {
        fs::create_dir_all(&self.dict_dir).map_err(io_err("create", &self.dict_dir))?;
        let removed = self.clear()?;

        let index_path = self.dict_dir.join(INDEX_FILE);
        let index = serde_json::to_string_pretty(&self.index).map_err(|source| WriteError::Json {
            path: index_path.clone(),
            source,
        })?;
        fs::write(&index_path, index).map_err(io_err("write", &index_path))?;

        let mut term_banks = 0;
        for (idx, batch) in rows.chunks(self.batch_size).enumerate() {
            let path = self.dict_dir.join(term_bank_file_name(idx + 1));
            write_json(&path, batch)?;
            term_banks += 1;
        }

        info!(
            "wrote {} rows across {} term banks to {}",
            rows.len(),
            term_banks,
            self.dict_dir.display()
        );
        Ok(WriteSummary {
            rows: rows.len(),
            term_banks,
            removed,
        })
    }

    fn clear(&self) -> Result<usize, WriteError> {
        let mut removed = 0;
        let entries = fs::read_dir(&self.dict_dir).map_err(io_err("list", &self.dict_dir))?;
        for entry in entries {
            let entry = entry.map_err(io_err("list", &self.dict_dir))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(io_err("stat", &path))?;
            if !file_type.is_file() {
                continue;
            }
            fs::remove_file(&path).map_err(io_err("remove", &path))?;
            debug!("removed stale {}", path.display());
            removed += 1;
        }
        Ok(removed)
    }
}

/// File name of the `n`th term bank (1-based).
pub fn term_bank_file_name(n: usize) -> String {
    format!("term_bank_{n}.json")
}

/// Today's local date as an index revision, e.g. `2024.01.15`.
pub fn revision_today() -> String {
    chrono::Local::now().format("%Y.%m.%d").to_string()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), WriteError> {
    let file = File::create(path).map_err(io_err("create", path))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer(&mut out, value).map_err(|source| WriteError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(io_err("write", path))
}

fn io_err<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> WriteError + 'a {
    move |source| WriteError::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}
