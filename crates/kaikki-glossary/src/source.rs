use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use thiserror::Error;

/// Strategy for reading the Kaikki extract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadMode {
    /// Read through a buffered file handle.
    Buffered,
    /// Memory-map the file and split lines in place.
    Mmap,
}

impl ReadMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buffered" => Some(ReadMode::Buffered),
            "mmap" => Some(ReadMode::Mmap),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read line {line}: {source}")]
    Read { line: usize, source: io::Error },
    #[error("line {line} is not valid UTF-8: {source}")]
    Utf8 {
        line: usize,
        source: std::str::Utf8Error,
    },
}

enum Reader {
    Buffered(Lines<BufReader<File>>),
    Mmap { map: Mmap, pos: usize },
}

/// Ordered line iterator over a JSONL file.
///
/// Yields every line, blank ones included, with the line terminator (`\n` or
/// `\r\n`) removed.
pub struct LineSource {
    reader: Reader,
    line: usize,
}

impl LineSource {
    pub fn open(path: impl AsRef<Path>, mode: ReadMode) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let open_err = |source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(open_err)?;
        let empty = file.metadata().map_err(open_err)?.len() == 0;

        let reader = match mode {
            ReadMode::Mmap if !empty => {
                let map = unsafe { Mmap::map(&file) }.map_err(open_err)?;
                Reader::Mmap { map, pos: 0 }
            }
            _ => Reader::Buffered(BufReader::new(file).lines()),
        };
        Ok(Self { reader, line: 0 })
    }

    /// Number of lines yielded so far.
    pub fn line_number(&self) -> usize {
        self.line
    }
}

impl Iterator for LineSource {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.line + 1;
        let item = match &mut self.reader {
            Reader::Buffered(lines) => lines
                .next()?
                .map_err(|source| SourceError::Read { line, source }),
            Reader::Mmap { map, pos } => {
                let rest = map.get(*pos..).filter(|rest| !rest.is_empty())?;
                let end = rest.iter().position(|b| *b == b'\n').unwrap_or(rest.len());
                *pos += end + 1;
                let raw = &rest[..end];
                let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
                std::str::from_utf8(raw)
                    .map(str::to_owned)
                    .map_err(|source| SourceError::Utf8 { line, source })
            }
        };
        self.line = line;
        Some(item)
    }
}
