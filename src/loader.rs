//! Table acquisition.
//!
//! A run reads its table from exactly one place: the default on-disk file if
//! it is a regular file that can be opened, otherwise a user-supplied upload
//! stream. When neither is available the run stops with [`PipelineError::NoDataSource`].

use std::{
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::{error::PipelineError, io_utils};

/// Header row plus raw string cells, as parsed from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn from_reader<R: Read>(
        reader: R,
        delimiter: u8,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader(reader, delimiter);
        let headers = io_utils::reader_headers(&mut reader, encoding)?
            .into_iter()
            .map(|header| header.trim().to_string())
            .collect::<Vec<_>>();
        let mut rows = Vec::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
            let decoded = io_utils::decode_record(&record, encoding)
                .with_context(|| format!("Decoding row {}", row_idx + 2))?;
            rows.push(decoded);
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell at (`row`, `column`), or the empty string for short rows.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Default(PathBuf),
    Upload(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Default(path) => write!(f, "default file {}", path.display()),
            DataSource::Upload(label) => write!(f, "uploaded table {label}"),
        }
    }
}

/// A user-provided table plus a label used for reporting and for picking a
/// delimiter from its extension. Path uploads are only opened when the
/// default file turns out to be unreadable.
pub struct Upload<'a> {
    label: String,
    input: UploadInput<'a>,
}

enum UploadInput<'a> {
    Path(PathBuf),
    Stream(Box<dyn Read + 'a>),
}

impl<'a> Upload<'a> {
    pub fn new(label: impl Into<String>, reader: impl Read + 'a) -> Self {
        Self {
            label: label.into(),
            input: UploadInput::Stream(Box::new(reader)),
        }
    }

    pub fn from_path(path: &Path) -> Upload<'static> {
        let label = if io_utils::is_dash(path) {
            "<stdin>".to_string()
        } else {
            path.display().to_string()
        };
        Upload {
            label,
            input: UploadInput::Path(path.to_path_buf()),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn delimiter_hint(&self) -> &Path {
        match &self.input {
            UploadInput::Path(path) => path,
            UploadInput::Stream(_) => Path::new(&self.label),
        }
    }

    fn into_reader(self) -> Result<Box<dyn Read + 'a>> {
        match self.input {
            UploadInput::Path(path) => Ok(io_utils::open_input(&path)?),
            UploadInput::Stream(reader) => Ok(reader),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Explicit delimiter; otherwise resolved from each source's extension.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub table: RawTable,
    pub source: DataSource,
}

pub fn load(
    default_path: Option<&Path>,
    upload: Option<Upload<'_>>,
    options: &LoadOptions,
) -> Result<Loaded> {
    if let Some(path) = default_path {
        if path.is_file() {
            match File::open(path) {
                Ok(file) => {
                    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
                    let table =
                        RawTable::from_reader(BufReader::new(file), delimiter, options.encoding)
                            .with_context(|| format!("Parsing default table {path:?}"))?;
                    return Ok(Loaded {
                        table,
                        source: DataSource::Default(path.to_path_buf()),
                    });
                }
                Err(err) => debug!("Default table {path:?} unavailable: {err}"),
            }
        } else {
            debug!("Default table {path:?} is not a regular file");
        }
    }

    let Some(upload) = upload else {
        return Err(PipelineError::NoDataSource.into());
    };
    let delimiter = io_utils::resolve_input_delimiter(upload.delimiter_hint(), options.delimiter);
    let label = upload.label.clone();
    let reader = upload.into_reader()?;
    let table = RawTable::from_reader(reader, delimiter, options.encoding)
        .with_context(|| format!("Parsing uploaded table {label}"))?;
    Ok(Loaded {
        table,
        source: DataSource::Upload(label),
    })
}
