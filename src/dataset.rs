//! Loading of the tabular datasets to be analyzed

use crate::config::Config;
use csv_async::{AsyncReaderBuilder, StringRecord};
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::fs::{self, File};

/// Things that can go wrong while loading the datasets
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset directory does not exist
    #[error("dataset directory {0:?} does not exist")]
    DirectoryNotFound(PathBuf),

    /// The dataset directory could not be listed
    #[error("failed to list dataset directory {path:?}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A tabular file could not be opened
    #[error("failed to open tabular file {path:?}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A tabular file is not valid CSV
    #[error("failed to parse tabular file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv_async::Error,
    },

    /// A data row has more fields than the header
    #[error("row {row} of {path:?} has {found} fields, but the header only has {expected}")]
    TooManyFields {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A tabular file has no header row
    #[error("no columns to parse from {0:?}")]
    NoColumns(PathBuf),
}

/// Field values which denote a missing value rather than actual text
///
/// This is the usual set of "not available" markers of dataframe libraries,
/// which is what the analyzed datasets were cleaned with.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Truth that a CSV field denotes a missing value
pub fn is_missing(field: &str) -> bool {
    MISSING_MARKERS.contains(&field)
}

/// In-memory row/column dataset loaded from one tabular file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    /// Column names, from the header row
    columns: Box<[Box<str>]>,

    /// Data rows, with `None` marking missing values
    ///
    /// Rows are padded with missing values to the header's length.
    rows: Vec<Box<[Option<Box<str>>]>>,
}
//
impl Table {
    /// Set up a table from its column names
    pub fn new(columns: impl IntoIterator<Item = impl Into<Box<str>>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding it with missing values if it is too short
    ///
    /// Fails with the number of fields if the row is longer than the header.
    pub fn push_row<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) -> Result<(), usize> {
        let mut row = fields
            .into_iter()
            .map(|field| (!is_missing(field)).then(|| Box::<str>::from(field)))
            .collect::<Vec<_>>();
        if row.len() > self.columns.len() {
            return Err(row.len());
        }
        row.resize(self.columns.len(), None);
        self.rows.push(row.into_boxed_slice());
        Ok(())
    }

    /// Column names
    pub fn columns(&self) -> &[Box<str>] {
        &self.columns[..]
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Values of a named column, in row order
    ///
    /// If several columns bear this name, the first one is used. Returns
    /// `None` if there is no such column.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = Option<&str>> + '_> {
        let idx = self.columns.iter().position(|column| &**column == name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_deref()))
    }
}

/// Load every tabular file from the configured directory
///
/// Files are returned along with their names, in directory listing order or
/// in file name order if so configured. The first file that fails to load
/// aborts the whole process.
pub async fn load_datasets(config: &Config) -> Result<Vec<(Box<str>, Table)>, LoadError> {
    // List the tabular files
    let directory = &config.directory;
    let mut entries = fs::read_dir(directory).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            LoadError::DirectoryNotFound(directory.clone())
        } else {
            LoadError::ReadDirectory {
                path: directory.clone(),
                source,
            }
        }
    })?;
    let read_error = |source| LoadError::ReadDirectory {
        path: directory.clone(),
        source,
    };
    let mut file_names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        let file_name = entry.file_name();
        if config.is_tabular_file(&file_name) {
            // Tabular file names are valid UTF-8, is_tabular_file checked it
            file_names.push(file_name.to_string_lossy().into_owned().into_boxed_str());
        } else {
            log::trace!("Ignoring non-tabular directory entry {file_name:?}");
        }
    }
    if config.sorted {
        file_names.sort_unstable();
    }
    log::info!(
        "Found {} tabular files in {directory:?}",
        file_names.len()
    );

    // Load them
    let mut tables = Vec::with_capacity(file_names.len());
    for file_name in file_names {
        let table = load_table(&directory.join(&*file_name)).await?;
        log::debug!(
            "Loaded {file_name} with {} columns and {} rows",
            table.columns().len(),
            table.len()
        );
        tables.push((file_name, table));
    }
    Ok(tables)
}

/// Load a single CSV file with a header row
pub async fn load_table(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path)
        .await
        .map_err(|source| LoadError::OpenFile {
            path: path.to_owned(),
            source,
        })?;
    let parse_error = |source| LoadError::Parse {
        path: path.to_owned(),
        source,
    };
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .create_reader(file);

    // Decode the header row
    let headers = reader.headers().await.map_err(parse_error)?;
    if headers.is_empty() {
        return Err(LoadError::NoColumns(path.to_owned()));
    }
    let mut table = Table::new(headers.iter());

    // Decode the data rows
    let mut record = StringRecord::new();
    let mut row = 0;
    while reader.read_record(&mut record).await.map_err(parse_error)? {
        row += 1;
        table
            .push_row(record.iter())
            .map_err(|found| LoadError::TooManyFields {
                path: path.to_owned(),
                row,
                expected: table.columns().len(),
                found,
            })?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    fn config(dir: &TempDir) -> Arc<Config> {
        Config::for_directory(dir.path())
    }

    #[test]
    fn missing_markers() {
        for marker in ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>"] {
            assert!(is_missing(marker), "{marker:?} should be missing");
        }
        for text in [" ", "0", "na", "none", "Hello", "NAN"] {
            assert!(!is_missing(text), "{text:?} should not be missing");
        }
    }

    #[test]
    fn table_rows() {
        let mut table = Table::new(["id", "subject", "subject"]);
        table.push_row(["1", "Hello", "shadowed"]).unwrap();
        table.push_row(["2", "NA"]).unwrap();
        table.push_row(["3"]).unwrap();
        assert_eq!(table.push_row(["4", "a", "b", "c"]), Err(4));
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column("subject").unwrap().collect::<Vec<_>>(),
            [Some("Hello"), None, None]
        );
        assert!(table.column("Subject").is_none());
    }

    #[tokio::test]
    async fn loads_only_tabular_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.csv", "subject\nSecond.\n");
        write(&dir, "a.csv", "id,subject\n1,\"Hello, world.\"\n2,\n");
        write(&dir, "notes.txt", "subject\nIgnored.\n");
        write(&dir, "c.csv.bak", "subject\nIgnored.\n");

        let datasets = load_datasets(&config(&dir)).await.unwrap();
        let names = datasets.iter().map(|(name, _)| &**name).collect::<Vec<_>>();
        assert_eq!(names, ["a.csv", "b.csv"]);

        let (_, a) = &datasets[0];
        let columns = a.columns().iter().map(|c| &**c).collect::<Vec<_>>();
        assert_eq!(columns, ["id", "subject"]);
        assert_eq!(
            a.column("subject").unwrap().collect::<Vec<_>>(),
            [Some("Hello, world."), None]
        );
    }

    #[tokio::test]
    async fn empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(load_datasets(&config(&dir)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_directory() {
        let dir = TempDir::new().unwrap();
        let config = Config::for_directory(dir.path().join("nope"));
        let error = load_datasets(&config).await.unwrap_err();
        assert!(matches!(error, LoadError::DirectoryNotFound(_)), "{error:?}");
    }

    #[tokio::test]
    async fn empty_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "empty.csv", "");
        let error = load_datasets(&config(&dir)).await.unwrap_err();
        assert!(matches!(error, LoadError::NoColumns(_)), "{error:?}");
    }

    #[tokio::test]
    async fn overlong_row() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.csv", "id,subject\n1,Fine.\n2,Not,fine.\n");
        let error = load_datasets(&config(&dir)).await.unwrap_err();
        assert!(
            matches!(
                error,
                LoadError::TooManyFields {
                    row: 2,
                    expected: 2,
                    found: 3,
                    ..
                }
            ),
            "{error:?}"
        );
    }

    #[tokio::test]
    async fn invalid_utf8() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bin.csv"), b"subject\n\xff\xfe\n").unwrap();
        let error = load_datasets(&config(&dir)).await.unwrap_err();
        assert!(matches!(error, LoadError::Parse { .. }), "{error:?}");
    }
}
