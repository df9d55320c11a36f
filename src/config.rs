//! Processing pipeline configuration

use crate::Args;
use std::{ffi::OsStr, num::NonZeroUsize, path::PathBuf, sync::Arc};

/// Final process configuration
///
/// This is the digested form of [`Args`], please refer to it to know more
/// about individual fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    pub directory: PathBuf,
    pub column: Box<str>,
    pub file_top: NonZeroUsize,
    pub cumulative_top: NonZeroUsize,
    pub sorted: bool,

    /// File name suffix of tabular files, including the leading dot
    pub suffix: Box<str>,
}
//
impl Config {
    /// Determine process configuration from CLI arguments
    pub(crate) fn new(args: Args) -> Arc<Self> {
        let Args {
            directory,
            column,
            extension,
            file_top,
            cumulative_top,
            format: _,
            sorted,
        } = args;
        Arc::new(Self {
            directory,
            column,
            file_top,
            cumulative_top,
            sorted,
            suffix: format!(".{extension}").into(),
        })
    }

    /// Truth that a directory entry should be loaded as a tabular file
    pub fn is_tabular_file(&self, file_name: &OsStr) -> bool {
        file_name
            .to_str()
            .is_some_and(|name| name.ends_with(&*self.suffix))
    }
}

#[cfg(test)]
impl Config {
    /// Configuration with default settings for a given directory
    pub fn for_directory(directory: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            directory: directory.into(),
            column: "subject".into(),
            file_top: NonZeroUsize::new(5).unwrap(),
            cumulative_top: NonZeroUsize::new(10).unwrap(),
            sorted: true,
            suffix: ".csv".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabular_file_detection() {
        let config = Config::for_directory("data");
        assert!(config.is_tabular_file(OsStr::new("a.csv")));
        assert!(config.is_tabular_file(OsStr::new(".csv")));
        assert!(!config.is_tabular_file(OsStr::new("a.CSV")));
        assert!(!config.is_tabular_file(OsStr::new("a.csv.bak")));
        assert!(!config.is_tabular_file(OsStr::new("acsv")));
    }
}
