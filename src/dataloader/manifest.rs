use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use log::debug;

use crate::err::LoaderError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

impl TryFrom<&str> for Split {
    type Error = &'static str;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        match input {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            _ => Err("Split must be 'train' or 'test'"),
        }
    }
}

/// One category to load : class id, display tag and its examples file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub label: usize,
    pub tag: String,
    pub path: PathBuf,
}

/// Ordered list of categories making up a corpus
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Reads `label,tag` lines from `<data_dir>/<index_file>`. Examples of
    /// each category live in `<data_dir>/<split>/<label>.txt`.
    pub fn from_index_file<P: AsRef<Path>>(
        data_dir: P,
        index_file: &str,
        split: Split,
    ) -> Result<Self, LoaderError> {
        let data_dir = data_dir.as_ref();
        let index_path = data_dir.join(index_file);
        let reader = BufReader::new(File::open(&index_path)?);

        let mut entries = Vec::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split(',');
            let (label_str, tag) = match (fields.next(), fields.next()) {
                (Some(l), Some(t)) => (l.trim(), t.trim()),
                _ => {
                    return Err(LoaderError::InvalidFormat(format!(
                        "{} line {} : expected 'label,tag', got '{}'",
                        index_path.display(),
                        line_idx + 1,
                        line
                    )));
                }
            };

            let label = label_str.parse::<usize>().map_err(|e| {
                LoaderError::InvalidFormat(format!(
                    "{} line {} : bad label '{}' : {}",
                    index_path.display(),
                    line_idx + 1,
                    label_str,
                    e
                ))
            })?;

            let path = data_dir
                .join(split.dir_name())
                .join(format!("{}.txt", label_str));

            debug!("Manifest entry {} '{}' -> {}", label, tag, path.display());

            entries.push(ManifestEntry {
                label,
                tag: tag.to_owned(),
                path,
            });
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_index_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("categories.txt"), "0,negative\n\n1, positive\n").unwrap();

        let m = Manifest::from_index_file(dir.path(), "categories.txt", Split::Test).unwrap();

        assert_eq!(m.len(), 2);
        assert_eq!(m.entries[0].label, 0);
        assert_eq!(m.entries[0].tag, "negative");
        assert_eq!(m.entries[1].tag, "positive");
        assert_eq!(m.entries[1].path, dir.path().join("test").join("1.txt"));
    }

    #[test]
    fn missing_tag_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("categories.txt"), "0\n").unwrap();

        let res = Manifest::from_index_file(dir.path(), "categories.txt", Split::Train);
        assert!(matches!(res, Err(LoaderError::InvalidFormat(_))));
    }

    #[test]
    fn non_numeric_label_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("categories.txt"), "neg,negative\n").unwrap();

        let res = Manifest::from_index_file(dir.path(), "categories.txt", Split::Train);
        assert!(matches!(res, Err(LoaderError::InvalidFormat(_))));
    }

    #[test]
    fn missing_index_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let res = Manifest::from_index_file(dir.path(), "categories.txt", Split::Train);
        assert!(matches!(res, Err(LoaderError::Io(_))));
    }

    #[test]
    fn split_from_str() {
        assert_eq!(Split::try_from("train"), Ok(Split::Train));
        assert_eq!(Split::try_from("test"), Ok(Split::Test));
        assert!(Split::try_from("dev").is_err());
        assert_eq!(Split::Test.to_string(), "test");
    }
}
