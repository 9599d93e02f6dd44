use std::fs::File;
use std::io::{BufRead, BufReader};

use log::info;

use serde::Serialize;

use crate::dataloader::Manifest;
use crate::err::LoaderError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub label: usize,
    pub tag: String,
    pub examples: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryStats {
    pub label: usize,
    pub tag: String,
    pub examples: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct CorpusStats {
    pub total_examples: usize,
    pub categories: Vec<CategoryStats>,
}

/// Labeled examples of every category, loaded once and never mutated
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    categories: Vec<Category>,
    total: usize,
}

impl Corpus {
    pub fn new(categories: Vec<Category>) -> Result<Self, LoaderError> {
        let num_categories = categories.len();

        for c in categories.iter() {
            if c.label >= num_categories {
                return Err(LoaderError::InvalidFormat(format!(
                    "label {} of '{}' is out of range for {} categories",
                    c.label, c.tag, num_categories
                )));
            }
        }

        let total = categories.iter().map(|c| c.examples.len()).sum();

        Ok(Self { categories, total })
    }

    /// Reads every manifest entry, one example per non-empty line.
    /// Fails on the first unreadable file.
    pub fn load(manifest: &Manifest) -> Result<Self, LoaderError> {
        let mut categories = Vec::with_capacity(manifest.len());

        for entry in manifest.entries.iter() {
            let reader = BufReader::new(File::open(&entry.path)?);
            let mut examples = Vec::new();

            for line in reader.lines() {
                let line = line?;

                if !line.is_empty() {
                    examples.push(line);
                }
            }

            info!(
                "Category {} '{}' : {} examples from {}",
                entry.label,
                entry.tag,
                examples.len(),
                entry.path.display()
            );

            categories.push(Category {
                label: entry.label,
                tag: entry.tag.clone(),
                examples,
            });
        }

        let corpus = Self::new(categories)?;
        info!("Corpus loaded : {} examples total", corpus.total_examples());

        Ok(corpus)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    pub fn total_examples(&self) -> usize {
        self.total
    }

    /// Tags in index order
    pub fn tags(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.tag.clone()).collect()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            total_examples: self.total,
            categories: self
                .categories
                .iter()
                .map(|c| CategoryStats {
                    label: c.label,
                    tag: c.tag.clone(),
                    examples: c.examples.len(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataloader::ManifestEntry;
    use std::fs;

    #[test]
    fn total_is_sum_of_categories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0.txt"), "a\n\nb\n").unwrap();
        fs::write(dir.path().join("1.txt"), "c\nd\r\ne\n\n").unwrap();

        let manifest = Manifest::new(vec![
            ManifestEntry { label: 0, tag: "neg".to_owned(), path: dir.path().join("0.txt") },
            ManifestEntry { label: 1, tag: "pos".to_owned(), path: dir.path().join("1.txt") },
        ]);

        let corpus = Corpus::load(&manifest).unwrap();

        assert_eq!(corpus.num_categories(), 2);
        assert_eq!(corpus.total_examples(), 5);
        assert_eq!(corpus.categories()[1].examples, vec!["c", "d", "e"]);
        assert_eq!(corpus.tags(), vec!["neg", "pos"]);

        let stats = corpus.stats();
        assert_eq!(stats.total_examples, 5);
        assert_eq!(stats.categories[0].examples, 2);
    }

    #[test]
    fn missing_category_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("0.txt"), "a\n").unwrap();

        let manifest = Manifest::new(vec![
            ManifestEntry { label: 0, tag: "neg".to_owned(), path: dir.path().join("0.txt") },
            ManifestEntry { label: 1, tag: "pos".to_owned(), path: dir.path().join("1.txt") },
        ]);

        assert!(matches!(Corpus::load(&manifest), Err(LoaderError::Io(_))));
    }

    #[test]
    fn label_out_of_range_is_rejected() {
        let res = Corpus::new(vec![Category {
            label: 3,
            tag: "x".to_owned(),
            examples: vec!["a".to_owned()],
        }]);

        assert!(matches!(res, Err(LoaderError::InvalidFormat(_))));
    }
}
