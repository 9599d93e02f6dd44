use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use ndarray::{Array2, ArrayView1, Axis};

use crate::err::LoaderError;
use crate::util::{Array2D, Float};

/// Pretrained word embedding lookup
pub trait WordVectors: Send + Sync {
    fn has_word(&self, word: &str) -> bool;
    fn vector(&self, word: &str) -> Option<ArrayView1<'_, Float>>;
    /// Length of every vector
    fn dim(&self) -> usize;
    fn vocab_size(&self) -> usize;
}

/// In-memory word vectors, one row per vocabulary word
pub struct WordVectorTable {
    index: HashMap<String, usize>,
    vectors: Array2D,
}

impl WordVectorTable {
    pub fn from_pairs(pairs: Vec<(String, Vec<Float>)>) -> Result<Self, LoaderError> {
        let dim = match pairs.first() {
            Some((_, v)) => v.len(),
            None => {
                return Err(LoaderError::InvalidFormat(
                    "word vector table is empty".to_owned(),
                ))
            }
        };

        if dim == 0 {
            return Err(LoaderError::InvalidFormat(
                "word vectors have zero length".to_owned(),
            ));
        }

        let mut index = HashMap::with_capacity(pairs.len());
        let mut flat = Vec::with_capacity(pairs.len() * dim);

        for (word, vec) in pairs {
            if vec.len() != dim {
                return Err(LoaderError::InvalidFormat(format!(
                    "vector for '{}' has length {}, expected {}",
                    word,
                    vec.len(),
                    dim
                )));
            }

            // first occurrence wins
            if index.contains_key(&word) {
                debug!("Duplicate word vector for '{}' ignored", word);
                continue;
            }

            index.insert(word, index.len());
            flat.extend(vec);
        }

        let rows = index.len();
        let vectors = Array2::from_shape_vec((rows, dim), flat)
            .map_err(|e| LoaderError::InvalidFormat(e.to_string()))?;

        Ok(Self { index, vectors })
    }

    /// Loads the word2vec / GloVe text format : an optional `<count> <dim>`
    /// header, then `word v1 v2 ... vD` per line
    pub fn from_text_file<P: AsRef<Path>>(filepath: P) -> Result<Self, LoaderError> {
        let filepath = filepath.as_ref();
        let reader = BufReader::new(File::open(filepath)?);

        let mut pairs = Vec::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();

            let word = match fields.next() {
                Some(w) => w.to_owned(),
                None => continue,
            };

            let values = fields
                .map(|v| v.parse::<Float>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| {
                    LoaderError::InvalidFormat(format!(
                        "{} line {} : {}",
                        filepath.display(),
                        line_idx + 1,
                        e
                    ))
                })?;

            pairs.push((word, values));
        }

        if Self::has_header(&pairs) {
            debug!("Skipping word vectors header : {} {:?}", pairs[0].0, pairs[0].1);
            pairs.remove(0);
        }

        let table = Self::from_pairs(pairs)?;

        info!(
            "Loaded {} word vectors of dimension {} from {}",
            table.vocab_size(),
            table.dim(),
            filepath.display()
        );

        Ok(table)
    }

    /// First line is `<count> <dim>` and the rest of the file agrees with it
    fn has_header(pairs: &[(String, Vec<Float>)]) -> bool {
        let (word, values) = match pairs.first() {
            Some(p) => p,
            None => return false,
        };

        let count = match word.parse::<usize>() {
            Ok(c) => c,
            Err(_) => return false,
        };

        if values.len() != 1 || values[0] < 0.0 || values[0].fract() != 0.0 {
            return false;
        }

        let dim = values[0] as usize;
        let rest = &pairs[1..];

        rest.len() == count && rest.first().map_or(false, |(_, v)| v.len() == dim)
    }
}

impl WordVectors for WordVectorTable {
    fn has_word(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn vector(&self, word: &str) -> Option<ArrayView1<'_, Float>> {
        self.index
            .get(word)
            .map(|row| self.vectors.index_axis(Axis(0), *row))
    }

    fn dim(&self) -> usize {
        self.vectors.shape()[1]
    }

    fn vocab_size(&self) -> usize {
        self.vectors.shape()[0]
    }
}
