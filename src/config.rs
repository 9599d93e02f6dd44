use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info};

use serde::{Deserialize, Serialize};

use crate::dataloader::*;
use crate::err::LoaderError;
use crate::text::WordVectorTable;

/// Iterator configuration, usually read from a yaml file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IteratorCfg {
    pub data_dir: PathBuf,
    pub index_file: String,
    pub split: Split,
    pub word_vectors: PathBuf,
    pub batch_size: usize,
    pub truncate_length: usize,
    /// Prefetch queue size, 0 disables prefetching
    pub prefetch: usize,
}

impl Default for IteratorCfg {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("LabelledData"),
            index_file: "categories.txt".to_owned(),
            split: Split::Train,
            word_vectors: PathBuf::from("vectors.txt"),
            batch_size: 32,
            truncate_length: TRUNCATE_LENGTH,
            prefetch: 0,
        }
    }
}

impl IteratorCfg {
    pub fn from_file(filepath: &str) -> Result<Self, Box<dyn Error>> {
        let cfg_file = File::open(filepath)?;
        let cfg: IteratorCfg = serde_yaml::from_reader(cfg_file)?;
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn to_file(&self, filepath: &str) -> Result<(), Box<dyn Error>> {
        let yaml_str_result = serde_yaml::to_string(&self);

        let mut output = File::create(filepath)?;

        match yaml_str_result {
            Ok(yaml_str) => {
                output.write_all(yaml_str.as_bytes())?;
            }
            Err(x) => {
                error!("Error (serde-yaml) serializing iterator config !!!");
                return Err(Box::new(std::io::Error::new(ErrorKind::Other, x)));
            }
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.batch_size == 0 {
            return Err(LoaderError::InvalidFormat("batch_size must be positive".to_owned()));
        }

        if self.truncate_length == 0 {
            return Err(LoaderError::InvalidFormat(
                "truncate_length must be positive".to_owned(),
            ));
        }

        Ok(())
    }

    pub fn manifest(&self) -> Result<Manifest, LoaderError> {
        Manifest::from_index_file(&self.data_dir, &self.index_file, self.split)
    }

    /// Loads word vectors and corpus, fails on the first unreadable file
    pub fn build_iterator(&self) -> Result<TweetIterator, LoaderError> {
        self.validate()?;

        let manifest = self.manifest()?;
        info!("Loading {} categories of split '{}'", manifest.len(), self.split);

        let vectors = Arc::new(WordVectorTable::from_text_file(&self.word_vectors)?);

        let it = TweetIterator::from_manifest(&manifest, vectors, self.batch_size)?
            .truncate_length(self.truncate_length);

        Ok(it)
    }
}
