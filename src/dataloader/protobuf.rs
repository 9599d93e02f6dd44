use std::fs;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use ndarray::{Array, Dimension, IxDyn};

use prost::Message;

use crate::dataloader::SequenceBatch;
use crate::util::Float;

#[derive(Clone, PartialEq, Message)]
pub struct PbTensor {
    #[prost(uint64, repeated, tag = "1")]
    pub shape: Vec<u64>,
    #[prost(float, repeated, tag = "2")]
    pub data: Vec<f32>,
}

#[derive(Clone, PartialEq, Message)]
pub struct PbSequenceBatch {
    #[prost(message, optional, tag = "1")]
    pub features: Option<PbTensor>,
    #[prost(message, optional, tag = "2")]
    pub labels: Option<PbTensor>,
    #[prost(message, optional, tag = "3")]
    pub features_mask: Option<PbTensor>,
    #[prost(message, optional, tag = "4")]
    pub labels_mask: Option<PbTensor>,
}

#[derive(Clone, PartialEq, Message)]
pub struct PbBatchStorage {
    #[prost(string, repeated, tag = "1")]
    pub labels: Vec<String>,
    #[prost(message, repeated, tag = "2")]
    pub batches: Vec<PbSequenceBatch>,
}

/// Batches produced by a run, kept for comparison against reference outputs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchSnapshot {
    pub labels: Vec<String>,
    pub batches: Vec<SequenceBatch>,
}

fn to_pb_tensor<D: Dimension>(arr: &Array<Float, D>) -> PbTensor {
    PbTensor {
        shape: arr.shape().iter().map(|d| *d as u64).collect(),
        data: arr.iter().cloned().collect(),
    }
}

fn from_pb_tensor<D: Dimension>(
    t: Option<PbTensor>,
    name: &str,
) -> Result<Array<Float, D>, Box<dyn std::error::Error>> {
    let t = t.ok_or_else(|| format!("snapshot batch is missing '{}'", name))?;
    let shape: Vec<usize> = t.shape.iter().map(|d| *d as usize).collect();

    let arr = Array::from_shape_vec(IxDyn(&shape), t.data)?.into_dimensionality::<D>()?;

    Ok(arr)
}

impl BatchSnapshot {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            batches: Vec::new(),
        }
    }

    pub fn push(&mut self, batch: SequenceBatch) {
        self.batches.push(batch);
    }

    pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self, Box<dyn std::error::Error>> {
        let buf = fs::read(filepath)?;
        let pb_data = PbBatchStorage::decode(buf.as_slice())?;

        let mut snap = BatchSnapshot::new(pb_data.labels);
        snap.batches.reserve(pb_data.batches.len());

        for b in pb_data.batches {
            snap.batches.push(SequenceBatch {
                features: from_pb_tensor(b.features, "features")?,
                labels: from_pb_tensor(b.labels, "labels")?,
                features_mask: from_pb_tensor(b.features_mask, "features_mask")?,
                labels_mask: from_pb_tensor(b.labels_mask, "labels_mask")?,
            });
        }

        Ok(snap)
    }

    pub fn to_file<P: AsRef<Path>>(&self, filepath: P) -> Result<(), Box<dyn std::error::Error>> {
        let mut pb_data = PbBatchStorage {
            labels: self.labels.clone(),
            batches: Vec::with_capacity(self.batches.len()),
        };

        for b in self.batches.iter() {
            pb_data.batches.push(PbSequenceBatch {
                features: Some(to_pb_tensor(&b.features)),
                labels: Some(to_pb_tensor(&b.labels)),
                features_mask: Some(to_pb_tensor(&b.features_mask)),
                labels_mask: Some(to_pb_tensor(&b.labels_mask)),
            });
        }

        let mut file = File::create(filepath)?;
        file.write_all(pb_data.encode_to_vec().as_slice())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn snapshot_file_keeps_batches() {
        let mut batch = SequenceBatch::zeros(2, 2, 2, 3);
        batch.set_step(0, 0, array![0.25, -0.5].view());
        batch.set_label(0, 1, 0);

        let mut snap = BatchSnapshot::new(vec!["neg".to_owned(), "pos".to_owned()]);
        snap.push(batch);
        snap.push(SequenceBatch::zeros(1, 2, 2, 0));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batches.pb");
        snap.to_file(&path).unwrap();

        let loaded = BatchSnapshot::from_file(&path).unwrap();
        assert_eq!(loaded, snap);
        assert_eq!(loaded.batches[1].features.shape(), &[1, 2, 0]);
    }

    #[test]
    fn bad_shape_is_rejected() {
        let storage = PbBatchStorage {
            labels: vec![],
            batches: vec![PbSequenceBatch {
                features: Some(PbTensor { shape: vec![2, 2], data: vec![1.0] }),
                labels: None,
                features_mask: None,
                labels_mask: None,
            }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pb");
        fs::write(&path, storage.encode_to_vec()).unwrap();

        assert!(BatchSnapshot::from_file(&path).is_err());
    }
}
