use ndarray::{s, Array2, Array3, ArrayView1, Axis};

use ndarray_stats::QuantileExt;

use crate::util::*;

/// Padded, masked mini-batch of embedded sequences.
///
/// * `features` : `[examples, embedding dim, steps]`
/// * `labels` : `[examples, categories, steps]`, one-hot at the last real step
/// * `features_mask`, `labels_mask` : `[examples, steps]`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequenceBatch {
    pub features: Array3D,
    pub labels: Array3D,
    pub features_mask: Array2D,
    pub labels_mask: Array2D,
}

impl SequenceBatch {
    pub fn zeros(examples: usize, dim: usize, categories: usize, steps: usize) -> Self {
        Self {
            features: Array3::zeros((examples, dim, steps)),
            labels: Array3::zeros((examples, categories, steps)),
            features_mask: Array2::zeros((examples, steps)),
            labels_mask: Array2::zeros((examples, steps)),
        }
    }

    pub fn num_examples(&self) -> usize {
        self.features.shape()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.num_examples() == 0
    }

    /// Padded sequence length shared by every row
    pub fn steps(&self) -> usize {
        self.features.shape()[2]
    }

    pub fn set_step(&mut self, example: usize, step: usize, vector: ArrayView1<Float>) {
        self.features.slice_mut(s![example, .., step]).assign(&vector);
        self.features_mask[[example, step]] = 1.0;
    }

    /// Marks `step` as the output step of `example` with class `label`
    pub fn set_label(&mut self, example: usize, label: usize, step: usize) {
        self.labels[[example, label, step]] = 1.0;
        self.labels_mask[[example, step]] = 1.0;
    }

    /// Real (unpadded) length of each row
    pub fn sequence_lengths(&self) -> Vec<usize> {
        self.features_mask
            .axis_iter(Axis(0))
            .map(|row| row.iter().filter(|v| **v > 0.0).count())
            .collect()
    }

    /// Class written for `example`, `None` for a fully masked row
    pub fn label_of(&self, example: usize) -> Option<usize> {
        let step = last_active(self.labels_mask.row(example))?;
        self.labels.slice(s![example, .., step]).argmax().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn zeros_has_expected_shapes() {
        let b = SequenceBatch::zeros(4, 3, 2, 7);

        assert_eq!(b.features.shape(), &[4, 3, 7]);
        assert_eq!(b.labels.shape(), &[4, 2, 7]);
        assert_eq!(b.features_mask.shape(), &[4, 7]);
        assert_eq!(b.labels_mask.shape(), &[4, 7]);
        assert_eq!(b.num_examples(), 4);
        assert_eq!(b.steps(), 7);
        assert!(!b.is_empty());
    }

    #[test]
    fn steps_and_labels() {
        let mut b = SequenceBatch::zeros(2, 2, 3, 3);
        let v = array![0.5, -1.0];

        b.set_step(0, 0, v.view());
        b.set_step(0, 1, v.view());
        b.set_label(0, 2, 1);

        assert_eq!(b.features[[0, 1, 1]], -1.0);
        assert_eq!(b.sequence_lengths(), vec![2, 0]);
        assert_eq!(b.label_of(0), Some(2));
        assert_eq!(b.label_of(1), None);
    }
}
