use ndarray::{Array, ArrayView1, Dimension};

use crate::util::Float;

/// Count of mask positions carrying real data
pub fn count_active<D>(mask: &Array<Float, D>) -> usize
where D: Dimension
{
    mask.iter().filter(|v| **v > 0.0).count()
}

/// Share of active mask positions, 0.0 for an empty mask
pub fn fill_ratio<D>(mask: &Array<Float, D>) -> f32
where D: Dimension
{
    if mask.is_empty() {
        return 0.0;
    }

    count_active(mask) as f32 / mask.len() as f32
}

pub fn last_active(row: ArrayView1<Float>) -> Option<usize> {
    row.iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .map(|(idx, _)| idx)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn counts_and_ratio() {
        let mask = array![[1.0, 1.0, 0.0], [1.0, 0.0, 0.0]];

        assert_eq!(count_active(&mask), 3);
        assert!((fill_ratio(&mask) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn empty_mask_has_zero_fill() {
        let mask = Array2::<Float>::zeros((3, 0));
        assert_eq!(fill_ratio(&mask), 0.0);
    }

    #[test]
    fn last_active_position() {
        let row = array![1.0, 1.0, 1.0, 0.0];
        assert_eq!(last_active(row.view()), Some(2));

        let zeros = array![0.0, 0.0];
        assert_eq!(last_active(zeros.view()), None);
    }
}
