use crate::dataloader::SequenceBatch;
use crate::err::LoaderError;

/// Hook run on every produced batch
pub trait BatchPreProcessor: Send + Sync {
    fn pre_process(&self, batch: &mut SequenceBatch);
}

/// Batch iterator interface consumed by a training loop.
///
/// `next_batch` fails with [`LoaderError::OutOfData`] once `has_next` is
/// false, there is no wraparound. Pre-processor injection is not supported.
pub trait DataLoader {
    fn has_next(&self) -> bool;
    /// Batch of the configured size
    fn next_batch(&mut self) -> Result<SequenceBatch, LoaderError>;
    fn next_n(&mut self, num: usize) -> Result<SequenceBatch, LoaderError>;
    fn reset(&mut self);

    fn batch(&self) -> usize;
    fn cursor(&self) -> usize;
    fn total_examples(&self) -> usize;
    fn num_categories(&self) -> usize;
    /// Embedding dimension of each step
    fn input_dimension(&self) -> usize;
    fn labels(&self) -> &[String];

    fn reset_supported(&self) -> bool { true }
    fn async_supported(&self) -> bool { true }

    fn pre_processor(&self) -> Result<&dyn BatchPreProcessor, LoaderError> {
        Err(LoaderError::NotSupported("pre_processor"))
    }

    fn set_pre_processor(&mut self, _pre: Box<dyn BatchPreProcessor>) -> Result<(), LoaderError> {
        Err(LoaderError::NotSupported("set_pre_processor"))
    }
}

/// Batches of the remaining epoch
pub struct Epoch<'a, D: DataLoader + ?Sized> {
    loader: &'a mut D,
}

impl<'a, D: DataLoader + ?Sized> Iterator for Epoch<'a, D> {
    type Item = Result<SequenceBatch, LoaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.loader.has_next() {
            return None;
        }

        Some(self.loader.next_batch())
    }
}

pub fn epoch<D: DataLoader + ?Sized>(loader: &mut D) -> Epoch<'_, D> {
    Epoch { loader }
}
