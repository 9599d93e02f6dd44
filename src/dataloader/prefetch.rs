use std::thread::{self, JoinHandle};

use crossbeam::channel::{bounded, Receiver};

use log::{debug, error};

use crate::dataloader::{DataLoader, SequenceBatch};
use crate::err::LoaderError;

type BatchResult = Result<SequenceBatch, LoaderError>;

/// Produces the remaining epoch of a loader on a background thread.
///
/// At most `queue_size` batches wait in the queue, the producer blocks until
/// the consumer takes one. Dropping the prefetcher stops the producer.
pub struct PrefetchLoader {
    rx: Option<Receiver<BatchResult>>,
    handle: Option<JoinHandle<()>>,
}

impl PrefetchLoader {
    pub fn new(mut loader: Box<dyn DataLoader + Send>, queue_size: usize) -> Result<Self, LoaderError> {
        if !loader.async_supported() {
            return Err(LoaderError::NotSupported("async prefetch"));
        }

        let (tx, rx) = bounded(queue_size.max(1));

        let handle = thread::Builder::new()
            .name("batch-prefetch".to_owned())
            .spawn(move || {
                while loader.has_next() {
                    let batch = loader.next_batch();
                    let failed = batch.is_err();

                    if tx.send(batch).is_err() {
                        debug!("Prefetch consumer gone, stopping");
                        return;
                    }

                    if failed {
                        error!("Prefetch stopped on loader error");
                        return;
                    }
                }

                debug!("Prefetch finished at cursor {}", loader.cursor());
            })?;

        Ok(Self {
            rx: Some(rx),
            handle: Some(handle),
        })
    }
}

impl Iterator for PrefetchLoader {
    type Item = BatchResult;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.as_ref()?.recv().ok()
    }
}

impl Drop for PrefetchLoader {
    fn drop(&mut self) {
        // unblocks a producer waiting on a full queue
        self.rx.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Prefetch thread panicked");
            }
        }
    }
}
