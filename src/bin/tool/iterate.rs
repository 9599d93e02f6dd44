use log::{info, warn};

use std::time::Instant;

use clap::ArgMatches;

use tweet_batcher::config::IteratorCfg;
use tweet_batcher::dataloader::*;
use tweet_batcher::err::LoaderError;
use tweet_batcher::util::*;

fn report(idx: usize, batch: &SequenceBatch) {
    info!(
        "Batch {} : features {:?}, labels {:?}, mask fill {:.3}",
        idx,
        batch.features.shape(),
        batch.labels.shape(),
        fill_ratio(&batch.features_mask)
    );

    if count_active(&batch.labels_mask) < batch.num_examples() {
        warn!("Batch {} has rows without any known token", idx);
    }
}

/// Drives one epoch, directly or through the prefetcher when configured
pub fn run_epoch<F>(cfg: &IteratorCfg, max_batches: Option<usize>, mut on_batch: F) -> Result<usize, LoaderError>
where
    F: FnMut(usize, SequenceBatch),
{
    let mut it = cfg.build_iterator()?;
    let limit = max_batches.unwrap_or(usize::MAX);
    let mut count = 0;

    if cfg.prefetch > 0 {
        info!("Prefetching with queue size {}", cfg.prefetch);
        let prefetch = PrefetchLoader::new(Box::new(it), cfg.prefetch)?;

        for batch in prefetch.take(limit) {
            on_batch(count, batch?);
            count += 1;
        }
    } else {
        for batch in epoch(&mut it).take(limit) {
            on_batch(count, batch?);
            count += 1;
        }
    }

    Ok(count)
}

pub fn iterate(args: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let cfg_path = args.get_one::<String>("Cfg").unwrap();
    let cfg = IteratorCfg::from_file(cfg_path)?;
    let max_batches = args.get_one::<usize>("MaxBatches").copied();

    let now_time = Instant::now();
    let mut examples = 0;

    let count = run_epoch(&cfg, max_batches, |idx, batch| {
        examples += batch.num_examples();
        report(idx, &batch);
    })?;

    info!(
        "Iterated {} batches, {} examples in {} ms",
        count,
        examples,
        now_time.elapsed().as_millis()
    );

    Ok(())
}
