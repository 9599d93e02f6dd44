use log::info;

use clap::ArgMatches;

use tweet_batcher::config::IteratorCfg;
use tweet_batcher::dataloader::*;

use crate::iterate::run_epoch;

pub fn export(args: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let cfg_path = args.get_one::<String>("Cfg").unwrap();
    let out_file = args.get_one::<String>("OutFile").unwrap();
    let max_batches = args.get_one::<usize>("MaxBatches").copied();

    let cfg = IteratorCfg::from_file(cfg_path)?;
    let labels = cfg.manifest()?.entries.into_iter().map(|e| e.tag).collect();

    let mut snap = BatchSnapshot::new(labels);
    run_epoch(&cfg, max_batches, |_idx, batch| snap.push(batch))?;

    snap.to_file(out_file)?;
    info!("Saved {} batches to {}", snap.batches.len(), out_file);

    Ok(())
}
