use clap::ArgMatches;

use tweet_batcher::config::IteratorCfg;
use tweet_batcher::dataloader::*;

pub fn dataset_info(args: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let cfg_path = args.get_one::<String>("Cfg").unwrap();
    let cfg = IteratorCfg::from_file(cfg_path)?;

    let corpus = Corpus::load(&cfg.manifest()?)?;
    let stats = corpus.stats();

    if args.get_one::<bool>("Json").copied().unwrap_or(false) {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Split : {}", cfg.split);
    for c in stats.categories.iter() {
        println!("  [{}] {} : {}", c.label, c.tag, c.examples);
    }
    println!("Dataset length : {}", stats.total_examples);

    Ok(())
}
