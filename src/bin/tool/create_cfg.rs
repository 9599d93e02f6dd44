use log::info;

use clap::ArgMatches;

use tweet_batcher::config::IteratorCfg;

pub fn create_cfg(args: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let out_file = args.get_one::<String>("OutFile").unwrap();

    IteratorCfg::default().to_file(out_file)?;
    info!("Default iterator configuration written to {}", out_file);

    Ok(())
}
