extern crate tweet_batcher;

use clap::{Arg, ArgAction, Command};

pub mod create_cfg;
pub mod dataset_info;
pub mod export;
pub mod iterate;

#[cfg(feature = "log_log4rs")]
fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    use log::LevelFilter;
    use log4rs::append::console::ConsoleAppender;
    use log4rs::append::file::FileAppender;
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::default()))
        .build("log.txt")?;

    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::default()))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .appender(Appender::builder().build("console", Box::new(console)))
        .build(
            Root::builder()
                .appender("console")
                .appender("logfile")
                .build(LevelFilter::Info),
        )?;

    log4rs::init_config(config)?;

    Ok(())
}

#[cfg(not(feature = "log_log4rs"))]
fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    use env_logger::Env;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    Ok(())
}

fn cfg_arg() -> Arg<'static> {
    Arg::new("Cfg")
        .long("cfg")
        .short('c')
        .help("Provide iterator configuration yaml file")
        .action(ArgAction::Set)
        .require_equals(true)
        .required(true)
}

fn max_batches_arg() -> Arg<'static> {
    Arg::new("MaxBatches")
        .long("max_batches")
        .help("Stop after this number of batches")
        .action(ArgAction::Set)
        .value_parser(clap::value_parser!(usize))
        .require_equals(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger()?;

    let matches = Command::new("tweet_batcher tool")
        .version("0.1.0")
        .about("Inspect labeled tweet corpora and the batches produced from them")
        .subcommand_required(true)
        .subcommand(
            Command::new("create_cfg")
                .about("Create a default iterator configuration")
                .arg(
                    Arg::new("OutFile")
                        .long("out")
                        .short('o')
                        .help("Specifies configuration output file")
                        .default_value("tweets.yaml")
                        .require_equals(true)
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("dataset_info")
                .about("Show per-category example counts")
                .arg(cfg_arg())
                .arg(
                    Arg::new("Json")
                        .long("json")
                        .help("Print the statistics as json")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("iterate")
                .about("Run through one epoch and report batch shapes")
                .arg(cfg_arg())
                .arg(max_batches_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Write produced batches to a protobuf snapshot")
                .arg(cfg_arg())
                .arg(max_batches_arg())
                .arg(
                    Arg::new("OutFile")
                        .long("out")
                        .short('o')
                        .default_value("batches.pb")
                        .require_equals(true)
                        .action(ArgAction::Set),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("create_cfg", args)) => create_cfg::create_cfg(args)?,
        Some(("dataset_info", args)) => dataset_info::dataset_info(args)?,
        Some(("iterate", args)) => iterate::iterate(args)?,
        Some(("export", args)) => export::export(args)?,
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}
