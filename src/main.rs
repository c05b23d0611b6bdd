use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use vpc_subnet_planner::build_network;
use vpc_subnet_planner::output::{print_topology, write_plan};
use vpc_subnet_planner::NetworkConfig;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging()?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config = match std::env::args().nth(1) {
        Some(path) => NetworkConfig::from_json_file(path)?,
        None => NetworkConfig::from_env()?,
    };

    let topology = build_network(&config).map_err(|e| {
        log::error!("Network build aborted: {e}");
        e
    })?;
    print_topology(&topology);
    write_plan(&topology, &config.stack_name, None)?;

    Ok(())
}

/// Use log4rs.yml when present, otherwise log to stderr at info.
fn init_logging() -> Result<(), Box<dyn Error>> {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}
