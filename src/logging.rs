use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Route `log` records to stderr so stdout stays reserved for the tree.
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).set_target_level(LevelFilter::Off).build();
    // A second init (tests, embedding) keeps the first logger
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}
