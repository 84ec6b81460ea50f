//! Logging setup. Library code only logs through the `log` facade; these
//! initializers are for embedders that want files on disk without wiring
//! log4rs themselves.

/// Initialize from a `log4rs.yaml` in the working directory when present.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let _ = log4rs::init_file("log4rs.yaml", log4rs::config::Deserializers::default());
    Ok(())
}

/// Initialize logging to a project-scoped folder: `{project}_logs/{project}.log`.
///
/// # Errors
/// Returns an error if the directory cannot be created or the logger
/// fails to initialize.
pub fn init_for_project(project_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    use log::LevelFilter;
    use log4rs::append::file::FileAppender;
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let log_dir = format!("{project_id}_logs");
    std::fs::create_dir_all(&log_dir)?;
    let logfile = format!("{log_dir}/{project_id}.log");
    let encoder = Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}"));
    let file_appender = FileAppender::builder().encoder(encoder).build(logfile)?;
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(Root::builder().appender("file").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}
