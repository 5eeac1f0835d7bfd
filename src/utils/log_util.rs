use std::{
    fs,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Config, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

use super::time_util::TimeUtil;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {l} - {m}{n}";
const DEFAULT_LOGGER: &str = "default_logger";

pub struct LogUtil {}

impl LogUtil {
    /// Initializes log4rs for one run, keyed by the protection group ocid:
    /// - <base>/logs/<drpg_ocid>.log, info and above, appended across runs
    /// - <base>/logs/<drpg_ocid>_<timestamp>_error.log, errors only, fresh per run
    /// - console, info and above
    ///
    /// Returns the error log path, which is read back to build the
    /// notification body and removed at the end of a handled run.
    pub fn init_log4rs(drpg_ocid: &str, base_dir: &Path) -> anyhow::Result<PathBuf> {
        let logs_dir = base_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;

        let all_log = logs_dir.join(format!("{}.log", drpg_ocid));
        let error_log = logs_dir.join(format!(
            "{}_{}_error.log",
            drpg_ocid,
            TimeUtil::now_timestamp_str()
        ));

        let all_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(&all_log)?;
        let error_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(&error_log)?;
        let console_appender = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();

        let config = Config::builder()
            .appender(Appender::builder().build("all_file", Box::new(all_appender)))
            .appender(
                Appender::builder()
                    .filter(Box::new(ThresholdFilter::new(LevelFilter::Error)))
                    .build("error_file", Box::new(error_appender)),
            )
            .appender(Appender::builder().build("console", Box::new(console_appender)))
            .logger(
                Logger::builder()
                    .appenders(vec!["all_file", "error_file", "console"])
                    .additive(false)
                    .build(DEFAULT_LOGGER, LevelFilter::Info),
            )
            .build(Root::builder().appender("console").build(LevelFilter::Info))?;

        log4rs::init_config(config)?;
        Ok(error_log)
    }
}
