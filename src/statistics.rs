//! Line-oriented statistic logging in the `<prefix><name>=<value>` format.

use std::fmt::Display;

use once_cell::sync::OnceCell;

#[derive(Clone, Debug)]
struct StatisticOptions {
    log_statistics: bool,
    prefix: &'static str,
}

static STATISTIC_OPTIONS: OnceCell<StatisticOptions> = OnceCell::new();

/// Configure statistic logging once, before any statistic is written. Later
/// calls are ignored.
pub fn configure(log_statistics: bool, prefix: &'static str) {
    let _ = STATISTIC_OPTIONS.set(StatisticOptions {
        log_statistics,
        prefix,
    });
}

/// Write a single statistic line if statistic logging is configured on.
pub fn log_statistic(name: &str, value: impl Display) {
    if let Some(options) = STATISTIC_OPTIONS.get() {
        if options.log_statistics {
            println!("{}{name}={value}", options.prefix);
        }
    }
}
