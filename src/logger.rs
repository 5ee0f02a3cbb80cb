use chrono::Local;
use colored::*;
use env_logger::{Builder, Env};
use log::Level;
use std::{env as stdenv, io::Write};

const SERVICE: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `querykv_<version>`, stamped on every non-terse line.
pub fn service_tag() -> String {
    format!("{}_{}", SERVICE, VERSION)
}

// Info and Warn are padded so messages line up with the five-letter levels.
fn level_label(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".red(),
        Level::Warn => " WARN".yellow(),
        Level::Info => " INFO".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".purple(),
    }
}

/// Coloured `env_logger` setup, `info` unless `RUST_LOG` says otherwise.
///
/// With `RUST_LOG=trace` the service tag and timestamp are dropped to keep
/// the lines short.
pub fn setup_logger() {
    let terse = matches!(stdenv::var("RUST_LOG"), Ok(val) if val.eq_ignore_ascii_case("trace"));
    let tag = service_tag();

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            let location = format!(
                "{}:{}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0)
            );
            let level = level_label(record.level());

            if terse {
                return writeln!(buf, "{} {}: {}", location, level, record.args());
            }
            writeln!(
                buf,
                "{} [{} {}]{}: {}",
                location,
                tag.purple(),
                Local::now().format("%Y%m%d %H:%M:%S").to_string().dimmed(),
                level,
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_this_service() {
        assert_eq!(service_tag(), format!("querykv_{}", VERSION));
    }

    #[test]
    fn labels_share_one_width() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert_eq!(level_label(level).chars().count(), 5);
        }
    }
}
