//! Injectable loggers for the CLI binaries. Library crates never call these
//! directly — they only emit `log::warn!`/`log::info!`/`log::debug!` and
//! leave the logger choice to whichever binary links them.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Writes `Warn`/`Error` records to stderr, everything else to stdout — the
/// CLI binaries rely on this split (warnings and the shutdown tally must
/// land on stderr; per-utterance progress is stdout noise).
pub struct StdoutLogger;

/// Writes every record to a date-named file under `dir`, rolling over at
/// midnight UTC.
pub struct FileLogger {
    state: Mutex<FileLoggerState>,
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

impl FileLogger {
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let current_date = format_today();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{current_date}.log")))?;
        Ok(FileLogger { state: Mutex::new(FileLoggerState { dir, current_date, file }) })
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format!("{} [{}] {} - {}", format_timestamp(), record.level(), record.target(), record.args());
        if record.level() <= Level::Warn {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
        std::io::stderr().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let today = format_today();
        if today != state.current_date {
            match OpenOptions::new().create(true).append(true).open(state.dir.join(format!("{today}.log"))) {
                Ok(file) => {
                    state.file = file;
                    state.current_date = today;
                }
                Err(e) => eprintln!("failed to roll over log file: {e}"),
            }
        }
        let line = format!("{} [{}] {} - {}\n", format_timestamp(), record.level(), record.target(), record.args());
        if let Err(e) = state.file.write_all(line.as_bytes()) {
            eprintln!("failed to write log file: {e}");
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).file.flush().ok();
    }
}

fn format_timestamp() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
    let (y, mo, d) = civil_from_days((secs / 86400) as i64);
    let tod = secs % 86400;
    format!("{:04}-{:02}-{:02}T{:02}:{:02}:{:02}", y, mo, d, tod / 3600, (tod % 3600) / 60, tod % 60)
}

fn format_today() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
    let (y, mo, d) = civil_from_days((secs / 86400) as i64);
    format!("{y:04}-{mo:02}-{d:02}")
}

/// Howard Hinnant's civil-from-days algorithm (public domain).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Installs [`StdoutLogger`] as the global logger. Debug builds log at
/// `Debug`; release builds at `Info`. Subsequent calls are no-ops.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;
    let max_level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}
