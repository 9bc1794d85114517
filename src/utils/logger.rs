use crate::shared::constants;
use lazy_static::lazy_static;
use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level {
    Debug,
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
        })
    }
}

/// The two log files. Every line goes to the debug log; errors are copied to
/// the error log as well.
#[derive(Clone, Debug)]
struct LogFiles {
    error: PathBuf,
    debug: PathBuf,
}

impl LogFiles {
    fn in_dir(dir: &Path) -> Self {
        Self {
            error: dir.join(constants::ERROR_LOG_FILE),
            debug: dir.join(constants::DEBUG_LOG_FILE),
        }
    }

    fn start(&self) {
        let now = chrono::Local::now();
        for (path, title) in [(&self.error, "Error Log"), (&self.debug, "Debug Log")] {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
            {
                let _ = writeln!(file, "=== {} Started: {} ===", title, now);
            }
        }
    }

    fn write(&self, level: Level, msg: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let line = format!("[{}][{}] {}", timestamp, level, msg);
        append_line(&self.debug, &line);
        if level == Level::Error {
            append_line(&self.error, &line);
        }
    }
}

lazy_static! {
    static ref FILES: Mutex<Option<LogFiles>> = Mutex::new(None);
}

fn append_line(path: &Path, line: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "Box<Any>"
    }
}

/// Starts fresh log files in the working directory.
pub fn init() {
    init_in(&std::env::current_dir().unwrap_or_default());
}

/// Starts fresh log files in `dir` and installs a panic hook that records
/// the panic with a backtrace, then hands the terminal back.
pub fn init_in(dir: &Path) {
    let files = LogFiles::in_dir(dir);
    files.start();
    if let Ok(mut slot) = FILES.lock() {
        *slot = Some(files.clone());
    }

    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let report = format!(
            "\nCRITICAL PANIC at {}:\nMessage: {}\nBacktrace:\n{:?}\n",
            location,
            panic_message(info.payload()),
            Backtrace::capture()
        );
        append_line(&files.error, &report);
        append_line(&files.debug, &report);

        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen
        );
        eprintln!(
            "{} crashed. See {} for details.",
            constants::APP_NAME,
            files.error.display()
        );
    }));
}

/// No-op until `init` has run.
pub fn log(level: Level, msg: &str) {
    let Ok(guard) = FILES.lock() else {
        return;
    };
    if let Some(files) = guard.as_ref() {
        files.write(level, msg);
    }
}

pub fn info(msg: &str) {
    log(Level::Info, msg);
}

pub fn error(msg: &str) {
    log(Level::Error, msg);
}

pub fn debug(msg: &str) {
    log(Level::Debug, msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_errors_reach_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = LogFiles::in_dir(dir.path());
        files.start();
        files.write(Level::Debug, "frame took 12ms");
        files.write(Level::Error, "render failed");

        let debug = fs::read_to_string(dir.path().join(constants::DEBUG_LOG_FILE)).unwrap();
        let error = fs::read_to_string(dir.path().join(constants::ERROR_LOG_FILE)).unwrap();

        assert!(debug.starts_with("=== Debug Log Started"));
        assert!(debug.contains("[DEBUG] frame took 12ms"));
        assert!(debug.contains("[ERROR] render failed"));
        assert!(!error.contains("frame took"));
        assert!(error.contains("[ERROR] render failed"));
    }

    #[test]
    fn test_start_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let files = LogFiles::in_dir(dir.path());
        files.start();
        files.write(Level::Info, "old run");
        files.start();

        let debug = fs::read_to_string(&files.debug).unwrap();
        assert!(!debug.contains("old run"));
        assert_eq!(debug.lines().count(), 1);
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "Box<Any>");
    }
}
