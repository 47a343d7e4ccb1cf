//! Dual-destination event sink (console + log file) and debug tracing.

use std::fs::File;
use std::io::{self, LineWriter, Stdout, Write};
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

/// Writes each event line to the console and to a log file.
///
/// Both destinations sit behind their own mutex, always acquired in the same
/// order (console first, file second), so a logical event is never
/// interleaved with another caller's and both destinations carry the same
/// lines. Write errors after a successful open are ignored.
pub struct EventLog {
    console: Option<Mutex<Stdout>>,
    file: Mutex<LineWriter<File>>,
}

impl EventLog {
    /// Open the file sink at `path` and echo every line to the console.
    pub fn create(path: &Path) -> io::Result<Self> {
        Self::open(path, true)
    }

    /// File-only sink, used by tests to keep stdout quiet.
    #[cfg(test)]
    pub(crate) fn create_silent(path: &Path) -> io::Result<Self> {
        Self::open(path, false)
    }

    fn open(path: &Path, echo_console: bool) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            console: echo_console.then(|| Mutex::new(io::stdout())),
            file: Mutex::new(LineWriter::new(file)),
        })
    }

    /// Write one event line to both destinations, atomically per call.
    pub fn log(&self, line: &str) {
        let console = self
            .console
            .as_ref()
            .map(|out| out.lock().expect("console mutex poisoned"));
        let mut file = self.file.lock().expect("log file mutex poisoned");
        if let Some(mut out) = console {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(file, "{line}");
    }
}

/// Timestamped tracing for debug builds, tagged with the thread name.
pub fn dev_log(message: &str) {
    if !cfg!(debug_assertions) {
        return;
    }

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let current = thread::current();
    let thread_name = current.name().unwrap_or("unnamed");
    eprintln!("[{ts}ms][{thread_name}] {message}");
}

#[macro_export]
macro_rules! log_dev {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::event_log::dev_log(&format!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;

    fn temp_log_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("hospital_flow_{name}_{}.log", std::process::id()))
    }

    #[test]
    fn lines_reach_the_file_in_call_order() {
        let path = temp_log_path("order");
        let log = EventLog::create_silent(&path).expect("open log file");
        log.log("first");
        log.log("second");
        drop(log);

        let contents = fs::read_to_string(&path).expect("read log file");
        assert_eq!(contents, "first\nsecond\n");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn concurrent_writers_never_interleave_lines() {
        let path = temp_log_path("interleave");
        let log = Arc::new(EventLog::create_silent(&path).expect("open log file"));
        let writers = 4;
        let lines_each = 100;

        let mut handles = Vec::new();
        for writer in 0..writers {
            let log = Arc::clone(&log);
            handles.push(thread::spawn(move || {
                for i in 0..lines_each {
                    log.log(&format!("writer {writer} line {i} end"));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("writer thread panicked");
        }
        drop(log);

        let contents = fs::read_to_string(&path).expect("read log file");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), writers * lines_each);
        for line in lines {
            // Every line must be exactly one writer's whole message.
            assert!(
                line.starts_with("writer ") && line.ends_with(" end"),
                "interleaved line: {line:?}"
            );
        }
        fs::remove_file(&path).ok();
    }

    #[test]
    fn create_fails_for_unwritable_path() {
        let path = Path::new("/nonexistent-dir/hospital.log");
        assert!(EventLog::create_silent(path).is_err());
    }
}
