use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use chrono::Local;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

static ECHO_TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Set up the per-run log file under the user cache dir. With `verbose`
/// every line is echoed to stderr as well.
pub fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    ECHO_TO_STDERR.store(verbose, Ordering::Relaxed);

    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tracker-stories")
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!(
        "tracker-stories-{}.log",
        Local::now().format("%Y%m%d-%H%M%S")
    ));

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(log_file.clone());
    }

    log_info(&format!("Logging initialized to: {}", log_file.display()));

    Ok(())
}

pub fn log_error(message: &str) {
    log_with_level("ERROR", message);
}

pub fn log_info(message: &str) {
    log_with_level("INFO", message);
}

pub fn log_debug(message: &str) {
    log_with_level("DEBUG", message);
}

#[allow(deprecated)]
pub fn log_panic_info(info: &std::panic::PanicInfo) {
    let mut message = String::from("PANIC: ");

    if let Some(location) = info.location() {
        message.push_str(&format!(
            "at {}:{}:{} - ",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    if let Some(s) = info.payload().downcast_ref::<&str>() {
        message.push_str(s);
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        message.push_str(s);
    } else {
        message.push_str("Unknown panic payload");
    }

    log_error(&message);

    let backtrace = std::backtrace::Backtrace::capture();
    log_debug(&format!("Backtrace:\n{}", backtrace));
}

fn log_with_level(level: &str, message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

    if let Some(log_file) = get_log_file_path() {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
        {
            let _ = writeln!(file, "[{}] {} - {}", timestamp, level, message);
        }
    }

    // stdout carries the rendered stories, so the echo goes to stderr
    if ECHO_TO_STDERR.load(Ordering::Relaxed) {
        eprintln!("[{}] {} - {}", timestamp, level, message);
    }
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}
