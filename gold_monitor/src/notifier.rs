//! Desktop notifications.
//!
//! Alerts are delivered through macOS `osascript` (`display notification`). Delivery is
//! fire-and-forget: a zero exit status is all that is checked.
use gold_common::MonitorError;
use log::debug;
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How long `osascript` may run before it is killed.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Something that can show a titled message to the user.
pub trait Notifier {
    /// Show `message` under `title`.
    fn notify(&self, title: &str, message: &str) -> Result<(), MonitorError>;
}

/// Escape text for use inside an AppleScript string literal.
pub fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Notifier backed by `osascript -e 'display notification ...'`.
pub struct OsaScriptNotifier {
    program: String,
    timeout: Duration,
}

impl OsaScriptNotifier {
    /// Notifier using the system `osascript`.
    pub fn new() -> Self {
        Self::with_program("osascript")
    }

    /// Notifier running `program` in place of `osascript`.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
            timeout: NOTIFY_TIMEOUT,
        }
    }
}

impl Default for OsaScriptNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for OsaScriptNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), MonitorError> {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            escape_applescript(message),
            escape_applescript(title)
        );
        debug!("Sending notification: title={:?} message={:?}", title, message);

        let mut child = Command::new(&self.program)
            .arg("-e")
            .arg(&script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => MonitorError::Notification(format!(
                    "{} not found; desktop alerts require macOS",
                    self.program
                )),
                _ => MonitorError::Io(e),
            })?;

        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                if status.success() {
                    return Ok(());
                }
                return Err(MonitorError::Notification(format!(
                    "{} exited with {}",
                    self.program, status
                )));
            }
            if started.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(MonitorError::Notification(format!(
                    "{} timed out after {:?}",
                    self.program, self.timeout
                )));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_applescript(r"a\b"), r"a\\b");
        assert_eq!(
            escape_applescript("NOW: 705.38 RM/g vs THEN: 703.37 RM/g (Change: +2.01 RM/g)"),
            "NOW: 705.38 RM/g vs THEN: 703.37 RM/g (Change: +2.01 RM/g)"
        );
    }

    #[test]
    fn test_missing_program() {
        let notifier = OsaScriptNotifier::with_program("gold-monitor-no-such-binary");
        let err = notifier.notify("t", "m").unwrap_err();
        assert!(matches!(err, MonitorError::Notification(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_checked() {
        assert!(OsaScriptNotifier::with_program("true").notify("t", "m").is_ok());
        let err = OsaScriptNotifier::with_program("false").notify("t", "m").unwrap_err();
        assert!(matches!(err, MonitorError::Notification(_)));
    }
}
