//! # CUPS Spooler Transport
//!
//! Sends converted receipts to a print queue through the CUPS command-line
//! tools, and lists the queues that exist.
//!
//! | Tool | Use |
//! |------|-----|
//! | `lpstat -p` | enumerate printers |
//! | `lpr [-P name] [-o raw]` | submit a job on stdin |
//!
//! Jobs are piped to `lpr` directly, so no temporary files are written.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::ThermaltextError;

/// Name used for the system default queue.
pub const DEFAULT_PRINTER: &str = "Default Printer";

/// List the print queues known to the spooler.
///
/// Never fails: when `lpstat` is missing or lists nothing, the result is
/// just [`DEFAULT_PRINTER`].
pub fn list_printers() -> Vec<String> {
    let printers = match Command::new("lpstat").arg("-p").output() {
        Ok(output) => parse_lpstat(&String::from_utf8_lossy(&output.stdout)),
        Err(e) => {
            tracing::warn!(error = %e, "lpstat unavailable");
            Vec::new()
        }
    };
    if printers.is_empty() {
        vec![DEFAULT_PRINTER.to_string()]
    } else {
        printers
    }
}

/// Extract queue names from `lpstat -p` output.
///
/// ```text
/// printer TM-T20 is idle.  enabled since Mon 01 Jan 2024
/// printer Kitchen disabled since Mon 01 Jan 2024 -
/// ```
pub fn parse_lpstat(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.contains("printer"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
        .collect()
}

/// # Spooler Transport
///
/// A print queue reachable through `lpr`.
///
/// ## Example
///
/// ```no_run
/// use thermaltext::{Converter, transport::SpoolTransport};
///
/// let text = Converter::default().convert("<p>Hello</p>");
/// SpoolTransport::new("TM-T20").submit(text.as_bytes(), false)?;
///
/// # Ok::<(), thermaltext::ThermaltextError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoolTransport {
    printer: Option<String>,
}

impl SpoolTransport {
    /// Target a queue by name. Empty or [`DEFAULT_PRINTER`] (any case)
    /// means the system default queue.
    pub fn new(printer: &str) -> Self {
        let printer = printer.trim();
        let printer = if printer.is_empty() || printer.eq_ignore_ascii_case(DEFAULT_PRINTER) {
            None
        } else {
            Some(printer.to_string())
        };
        Self { printer }
    }

    /// The system default queue.
    pub fn default_queue() -> Self {
        Self { printer: None }
    }

    /// Queue name, `None` for the default queue.
    pub fn printer(&self) -> Option<&str> {
        self.printer.as_deref()
    }

    /// Arguments passed to `lpr`.
    pub fn lpr_args(&self, raw: bool) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(printer) = &self.printer {
            args.push("-P".to_string());
            args.push(printer.clone());
        }
        if raw {
            args.push("-o".to_string());
            args.push("raw".to_string());
        }
        args
    }

    /// Submit a job. `raw` asks the spooler to pass bytes through unfiltered
    /// (for ESC/POS framed jobs).
    ///
    /// Blocks until `lpr` exits.
    pub fn submit(&self, data: &[u8], raw: bool) -> Result<(), ThermaltextError> {
        let args = self.lpr_args(raw);
        tracing::info!(
            printer = self.printer().unwrap_or(DEFAULT_PRINTER),
            bytes = data.len(),
            raw,
            "submitting print job"
        );

        let mut command = Command::new("lpr");
        command.args(&args);
        pipe_job(command, data)
    }
}

/// Run `command` with `data` on its stdin and wait for it to exit.
///
/// The child is always reaped, also when writing fails (e.g. it exited
/// without reading everything).
fn pipe_job(mut command: Command, data: &[u8]) -> Result<(), ThermaltextError> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ThermaltextError::Transport(format!("Failed to run {}: {}", program, e)))?;

    // stdin is dropped before waiting so the child sees EOF
    let write_result = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(data),
        None => Ok(()),
    };

    let output = child.wait_with_output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    if let Err(e) = write_result {
        return Err(ThermaltextError::Transport(format!(
            "Failed to send job to {} ({}): {} {}",
            program,
            output.status,
            e,
            stderr.trim()
        )));
    }
    if output.status.success() {
        Ok(())
    } else {
        Err(ThermaltextError::Transport(format!(
            "{} failed ({}): {}",
            program,
            output.status,
            stderr.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lpstat() {
        let out = "printer TM-T20 is idle.  enabled since Mon 01 Jan 2024\n\
                   printer Kitchen disabled since Mon 01 Jan 2024 -\n\
                   \treason unknown\n";
        assert_eq!(parse_lpstat(out), vec!["TM-T20", "Kitchen"]);
    }

    #[test]
    fn test_parse_lpstat_empty() {
        assert!(parse_lpstat("").is_empty());
        assert!(parse_lpstat("lpstat: No destinations added.\n").is_empty());
    }

    #[test]
    fn test_default_printer_names() {
        assert_eq!(SpoolTransport::new("Default Printer").printer(), None);
        assert_eq!(SpoolTransport::new("default printer").printer(), None);
        assert_eq!(SpoolTransport::new("  ").printer(), None);
        assert_eq!(SpoolTransport::new("TM-T20").printer(), Some("TM-T20"));
    }

    #[test]
    fn test_lpr_args() {
        assert!(SpoolTransport::default_queue().lpr_args(false).is_empty());
        assert_eq!(
            SpoolTransport::new("TM-T20").lpr_args(true),
            vec!["-P", "TM-T20", "-o", "raw"]
        );
    }

    #[cfg(unix)]
    fn shell(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.args(["-c", script]);
        command
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_job_success() {
        assert!(pipe_job(shell("cat > /dev/null"), b"HELLO\n").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_job_reports_exit_status() {
        let err = pipe_job(shell("cat > /dev/null; echo no queue >&2; exit 2"), b"x").unwrap_err();
        assert!(matches!(&err, ThermaltextError::Transport(msg) if msg.contains("no queue")));
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_job_child_exits_without_reading() {
        let data = vec![b'x'; 4 * 1024 * 1024];
        let err = pipe_job(shell("exit 0"), &data).unwrap_err();
        assert!(matches!(&err, ThermaltextError::Transport(msg) if msg.starts_with("Failed to send job to sh")));
    }
}
