use crate::error::{QuoteError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// A clipboard program and its arguments; text is written to its stdin.
type ClipboardCommand = (&'static str, &'static [&'static str]);

/// Clipboard programs to try, in order, for the current platform.
/// - macOS: pbcopy
/// - Linux: wl-copy (Wayland), xclip, xsel
/// - Windows: clip.exe
#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[ClipboardCommand] = &[("pbcopy", &[])];

#[cfg(target_os = "linux")]
const CLIPBOARD_COMMANDS: &[ClipboardCommand] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "windows")]
const CLIPBOARD_COMMANDS: &[ClipboardCommand] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CLIPBOARD_COMMANDS: &[ClipboardCommand] = &[];

/// Copies text to the system clipboard using the first clipboard program
/// that can be started.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let candidates = CLIPBOARD_COMMANDS;
    if candidates.is_empty() {
        return Err(QuoteError::Api(
            "Clipboard not supported on this platform".to_string(),
        ));
    }

    let mut last_error = None;
    for (program, args) in candidates {
        match pipe_to(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!("{} failed: {}", program, e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| QuoteError::Api("No clipboard program found".to_string())))
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| QuoteError::Api(format!("Failed to spawn {}: {}", program, e)))?;

    // stdin is dropped before waiting so the child sees EOF.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    let status = child
        .wait()
        .map_err(|e| QuoteError::Api(format!("Failed to wait for {}: {}", program, e)))?;
    written.map_err(|e| QuoteError::Api(format!("Failed to write to {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(QuoteError::Api(format!("{} exited with error", program)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
    #[test]
    fn test_platform_has_candidates() {
        assert!(!CLIPBOARD_COMMANDS.is_empty());
    }

    #[test]
    fn test_missing_program_is_api_error() {
        let err = pipe_to("quotebook-no-such-clipboard", &[], "x").unwrap_err();
        assert!(matches!(err, QuoteError::Api(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_reader_that_exits_early_is_reaped() {
        // `true` never reads, so a payload larger than the pipe buffer fails.
        let text = "名".repeat(1 << 20);
        let err = pipe_to("true", &[], &text).unwrap_err();
        assert!(err.to_string().contains("Failed to write to true"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_pipe() {
        pipe_to("cat", &[], "路漫漫其修远兮").unwrap();
    }
}
