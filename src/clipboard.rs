use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;

use crate::error::ClipboardError;

/// Anything that can take a block of text and put it on a clipboard.
pub trait ClipboardSink {
    fn name(&self) -> &'static str;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes text into a platform clipboard utility.
#[derive(Clone, Debug)]
pub struct CommandClipboard {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandClipboard {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    /// Picks the utility matching the running desktop, if it is installed.
    pub fn detect() -> Option<Self> {
        let candidate = if cfg!(target_os = "macos") {
            Self::new("pbcopy", &[])
        } else if cfg!(target_os = "windows") {
            Self::new("clip", &[])
        } else if env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", &[])
        } else if env::var_os("DISPLAY").is_some() {
            Self::new("xclip", &["-selection", "clipboard"])
        } else {
            return None;
        };
        if program_on_path(candidate.program) {
            Some(candidate)
        } else {
            debug!("clipboard tool `{}` not found on PATH", candidate.program);
            None
        }
    }
}

impl ClipboardSink for CommandClipboard {
    fn name(&self) -> &'static str {
        self.program
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ClipboardError::Spawn {
                program: self.program,
                source,
            })?;
        let written = child
            .stdin
            .take()
            .ok_or(ClipboardError::Unavailable)
            .and_then(|mut stdin| stdin.write_all(text.as_bytes()).map_err(ClipboardError::from));
        // The pipe is closed by now, so the child always gets reaped.
        let status = child.wait()?;
        written?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::ToolFailed {
                program: self.program,
                status,
            })
        }
    }
}

fn program_on_path(program: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(program);
        candidate.is_file() || candidate.with_extension("exe").is_file()
    })
}

/// Fallback: asks the terminal to set the clipboard with an OSC 52 escape.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Primary backend when a clipboard tool is available, OSC 52 on stdout otherwise.
pub fn detect_clipboard() -> Box<dyn ClipboardSink> {
    match CommandClipboard::detect() {
        Some(primary) => Box::new(primary),
        None => Box::new(Osc52Clipboard::new(io::stdout())),
    }
}
