/*!
 * Clipboard sink for clip4llm
 *
 * Copies text by piping it into whichever clipboard command the platform
 * offers. Providers are tried in order of preference until one succeeds.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Anything that can receive the assembled output
pub trait Clipboard {
    /// Copy text to the clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// Clipboard command line tools, in no particular order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOS,
    Wsl,
    Termux,
}

impl ClipboardProvider {
    /// Program and arguments that read the clipboard text from stdin
    pub fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Wsl => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }
}

impl Clipboard for ClipboardProvider {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        pipe_to_command(cmd, args, text)
    }
}

/// The system clipboard, resolved to the first provider that works
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    providers: Vec<ClipboardProvider>,
}

impl SystemClipboard {
    /// Detect the providers available on this machine
    pub fn detect() -> Self {
        Self {
            providers: detect_providers(),
        }
    }

    pub fn providers(&self) -> &[ClipboardProvider] {
        &self.providers
    }
}

impl Clipboard for SystemClipboard {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let mut last_error = None;
        for provider in &self.providers {
            match provider.copy_to_clipboard(text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    log::debug!("Clipboard provider {:?} failed: {}", provider, e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or(ClipboardError::NoClipboardFound))
    }
}

/// Copy text to the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    SystemClipboard::detect().copy_to_clipboard(text)
}

/// Check whether `command` is an executable file on the PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

/// Platforms with distinct clipboard tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    MacOS,
    Windows,
    Wsl,
    Linux,
    Android,
    Unknown,
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

fn platform() -> Platform {
    *PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "linux") {
            if env::var_os("WSL_DISTRO_NAME").is_some() {
                Platform::Wsl
            } else {
                Platform::Linux
            }
        } else {
            Platform::Unknown
        }
    })
}

/// Providers to try, most preferred first
fn detect_providers() -> Vec<ClipboardProvider> {
    let candidates: &[ClipboardProvider] = match platform() {
        Platform::MacOS => &[ClipboardProvider::MacOS],
        Platform::Windows | Platform::Wsl => &[ClipboardProvider::Wsl],
        Platform::Linux => &[
            ClipboardProvider::Wayland,
            ClipboardProvider::Xsel,
            ClipboardProvider::Xclip,
        ],
        Platform::Android => &[ClipboardProvider::Termux],
        Platform::Unknown => &[],
    };

    // tmux goes first when we are inside a session
    let mut providers = Vec::with_capacity(candidates.len() + 1);
    if env::var_os("TMUX").is_some() && command_exists("tmux") {
        providers.push(ClipboardProvider::Tmux);
    }
    providers.extend(
        candidates
            .iter()
            .copied()
            .filter(|p| command_exists(p.command().0)),
    );
    providers
}

fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    {
        let stdin = child.stdin.as_mut().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin.write_all(text.as_bytes())?;
    }
    // Close stdin so the tool sees EOF
    drop(child.stdin.take());

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}
