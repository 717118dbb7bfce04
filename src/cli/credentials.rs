//! Credential resolution: flags, positional arguments, then an interactive prompt.

use std::fmt;
use std::io;

use console::Term;

use crate::error::{Error, Result};

/// Number of interactive attempts before giving up.
pub const MAX_PROMPT_ATTEMPTS: usize = 3;

const ATTEMPT_NAMES: [&str; MAX_PROMPT_ATTEMPTS] = ["First", "Second", "Last"];

/// Platform account credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Where the credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Flags,
    Positional,
    Prompt,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Flags => write!(f, "flag input"),
            CredentialSource::Positional => write!(f, "user input"),
            CredentialSource::Prompt => write!(f, "interactive prompt"),
        }
    }
}

/// Raw credential values taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct CredentialArgs {
    pub flag_username: Option<String>,
    pub flag_password: Option<String>,
    pub positional_username: Option<String>,
    pub positional_password: Option<String>,
}

impl CredentialArgs {
    /// Credentials given as `--user`/`--pass`; both must be present.
    fn flag_credentials(&self) -> Option<Credentials> {
        match (&self.flag_username, &self.flag_password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some(Credentials::new(user.clone(), pass.clone()))
            }
            _ => None,
        }
    }

    /// Credentials given as two bare positional arguments.
    fn positional_credentials(&self) -> Option<Credentials> {
        let valid = |value: &str| !value.is_empty() && !value.starts_with('-');
        match (&self.positional_username, &self.positional_password) {
            (Some(user), Some(pass)) if valid(user) && valid(pass) => {
                Some(Credentials::new(user.clone(), pass.clone()))
            }
            _ => None,
        }
    }
}

/// Interactive source of credentials.
pub trait CredentialPrompt {
    fn read_username(&mut self) -> io::Result<String>;

    /// Read the password without echoing it.
    fn read_password(&mut self) -> io::Result<String>;

    fn notice(&mut self, message: &str);
}

/// Prompt on the controlling terminal.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialPrompt for TerminalPrompt {
    fn read_username(&mut self) -> io::Result<String> {
        self.term.write_str("Enter username: ")?;
        self.term.read_line()
    }

    fn read_password(&mut self) -> io::Result<String> {
        self.term
            .write_line("Enter password (will not be displayed)")?;
        self.term.write_str(": ")?;
        self.term.read_secure_line()
    }

    fn notice(&mut self, message: &str) {
        if let Err(e) = self.term.write_line(message) {
            tracing::debug!("Could not write to terminal: {}", e);
        }
    }
}

/// Resolve credentials: flags win over positional arguments, which win over
/// the interactive prompt.
pub fn resolve_credentials(
    args: &CredentialArgs,
    prompt: &mut dyn CredentialPrompt,
) -> Result<(Credentials, CredentialSource)> {
    if let Some(credentials) = args.flag_credentials() {
        return Ok((credentials, CredentialSource::Flags));
    }

    if let Some(credentials) = args.positional_credentials() {
        return Ok((credentials, CredentialSource::Positional));
    }

    let credentials = prompt_credentials(prompt)?;
    Ok((credentials, CredentialSource::Prompt))
}

/// Ask for credentials, allowing [`MAX_PROMPT_ATTEMPTS`] attempts.
pub fn prompt_credentials(prompt: &mut dyn CredentialPrompt) -> Result<Credentials> {
    prompt.notice("Enter your course platform credentials");

    for attempt in ATTEMPT_NAMES {
        let username = prompt.read_username()?;
        let username = username.trim();
        if username.is_empty() {
            prompt.notice("Username cannot be empty, enter username again");
            prompt.notice(&format!("{} attempt failed", attempt));
            continue;
        }

        let password = prompt.read_password()?;
        if password.is_empty() {
            prompt.notice("Password cannot be empty, enter password again");
            prompt.notice(&format!("{} attempt failed", attempt));
            continue;
        }

        return Ok(Credentials::new(username, password));
    }

    Err(Error::MissingCredentials)
}
