//! Command-line interface: argument parsing and credential resolution.

pub mod args;
pub mod credentials;

pub use args::Args;
pub use credentials::{
    prompt_credentials, resolve_credentials, CredentialArgs, CredentialPrompt, CredentialSource,
    Credentials, TerminalPrompt,
};
