//! Client configuration: operating mode and API credentials.
//!
//! Configuration is assembled once by the embedding application and handed
//! to the transaction client at construction time. Nothing in this crate
//! reads or writes process-global state; two clients with different
//! configurations coexist freely in one process.

use std::env;

/// Environment variable selecting the operating mode (`live` or `sandbox`).
pub const MODE_VAR: &str = "MPOWER_MODE";

/// Environment variable holding the master key.
pub const MASTER_KEY_VAR: &str = "MPOWER_MASTER_KEY";

/// Environment variable holding the private key.
pub const PRIVATE_KEY_VAR: &str = "MPOWER_PRIVATE_KEY";

/// Environment variable holding the API token.
pub const TOKEN_VAR: &str = "MPOWER_TOKEN";

/// Gateway environment transactions are sent to.
///
/// Selects between the live and sandbox base URLs. Defaults to
/// [`Mode::Live`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Real-money endpoint.
    #[default]
    Live,
    /// Test endpoint; no money moves.
    Sandbox,
}

impl Mode {
    /// Returns `true` for the sandbox environment.
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

/// API credential set, sent as request headers on every transaction.
///
/// All three tokens are opaque strings issued by the gateway dashboard.
/// Absent credentials are omitted from the request; the client performs no
/// credential validation of its own — the gateway is the authority on what
/// is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// `MP-Master-Key` header value.
    pub master_key: Option<String>,
    /// `MP-Private-Key` header value.
    pub private_key: Option<String>,
    /// `MP-Token` header value.
    pub token: Option<String>,
}

impl Credentials {
    /// Creates a credential set with all three tokens present.
    #[must_use]
    pub fn new(
        master_key: impl Into<String>,
        private_key: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            master_key: Some(master_key.into()),
            private_key: Some(private_key.into()),
            token: Some(token.into()),
        }
    }
}

/// Immutable client configuration: operating mode plus credentials.
///
/// # Example
///
/// ```rust
/// use mpower::{Config, Credentials};
///
/// let config = Config::sandbox(Credentials::new("master", "private", "token"));
/// assert!(config.mode.is_sandbox());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Gateway environment requests are sent to.
    pub mode: Mode,
    /// Credential headers attached to every request.
    pub credentials: Credentials,
}

impl Config {
    /// Creates a configuration for the given mode and credentials.
    #[must_use]
    pub const fn new(mode: Mode, credentials: Credentials) -> Self {
        Self { mode, credentials }
    }

    /// Creates a live configuration.
    #[must_use]
    pub const fn live(credentials: Credentials) -> Self {
        Self::new(Mode::Live, credentials)
    }

    /// Creates a sandbox configuration.
    #[must_use]
    pub const fn sandbox(credentials: Credentials) -> Self {
        Self::new(Mode::Sandbox, credentials)
    }

    /// Reads configuration from [`MODE_VAR`], [`MASTER_KEY_VAR`],
    /// [`PRIVATE_KEY_VAR`], and [`TOKEN_VAR`].
    ///
    /// Unset credential variables stay absent; any mode value other than
    /// `sandbox` (case-insensitive) selects live.
    #[must_use]
    pub fn from_env() -> Self {
        let mode = match env::var(MODE_VAR) {
            Ok(value) if value.eq_ignore_ascii_case("sandbox") => Mode::Sandbox,
            _ => Mode::Live,
        };
        Self {
            mode,
            credentials: Credentials {
                master_key: env::var(MASTER_KEY_VAR).ok(),
                private_key: env::var(PRIVATE_KEY_VAR).ok(),
                token: env::var(TOKEN_VAR).ok(),
            },
        }
    }
}
