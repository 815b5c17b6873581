//! Fixed endpoints and header names for the MPower HTTP API.

/// Live (real-money) API base URL.
pub const LIVE_ENDPOINT: &str = "https://app.mpowerpayments.com/api/v1/";

/// Sandbox (test) API base URL.
pub const SANDBOX_ENDPOINT: &str = "https://app.mpowerpayments.com/sandbox-api/v1/";

/// Header carrying the master key credential.
pub const MASTER_KEY_HEADER: &str = "MP-Master-Key";

/// Header carrying the private key credential.
pub const PRIVATE_KEY_HEADER: &str = "MP-Private-Key";

/// Header carrying the API token credential.
pub const TOKEN_HEADER: &str = "MP-Token";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("mpower-rust/v", env!("CARGO_PKG_VERSION"));
