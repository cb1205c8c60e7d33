//! Token signing secret loading and validation.
//!
//! The secret is read from a file whose path comes from [`AppSettings`].
//! Debug builds, or deployments that opt in explicitly, fall back to a
//! random per-process secret when the file cannot be read; credentials minted
//! with it do not survive a restart.
//!
//! [`AppSettings`]: crate::settings::AppSettings

pub mod fingerprint;

use std::path::{Path, PathBuf};

use rand::RngCore;
use tracing::{info, warn};
use zeroize::Zeroizing;

use self::fingerprint::secret_fingerprint;

/// Default location of the mounted signing secret.
pub const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
/// Release builds refuse secrets shorter than this.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate short secrets and missing files.
    Debug,
    /// Release builds require a readable secret of adequate length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use marketplace::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Signing secret; wiped from memory on drop.
pub struct TokenSecret {
    bytes: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl TokenSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True when the secret was generated for this process only.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Short hex fingerprint for logs.
    pub fn fingerprint(&self) -> String {
        secret_fingerprint(&self.bytes)
    }
}

/// Errors raised while loading the signing secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// Reading the secret file failed and no fallback is allowed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// The secret file is empty.
    #[error("token secret at {path} is empty")]
    SecretEmpty { path: PathBuf },
}

/// Load the signing secret from `path`.
///
/// Trailing newlines are stripped so secrets written with `echo` work.
///
/// # Examples
///
/// ```rust
/// use marketplace::inbound::http::token_config::{BuildMode, load_token_secret};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&path, vec![b'a'; 32])?;
///
/// let secret = load_token_secret(&path, false, BuildMode::Release)?;
/// assert!(!secret.is_ephemeral());
///
/// std::fs::remove_file(&path)?;
/// # Ok(())
/// # }
/// ```
pub fn load_token_secret(
    path: &Path,
    allow_ephemeral: bool,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    match std::fs::read(path) {
        Ok(raw) => {
            let mut bytes = Zeroizing::new(raw);
            while bytes.last().is_some_and(|b| *b == b'\n' || *b == b'\r') {
                bytes.pop();
            }
            let length = bytes.len();
            if length == 0 {
                return Err(TokenConfigError::SecretEmpty {
                    path: path.to_path_buf(),
                });
            }
            if mode == BuildMode::Release && length < TOKEN_SECRET_MIN_LEN {
                return Err(TokenConfigError::SecretTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: TOKEN_SECRET_MIN_LEN,
                });
            }
            let secret = TokenSecret {
                bytes,
                ephemeral: false,
            };
            info!(
                path = %path.display(),
                fingerprint = %secret.fingerprint(),
                "token secret loaded"
            );
            Ok(secret)
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only)"
                );
                Ok(ephemeral_secret())
            } else {
                Err(TokenConfigError::SecretRead {
                    path: path.to_path_buf(),
                    source: error,
                })
            }
        }
    }
}

fn ephemeral_secret() -> TokenSecret {
    let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    rand::thread_rng().fill_bytes(&mut bytes);
    TokenSecret {
        bytes,
        ephemeral: true,
    }
}
