//! Request body signing.
//!
//! Every request carries a `sign` query parameter: the lowercase hex
//! HMAC-SHA1 of the exact body bytes, keyed with the hex-decoded API key.
//! The server replicates the computation, so the algorithm is part of the
//! wire contract.

use std::fmt;

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

/// Query parameter holding the body signature.
pub const SIGNATURE_PARAM: &str = "sign";

/// Signs request bodies with a pre-decoded secret key.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha1,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Signer {
    /// Creates a signer from a hex-encoded key.
    ///
    /// An odd-length key is completed with a trailing `0` nibble, so `"abc"`
    /// decodes to the bytes `ab c0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key contains non-hex characters.
    pub fn from_hex(hex_key: &str) -> Result<Self> {
        let key = if hex_key.len() % 2 == 1 {
            hex::decode(format!("{hex_key}0"))
        } else {
            hex::decode(hex_key)
        }
        .map_err(|e| Error::invalid_key(e.to_string()))?;
        let mac = HmacSha1::new_from_slice(&key).map_err(|e| Error::invalid_key(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Lowercase hex HMAC-SHA1 of `body`.
    #[must_use]
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Signs `body` with a hex-encoded key.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if the key is not valid hex.
///
/// # Example
///
/// ```
/// let signature = sigrest_core::sign(b"", "00ff").expect("valid key");
/// assert_eq!(signature.len(), 40);
/// ```
pub fn sign(body: &[u8], hex_key: &str) -> Result<String> {
    Ok(Signer::from_hex(hex_key)?.sign(body))
}

/// API credentials: the `TOKEN` sent in `Authorization` and the signing key.
#[derive(Clone)]
pub struct Credentials {
    api_token: String,
    signer: Signer,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("signer", &self.signer)
            .finish()
    }
}

impl Credentials {
    /// Creates credentials from a token and a hex-encoded key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key is not valid hex.
    pub fn new(api_token: impl Into<String>, hex_key: &str) -> Result<Self> {
        Ok(Self {
            api_token: api_token.into(),
            signer: Signer::from_hex(hex_key)?,
        })
    }

    /// The API token.
    #[must_use]
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("TOKEN {}", self.api_token)
    }

    /// The body signer.
    #[must_use]
    pub const fn signer(&self) -> &Signer {
        &self.signer
    }
}
