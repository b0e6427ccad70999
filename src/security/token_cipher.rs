//! At-rest protection for the session token.
//!
//! The token is sealed with ChaCha20-Poly1305 under a per-install key kept in
//! the state directory. The account the token belongs to is bound in as
//! associated data, so a token cannot be opened under another user profile.

use anyhow::{Context, Result, bail};
use chacha20poly1305::aead::{Aead, AeadCore, OsRng, Payload, rand_core::RngCore};
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const KEY_FILE: &str = "session.key";
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// The token as written to `session.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredToken {
    Sealed { nonce: String, sealed: String },
    Plain(String),
}

impl StoredToken {
    pub fn is_sealed(&self) -> bool {
        matches!(self, Self::Sealed { .. })
    }
}

pub struct TokenCipher {
    key_path: PathBuf,
}

impl TokenCipher {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            key_path: state_dir.join(KEY_FILE),
        }
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    pub fn seal(&self, token: &str, account: &str) -> Result<StoredToken> {
        let cipher = self.cipher()?;
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let sealed = cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: token.as_bytes(),
                    aad: account.as_bytes(),
                },
            )
            .map_err(|_| anyhow::anyhow!("failed to seal session token"))?;

        Ok(StoredToken::Sealed {
            nonce: hex::encode(nonce),
            sealed: hex::encode(sealed),
        })
    }

    /// Plain tokens pass through, so a session saved with encryption off still loads.
    pub fn open(&self, stored: &StoredToken, account: &str) -> Result<String> {
        let (nonce, sealed) = match stored {
            StoredToken::Plain(token) => return Ok(token.clone()),
            StoredToken::Sealed { nonce, sealed } => (nonce, sealed),
        };

        let nonce = hex::decode(nonce).context("session token nonce is not valid hex")?;
        if nonce.len() != NONCE_LEN {
            bail!("session token nonce has {} bytes, expected {NONCE_LEN}", nonce.len());
        }
        let sealed = hex::decode(sealed).context("sealed session token is not valid hex")?;

        let plain = Zeroizing::new(
            self.cipher()?
                .decrypt(
                    Nonce::from_slice(&nonce),
                    Payload {
                        msg: &sealed,
                        aad: account.as_bytes(),
                    },
                )
                .map_err(|_| {
                    anyhow::anyhow!("session token does not open for this account")
                })?,
        );
        String::from_utf8(plain.to_vec()).context("session token is not UTF-8")
    }

    fn cipher(&self) -> Result<ChaCha20Poly1305> {
        let key = self.load_or_create_key()?;
        Ok(ChaCha20Poly1305::new(Key::from_slice(key.as_slice())))
    }

    fn load_or_create_key(&self) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        if self.key_path.exists() {
            return self.read_key();
        }
        if let Some(dir) = self.key_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(key.as_mut_slice());
        match self.write_key(&key) {
            Ok(()) => Ok(key),
            // Lost a creation race; the winner's key is the one on disk.
            Err(error) if error.kind() == ErrorKind::AlreadyExists => self.read_key(),
            Err(error) => Err(error).with_context(|| {
                format!("Failed to write key file: {}", self.key_path.display())
            }),
        }
    }

    fn read_key(&self) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        let encoded = Zeroizing::new(
            fs::read_to_string(&self.key_path)
                .with_context(|| format!("Failed to read key file: {}", self.key_path.display()))?,
        );
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        hex::decode_to_slice(encoded.trim(), key.as_mut_slice())
            .with_context(|| format!("Key file is corrupt: {}", self.key_path.display()))?;
        Ok(key)
    }

    fn write_key(&self, key: &[u8; KEY_LEN]) -> std::io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.key_path)?;
        file.write_all(Zeroizing::new(hex::encode(key)).as_bytes())?;
        file.sync_all()
    }
}
