//! On-disk wallet persistence

use super::Wallet;
use crate::{BlockrunError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Preferred key file name
pub const SESSION_FILE: &str = ".session";

/// Key file name used by older releases
pub const LEGACY_KEY_FILE: &str = "wallet.key";

/// Environment variables consulted by [`WalletStore::get_or_create`], in priority order
pub const WALLET_KEY_ENV_VARS: [&str; 2] = ["BLOCKRUN_WALLET_KEY", "BASE_CHAIN_WALLET_KEY"];

/// A resolved wallet and where it came from
#[derive(Clone)]
pub struct WalletInfo {
    pub private_key: String,
    pub address: String,
    /// True when the key was generated by this call
    pub is_new: bool,
}

impl std::fmt::Debug for WalletInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletInfo")
            .field("address", &self.address)
            .field("is_new", &self.is_new)
            .finish_non_exhaustive()
    }
}

/// Key storage rooted at an explicit directory
#[derive(Debug, Clone)]
pub struct WalletStore {
    dir: PathBuf,
}

impl WalletStore {
    /// Store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `$HOME/.blockrun`
    pub fn default_location() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .ok_or_else(|| BlockrunError::config("HOME is not set"))?;
        Ok(Self::new(PathBuf::from(home).join(".blockrun")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the preferred key file
    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Write `private_key` to the session file, readable by the owner only
    pub fn save(&self, private_key: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.session_path();
        fs::write(&path, private_key)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "Saved wallet key");
        Ok(path)
    }

    /// Load a stored key, trying the session file then the legacy file
    pub fn load(&self) -> Option<String> {
        [SESSION_FILE, LEGACY_KEY_FILE].iter().find_map(|name| {
            fs::read_to_string(self.dir.join(name))
                .ok()
                .map(|contents| contents.trim().to_string())
                .filter(|key| !key.is_empty())
        })
    }

    /// Resolve a wallet from the environment, then disk, else create and save one
    pub fn get_or_create(&self) -> Result<WalletInfo> {
        let env_key = WALLET_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty());
        self.get_or_create_with(env_key)
    }

    /// Same as [`WalletStore::get_or_create`] with the environment lookup already done
    pub fn get_or_create_with(&self, env_key: Option<String>) -> Result<WalletInfo> {
        if let Some(key) = env_key.or_else(|| self.load()) {
            let address = address_from_key(&key)?;
            return Ok(WalletInfo {
                private_key: key,
                address,
                is_new: false,
            });
        }

        let wallet = Wallet::random()?;
        let private_key = wallet.private_key_hex();
        self.save(&private_key)?;
        tracing::info!(address = %wallet.address(), "Created new wallet");

        Ok(WalletInfo {
            private_key,
            address: wallet.address(),
            is_new: true,
        })
    }
}

/// Derive the checksummed address of a hex private key
pub fn address_from_key(private_key: &str) -> Result<String> {
    Ok(Wallet::from_private_key(private_key)?.address())
}
