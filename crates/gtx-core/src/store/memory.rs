//! In-process token store.

use std::sync::RwLock;

use crate::traits::TokenStore;
use crate::{AccessToken, Error, RefreshToken, Result};

#[derive(Debug, Default)]
struct Tokens {
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
}

/// Keeps the token pair in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Tokens>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already known token pair.
    pub fn with_tokens(access_token: AccessToken, refresh_token: Option<RefreshToken>) -> Self {
        Self {
            tokens: RwLock::new(Tokens {
                access_token: Some(access_token),
                refresh_token,
            }),
        }
    }

    fn poisoned() -> Error {
        Error::storage("token store lock poisoned")
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Result<Option<AccessToken>> {
        let tokens = self.tokens.read().map_err(|_| Self::poisoned())?;
        Ok(tokens.access_token.clone())
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        let tokens = self.tokens.read().map_err(|_| Self::poisoned())?;
        Ok(tokens.refresh_token.clone())
    }

    fn set_access_token(&self, token: &AccessToken) -> Result<()> {
        let mut tokens = self.tokens.write().map_err(|_| Self::poisoned())?;
        tokens.access_token = Some(token.clone());
        Ok(())
    }

    fn set_refresh_token(&self, token: &RefreshToken) -> Result<()> {
        let mut tokens = self.tokens.write().map_err(|_| Self::poisoned())?;
        tokens.refresh_token = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut tokens = self.tokens.write().map_err(|_| Self::poisoned())?;
        *tokens = Tokens::default();
        Ok(())
    }
}
