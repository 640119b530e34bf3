use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use serde::Deserialize;

use crate::{
    foundation::error::{XenftError, XenftResult},
    mint::asset::{ChainTokenData, XenftAsset},
};

/// Read access to token data on chain.
pub trait ChainSource {
    /// Raw token data for `token_id`.
    fn fetch_token(&self, token_id: u64) -> XenftResult<ChainTokenData>;
}

/// Chain source serving canned token data.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FixtureChain {
    tokens: BTreeMap<u64, ChainTokenData>,
}

impl FixtureChain {
    /// Empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the data for one token.
    pub fn with_token(mut self, token_id: u64, data: ChainTokenData) -> Self {
        self.tokens.insert(token_id, data);
        self
    }

    /// Load `{"tokens": {"<id>": {...}}}` from a JSON file.
    pub fn from_json_file(path: &Path) -> XenftResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read fixture '{}'", path.display()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl ChainSource for FixtureChain {
    fn fetch_token(&self, token_id: u64) -> XenftResult<ChainTokenData> {
        self.tokens
            .get(&token_id)
            .cloned()
            .ok_or_else(|| XenftError::session(format!("token {token_id} not found")))
    }
}

/// Lifecycle state of a [`Session`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No account connected.
    Disconnected,
    /// Connected as `account`.
    Active {
        /// Connected account address.
        account: String,
    },
}

/// Explicit connection session: `connect -> active -> disconnect`.
///
/// Everything that reads from the chain takes the session by reference.
#[derive(Debug)]
pub struct Session<S> {
    source: S,
    state: SessionState,
}

impl<S: ChainSource> Session<S> {
    /// Disconnected session over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: SessionState::Disconnected,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether the session is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    /// Connected account, if active.
    pub fn account(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active { account } => Some(account),
            SessionState::Disconnected => None,
        }
    }

    /// Activate the session for `account`.
    #[tracing::instrument(skip(self))]
    pub fn connect(&mut self, account: &str) -> XenftResult<()> {
        let account = account.trim();
        if account.is_empty() {
            return Err(XenftError::validation("account must not be empty"));
        }
        if let SessionState::Active { account: current } = &self.state {
            return Err(XenftError::session(format!(
                "already connected as {current}"
            )));
        }
        self.state = SessionState::Active {
            account: account.to_owned(),
        };
        tracing::info!("session connected");
        Ok(())
    }

    /// Return to the disconnected state. Returns whether the session was active.
    pub fn disconnect(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = SessionState::Disconnected;
        if was_active {
            tracing::info!("session disconnected");
        }
        was_active
    }

    /// Read one token and validate it into a typed asset.
    #[tracing::instrument(skip(self))]
    pub fn fetch_asset(&self, token_id: u64) -> XenftResult<XenftAsset> {
        if !self.is_active() {
            return Err(XenftError::session("session is not connected"));
        }
        if token_id == 0 {
            return Err(XenftError::validation("token id must be positive"));
        }
        let data = self.source.fetch_token(token_id)?;
        Ok(XenftAsset::from_chain(token_id, &data))
    }

    /// Read several tokens; each id gets its own result.
    pub fn fetch_assets(&self, token_ids: &[u64]) -> Vec<XenftResult<XenftAsset>> {
        token_ids.iter().map(|id| self.fetch_asset(*id)).collect()
    }

    /// Close the session and hand back the source.
    pub fn into_source(self) -> S {
        self.source
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chain/session.rs"]
mod tests;
