//! # API Facade
//!
//! [`ThoughtzApi`] is the single entry point for all thought operations,
//! regardless of the UI driving it. It owns the [`Session`] and both store
//! adapters, and decides the routing — local slots in guest mode, remote
//! collection when signed in — in exactly one place, so call sites can never
//! drift out of sync on the mode branching.
//!
//! ## What the facade does
//!
//! - **Routes** each operation to the active [`ThoughtStore`]
//! - **Validates inputs** at the boundary (non-empty title/content)
//! - **Normalizes records**: stamps the creation date, injects the session's
//!   owner id, dedups tags
//! - **Fails soft on read paths the UI must survive**: the discovery feed
//!   falls back to the sample set instead of surfacing an error
//!
//! ## What it does NOT do
//!
//! - Presentation: it returns data, never strings for a screen
//! - Retries: a failed write propagates once and is not reattempted
//! - Cross-store migration: guest records never move to an account
//!
//! ## Routing rule
//!
//! Guest mode, or no signed-in user, routes to the local store. Only a
//! signed-in, non-guest session touches the remote store; being signed in
//! without a configured remote is a hard error rather than a silent
//! fallback, so records can never land in the wrong world.

use crate::config::GatewayConfig;
use crate::draft::{self, Draft};
use crate::error::{Result, ThoughtzError};
use crate::model::{Thought, ThoughtPatch};
use crate::sample::sample_thoughts;
use crate::session::{Session, UserInfo};
use crate::store::fs_slot::FsSlots;
use crate::store::local::LocalStore;
use crate::store::remote::RemoteStore;
use crate::store::slot::SlotBackend;
use crate::store::ThoughtStore;
use log::warn;

pub struct ThoughtzApi<B: SlotBackend> {
    slots: B,
    session: Session<B>,
    local: LocalStore<B>,
    remote: Option<Box<dyn ThoughtStore>>,
}

impl ThoughtzApi<FsSlots> {
    /// Open the gateway with filesystem slots in the configured data
    /// directory, wiring up the remote store when one is configured.
    pub fn open(config: &GatewayConfig) -> Result<Self> {
        let slots = FsSlots::new(config.data_dir()?);
        let mut api = Self::new(slots);
        if let Some(remote) = &config.remote {
            api = api.with_remote(Box::new(RemoteStore::new(remote)?));
        }
        Ok(api)
    }
}

impl<B: SlotBackend + Clone> ThoughtzApi<B> {
    pub fn new(slots: B) -> Self {
        Self {
            session: Session::load(slots.clone()),
            local: LocalStore::new(slots.clone()),
            remote: None,
            slots,
        }
    }
}

impl<B: SlotBackend> ThoughtzApi<B> {
    pub fn with_remote(mut self, remote: Box<dyn ThoughtStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    // --- Session lifecycle ---

    pub fn session(&self) -> &Session<B> {
        &self.session
    }

    pub fn enter_guest_mode(&mut self) -> Result<()> {
        self.session.enable_guest_mode()
    }

    pub fn leave_guest_mode(&mut self) -> Result<()> {
        self.session.disable_guest_mode()
    }

    pub fn sign_in(&mut self, user: UserInfo) -> Result<()> {
        self.session.sign_in(user)
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out()
    }

    // --- Routing ---

    fn routes_local(&self) -> bool {
        self.session.is_guest_mode() || self.session.current_user().is_none()
    }

    fn store(&self) -> Result<&dyn ThoughtStore> {
        if self.routes_local() {
            Ok(&self.local)
        } else {
            self.remote.as_deref().ok_or_else(no_remote)
        }
    }

    fn store_mut(&mut self) -> Result<&mut (dyn ThoughtStore + '_)> {
        if self.routes_local() {
            Ok(&mut self.local)
        } else {
            match self.remote.as_deref_mut() {
                Some(store) => Ok(store),
                None => Err(no_remote()),
            }
        }
    }

    // --- Operations ---

    /// Turn a draft into a persisted record owned by the current session.
    /// Clears the autosaved draft slot on success.
    pub fn create_thought(&mut self, draft: Draft) -> Result<Thought> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ThoughtzError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        let content = draft.content.trim();
        if content.is_empty() {
            return Err(ThoughtzError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        let owner = self.session.owner_id().to_string();
        let mut thought = Thought::new(owner, title, content, draft.tags);
        thought.id = self.store_mut()?.create(&thought)?;

        if let Err(e) = draft::clear_draft(&self.slots) {
            warn!("failed to clear draft after save: {}", e);
        }
        Ok(thought)
    }

    /// The current owner's thoughts, newest first.
    pub fn list_thoughts(&self) -> Result<Vec<Thought>> {
        self.store()?.list(self.session.owner_id())
    }

    pub fn get_thought(&self, id: &str) -> Result<Thought> {
        self.store()?.get(id)
    }

    /// Merge a partial edit into an existing record. The creation date is
    /// never touched.
    pub fn edit_thought(&mut self, id: &str, patch: ThoughtPatch) -> Result<Thought> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(ThoughtzError::Validation(
                    "title must not be empty".to_string(),
                ));
            }
        }
        if let Some(content) = &patch.content {
            if content.trim().is_empty() {
                return Err(ThoughtzError::Validation(
                    "content must not be empty".to_string(),
                ));
            }
        }
        self.store_mut()?.update(id, &patch)?;
        self.store()?.get(id)
    }

    pub fn delete_thought(&mut self, id: &str) -> Result<()> {
        self.store_mut()?.delete(id)
    }

    /// Flip the favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let flag = !self.store()?.get(id)?.favorite;
        self.store_mut()?.update(id, &ThoughtPatch::favorite(flag))?;
        Ok(flag)
    }

    /// Flip the public flag, returning the new value.
    pub fn toggle_public(&mut self, id: &str) -> Result<bool> {
        let flag = !self.store()?.get(id)?.public;
        self.store_mut()?.update(id, &ThoughtPatch::public(flag))?;
        Ok(flag)
    }

    /// The discovery feed: the active store's public records, newest first,
    /// or the fixed sample set when the query fails or comes back empty.
    pub fn explore(&self) -> Vec<Thought> {
        let feed = self.store().and_then(|s| s.list_public());
        match feed {
            Ok(thoughts) if !thoughts.is_empty() => thoughts,
            Ok(_) => sample_thoughts(),
            Err(e) => {
                warn!("public query failed, falling back to samples: {}", e);
                sample_thoughts()
            }
        }
    }

    // --- Draft autosave ---

    /// Autosave the in-progress draft. A blank draft clears the slot
    /// instead, so backing out of the composer leaves nothing to restore.
    pub fn save_draft(&self, draft: &Draft) -> Result<()> {
        if draft.is_blank() {
            return draft::clear_draft(&self.slots);
        }
        draft::save_draft(&self.slots, draft)
    }

    pub fn load_draft(&self) -> Option<Draft> {
        draft::load_draft(&self.slots)
    }

    pub fn clear_draft(&self) -> Result<()> {
        draft::clear_draft(&self.slots)
    }
}

fn no_remote() -> ThoughtzError {
    ThoughtzError::Store("signed in but no remote store is configured".to_string())
}
