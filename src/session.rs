//! # Session State
//!
//! One state-owning module for the guest-mode flag and the authenticated
//! identity, injected into the api facade instead of living in a global.
//!
//! Guest mode and an authenticated identity are mutually exclusive in steady
//! state: [`Session::sign_in`] clears the guest flag before installing the
//! identity, and [`Session::enable_guest_mode`] drops any identity. The flag
//! is persisted in its own slot so a restart comes back in the same mode.
//! The identity itself is not persisted here — credential storage belongs to
//! the external auth provider.

use crate::error::Result;
use crate::model::GUEST_USER_ID;
use crate::store::slot::{Slot, SlotBackend};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    Apple,
    Google,
}

/// The authenticated identity, opaque to the storage layer beyond its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub login_method: Option<LoginMethod>,
}

impl UserInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            login_method: None,
        }
    }
}

pub struct Session<B: SlotBackend> {
    slots: B,
    guest: bool,
    user: Option<UserInfo>,
}

impl<B: SlotBackend> Session<B> {
    /// Initialize from the persisted flag. A missing or corrupt flag reads
    /// as "not guest".
    pub fn load(slots: B) -> Self {
        let guest = match slots.read(Slot::GuestMode) {
            Ok(Some(raw)) => match serde_json::from_str::<bool>(&raw) {
                Ok(flag) => flag,
                Err(e) => {
                    warn!("guest mode flag is corrupt, assuming false: {}", e);
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                warn!("failed to read guest mode flag: {}", e);
                false
            }
        };
        Self {
            slots,
            guest,
            user: None,
        }
    }

    pub fn is_guest_mode(&self) -> bool {
        self.guest
    }

    pub fn current_user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// The owner id for records created in this session: the signed-in
    /// user's id, or `"guest"`.
    pub fn owner_id(&self) -> &str {
        match &self.user {
            Some(user) => &user.id,
            None => GUEST_USER_ID,
        }
    }

    /// Flip into guest mode and persist the flag. Drops any identity.
    pub fn enable_guest_mode(&mut self) -> Result<()> {
        self.user = None;
        self.guest = true;
        self.slots.write(Slot::GuestMode, "true")
    }

    /// Leave guest mode and clear the persisted flag.
    pub fn disable_guest_mode(&mut self) -> Result<()> {
        self.guest = false;
        self.slots.clear(Slot::GuestMode)
    }

    /// Install an authenticated identity. Guest mode is cleared first so the
    /// two states never persist together.
    pub fn sign_in(&mut self, user: UserInfo) -> Result<()> {
        if self.guest {
            self.disable_guest_mode()?;
        }
        self.user = Some(user);
        Ok(())
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}
