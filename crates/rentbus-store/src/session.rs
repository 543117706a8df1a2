//! Admin session flag

use crate::kv::KeyValueStore;
use rentbus_types::Result;

/// Key holding the admin session flag
pub const ADMIN_AUTH_KEY: &str = "rentbus_admin_auth";

/// Admin login state kept in a key-value store
pub struct AdminSession<S> {
    kv: S,
}

impl<S: KeyValueStore> AdminSession<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Read failures count as logged out
    pub fn is_authenticated(&self) -> bool {
        matches!(self.kv.get(ADMIN_AUTH_KEY), Ok(Some(ref v)) if v == "true")
    }

    pub fn login(&self) -> Result<()> {
        self.kv.set(ADMIN_AUTH_KEY, "true")
    }

    pub fn logout(&self) -> Result<()> {
        self.kv.remove(ADMIN_AUTH_KEY)
    }
}
