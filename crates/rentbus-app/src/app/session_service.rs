//! Admin login

use rentbus_store::{AdminSession, KeyValueStore};
use rentbus_types::{Error, Result};

use crate::config::Config;

pub struct SessionService<'a, S> {
    config: &'a Config,
    session: AdminSession<S>,
}

impl<'a, S: KeyValueStore> SessionService<'a, S> {
    pub fn new(config: &'a Config, kv: S) -> Self {
        Self {
            config,
            session: AdminSession::new(kv),
        }
    }

    /// Check credentials against the config and set the session flag
    pub fn login(&self, email: &str, password: &str) -> Result<()> {
        if !self.config.verify_admin(email, password) {
            tracing::warn!(email = email.trim(), "rejected admin login");
            return Err(Error::InvalidCredentials);
        }
        self.session.login()?;
        tracing::info!("admin logged in");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Gate for back-office commands
    pub fn require_admin(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbus_store::MemoryStore;

    #[test]
    fn test_login_flow() {
        let config = Config::default();
        let kv = MemoryStore::new();
        let service = SessionService::new(&config, &kv);

        assert!(matches!(service.require_admin(), Err(Error::Unauthorized)));
        assert!(matches!(
            service.login("admin@rentanybus.com", "wrong"),
            Err(Error::InvalidCredentials)
        ));
        assert!(!service.is_authenticated());

        service.login(" ADMIN@rentanybus.com", "admin123").unwrap();
        assert!(service.require_admin().is_ok());

        service.logout().unwrap();
        assert!(!service.is_authenticated());
    }
}
