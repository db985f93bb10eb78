//! Authentication service
//!
//! Owns the single active session and the registered-user table. Demo
//! accounts let a reviewer preview each role dashboard without
//! registration; registered users are created through signup and persisted
//! with hashed credentials.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::sleep;
use uuid::Uuid;

use crate::config::{LOGIN_LATENCY_MS, REGISTERED_USERS_KEY, SESSION_KEY, TOKEN_PREFIX};
use crate::crypto;
use crate::error::{AppError, Result};
use crate::models::{CredentialRecord, DemoAccount, SignupRequest, StoredSession, User, UserRole};
use crate::seed;
use crate::storage::LocalStore;

/// Authentication behavior fixed at construction
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Enables password-less role switching between demo accounts
    pub demo_mode: bool,
    /// Artificial delay applied to login and signup
    pub login_latency: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            demo_mode: false,
            login_latency: Duration::from_millis(LOGIN_LATENCY_MS),
        }
    }
}

/// Service managing the current session and account registry
#[derive(Clone)]
pub struct AuthService {
    store: LocalStore,
    config: AuthConfig,
    demo_accounts: Arc<Vec<DemoAccount>>,
    session: watch::Sender<Option<User>>,
}

impl AuthService {
    pub fn new(store: LocalStore, config: AuthConfig) -> Result<Self> {
        let demo_accounts = seed::demo_accounts()?;
        let (session, _) = watch::channel(None);

        Ok(Self {
            store,
            config,
            demo_accounts: Arc::new(demo_accounts),
            session,
        })
    }

    /// One-shot startup read of the persisted session.
    ///
    /// A corrupt entry is discarded and the process starts anonymous; the
    /// caller never sees the corruption.
    pub async fn restore_session(&self) -> Result<Option<User>> {
        match self.store.get::<StoredSession>(SESSION_KEY).await {
            Ok(Some(stored)) => {
                tracing::info!("Restored session for {}", stored.user.email);
                self.session.send_replace(Some(stored.user.clone()));
                Ok(Some(stored.user))
            }
            Ok(None) => Ok(None),
            Err(AppError::Serialization(err)) => {
                tracing::warn!("Discarding corrupt session entry: {}", err);
                self.store.remove(SESSION_KEY).await?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Authenticate against the demo accounts, then the registered-user
    /// table. Unknown email and wrong password are reported identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        // Simulated network latency
        sleep(self.config.login_latency).await;

        let demo = self.demo_accounts.iter().find(|account| {
            account.email.eq_ignore_ascii_case(email)
                && crypto::verify_password(password, &account.password_hash)
        });

        if let Some(account) = demo {
            let user = account.to_user();
            self.establish_session(user.clone()).await?;
            tracing::info!("Demo {} logged in", user.role);
            return Ok(user);
        }

        let registered = self.registered_users().await?;
        let record = registered.iter().find(|record| {
            record.email.eq_ignore_ascii_case(email)
                && crypto::verify_password(password, &record.password_hash)
        });

        match record {
            Some(record) => {
                let user = record.to_user();
                self.establish_session(user.clone()).await?;
                tracing::info!("{} logged in", user.email);
                Ok(user)
            }
            None => {
                tracing::debug!("Login rejected for {}", email);
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Register a new account and log it in. The two steps are atomic from
    /// the caller's perspective.
    pub async fn signup(&self, request: SignupRequest) -> Result<User> {
        sleep(self.config.login_latency).await;

        let demo_taken = self
            .demo_accounts
            .iter()
            .any(|account| account.email.eq_ignore_ascii_case(&request.email));

        let mut registered = self.registered_users().await?;
        let registered_taken = registered
            .iter()
            .any(|record| record.email.eq_ignore_ascii_case(&request.email));

        if demo_taken || registered_taken {
            return Err(AppError::EmailAlreadyRegistered);
        }

        let record = CredentialRecord {
            id: format!("user-{}", Uuid::new_v4()),
            name: request.name,
            email: request.email,
            phone: request.phone,
            role: request.role,
            password_hash: crypto::hash_password(&request.password)?,
            created_at: Utc::now(),
        };

        registered.push(record.clone());
        self.store.set(REGISTERED_USERS_KEY, &registered).await?;
        tracing::info!("Registered new {} account: {}", record.role, record.email);

        let user = record.to_user();
        self.establish_session(user.clone()).await?;
        Ok(user)
    }

    /// Clear the current session. The registered-user table is untouched.
    pub async fn logout(&self) -> Result<()> {
        self.session.send_replace(None);
        self.store.remove(SESSION_KEY).await?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Replace the session with the demo account for `role`, skipping the
    /// password check. Only available when demo mode is on.
    pub async fn switch_role(&self, role: UserRole) -> Result<User> {
        if !self.config.demo_mode {
            return Err(AppError::RoleSwitchDisabled);
        }

        let account = self
            .demo_accounts
            .iter()
            .find(|account| account.role == role)
            .ok_or_else(|| AppError::Generic(format!("No demo account for role {role}")))?;

        let user = account.to_user();
        self.establish_session(user.clone()).await?;
        tracing::info!("Switched session to demo {}", role);
        Ok(user)
    }

    /// Current authenticated user, if any
    pub fn current_user(&self) -> Option<User> {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Watch the session for changes. Receivers observe every
    /// login/logout/switch as a new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.session.subscribe()
    }

    /// Set and persist the session for `user`
    async fn establish_session(&self, user: User) -> Result<()> {
        let token = format!(
            "{}_{}_{}",
            TOKEN_PREFIX,
            user.role.to_string().to_ascii_uppercase(),
            Utc::now().timestamp_millis()
        );

        let stored = StoredSession {
            user: user.clone(),
            token,
        };
        self.store.set(SESSION_KEY, &stored).await?;
        self.session.send_replace(Some(user));

        Ok(())
    }

    /// Load the registered-user table. A corrupt table is treated as empty
    /// rather than surfaced; the next signup rewrites it.
    async fn registered_users(&self) -> Result<Vec<CredentialRecord>> {
        match self.store.get::<Vec<CredentialRecord>>(REGISTERED_USERS_KEY).await {
            Ok(Some(records)) => Ok(records),
            Ok(None) => Ok(Vec::new()),
            Err(AppError::Serialization(err)) => {
                tracing::warn!("Discarding corrupt registered-user table: {}", err);
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}
