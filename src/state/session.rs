//! Session lifecycle: login, registration, logout, and cold-start restore.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionManager` instance is owned by the application root and handed
//! to every consumer. It is the only writer of the current-user state and of
//! the persisted session mirror (full-key writes via the store).
//!
//! ERROR HANDLING
//! ==============
//! Auth operations never panic and never leak raw envelopes to views: every
//! failure is normalized into an `AuthFailure { code, error }` with a
//! display-ready message, whatever shape the backend produced.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::json;

use crate::net::api::ApiClient;
use crate::net::envelope::{Envelope, GENERIC_ERROR};
use crate::net::transport::ApiError;
use crate::net::types::{TokenData, User};
use crate::util::notify::{Notice, Notifier};
use crate::util::storage::{SessionStore, keys, purge};

const TOKEN_PATH: &str = "/api/customUser/token/";
const ME_PATH: &str = "/api/customUser/me/";
const CREATE_PATH: &str = "/api/customUser/create/";

/// Where the session currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    /// A persisted token exists and the startup identity fetch is pending.
    Restoring,
    Authenticated,
    /// The last login/register attempt failed. No partial session exists.
    AuthError,
}

/// Normalized auth failure surfaced to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthFailure {
    pub code: i64,
    pub error: String,
}

impl AuthFailure {
    fn from_envelope(envelope: &Envelope) -> Self {
        Self { code: envelope.code, error: envelope.display_message() }
    }

    fn from_api(error: &ApiError) -> Self {
        match error {
            ApiError::Status { envelope: Some(envelope), .. } => Self::from_envelope(envelope),
            ApiError::Status { status, envelope: None } => {
                Self { code: i64::from(*status), error: GENERIC_ERROR.to_owned() }
            }
            ApiError::Network(_) | ApiError::Decode(_) => {
                Self { code: 500, error: GENERIC_ERROR.to_owned() }
            }
        }
    }
}

/// Owns the authenticated-user abstraction and its persisted mirror.
pub struct SessionManager {
    api: Rc<ApiClient>,
    store: Rc<dyn SessionStore>,
    notifier: Rc<dyn Notifier>,
    user: RefCell<Option<User>>,
    phase: Cell<SessionPhase>,
}

impl SessionManager {
    /// Starts in `Restoring` when a persisted token exists, else
    /// `Unauthenticated`. Callers must follow up with
    /// [`restore_session`](Self::restore_session).
    pub fn new(
        api: Rc<ApiClient>,
        store: Rc<dyn SessionStore>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let phase = if store.get(keys::ACCESS_TOKEN).is_some() {
            SessionPhase::Restoring
        } else {
            SessionPhase::Unauthenticated
        };
        Self { api, store, notifier, user: RefCell::new(None), phase: Cell::new(phase) }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase.get()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase.get() == SessionPhase::Authenticated
    }

    /// Obtain a token, persist it, then fetch the profile. The session is
    /// established only when both calls succeed; a profile failure after
    /// the token was stored purges storage again rather than leaving a
    /// half-authenticated state behind.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure; current-user state is untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthFailure> {
        let fields = [("email", email), ("password", password)];
        let envelope = match self.api.post_form(TOKEN_PATH, &fields).await {
            Ok(envelope) => envelope,
            Err(error) => return Err(self.fail(AuthFailure::from_api(&error))),
        };
        if !envelope.is_success() {
            return Err(self.fail(AuthFailure::from_envelope(&envelope)));
        }
        let Some(token) = envelope.decode_data::<TokenData>() else {
            return Err(self.fail(AuthFailure {
                code: envelope.code,
                error: GENERIC_ERROR.to_owned(),
            }));
        };

        self.store.set(keys::ACCESS_TOKEN, &token.token);
        if let Some(refresh) = &token.refresh {
            self.store.set(keys::REFRESH_TOKEN, refresh);
        }

        match self.fetch_current_user().await {
            Ok(user) => {
                self.install(&user);
                Ok(user)
            }
            Err(failure) => {
                purge(&*self.store);
                Err(self.fail(failure))
            }
        }
    }

    /// Create the account, then run the full login flow. A failed create
    /// returns the normalized error without attempting login.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure from either step.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthFailure> {
        let body = json!({ "email": email, "password": password, "name": name });
        let envelope = match self.api.post(CREATE_PATH, body).await {
            Ok(envelope) => envelope,
            Err(error) => return Err(self.fail(AuthFailure::from_api(&error))),
        };
        if envelope.code != 201 {
            return Err(self.fail(AuthFailure::from_envelope(&envelope)));
        }
        self.login(email, password).await
    }

    /// Local-only teardown: purge every session key, drop the current user,
    /// and announce it. Never fails and never calls the server.
    pub fn logout(&self) {
        purge(&*self.store);
        *self.user.borrow_mut() = None;
        self.phase.set(SessionPhase::Unauthenticated);
        self.notifier.notify(Notice::Info, "signed out");
    }

    /// Startup restore: turn a persisted token back into a live session.
    /// Resolves once the machine reaches `Authenticated` or
    /// `Unauthenticated`; a rejected token purges storage, so running this
    /// again is a no-op.
    pub async fn restore_session(&self) -> SessionPhase {
        if self.store.get(keys::ACCESS_TOKEN).is_none() {
            self.phase.set(SessionPhase::Unauthenticated);
            return self.phase.get();
        }
        self.phase.set(SessionPhase::Restoring);
        match self.fetch_current_user().await {
            Ok(user) => {
                self.install(&user);
            }
            Err(failure) => {
                log::warn!("session restore failed: {}", failure.error);
                purge(&*self.store);
                *self.user.borrow_mut() = None;
                self.phase.set(SessionPhase::Unauthenticated);
            }
        }
        self.phase.get()
    }

    /// Update the profile (name, optionally password) and refresh the held
    /// user on success.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure; the held user is untouched.
    pub async fn update_profile(
        &self,
        name: &str,
        password: Option<&str>,
    ) -> Result<User, AuthFailure> {
        let mut body = json!({ "name": name });
        if let Some(password) = password {
            body["password"] = json!(password);
        }
        let envelope = match self.api.patch(ME_PATH, body).await {
            Ok(envelope) => envelope,
            Err(error) => return Err(AuthFailure::from_api(&error)),
        };
        if !envelope.is_success() {
            return Err(AuthFailure::from_envelope(&envelope));
        }
        let Some(user) = envelope.decode_data::<User>() else {
            return Err(AuthFailure { code: envelope.code, error: GENERIC_ERROR.to_owned() });
        };
        self.install(&user);
        Ok(user)
    }

    async fn fetch_current_user(&self) -> Result<User, AuthFailure> {
        let envelope = match self.api.get(ME_PATH, &[]).await {
            Ok(envelope) => envelope,
            Err(error) => return Err(AuthFailure::from_api(&error)),
        };
        if !envelope.is_success() {
            return Err(AuthFailure::from_envelope(&envelope));
        }
        envelope
            .decode_data::<User>()
            .ok_or_else(|| AuthFailure { code: envelope.code, error: GENERIC_ERROR.to_owned() })
    }

    /// Mirror the user into storage and make the session current.
    fn install(&self, user: &User) {
        self.store.set(keys::USER_ID, &user.id.to_string());
        self.store.set(keys::EMAIL, &user.email);
        self.store.set(keys::NAME, &user.name);
        self.store.set(keys::IS_STAFF, if user.is_staff { "true" } else { "false" });
        self.store.set(keys::IS_ACTIVE, if user.is_active { "true" } else { "false" });
        *self.user.borrow_mut() = Some(user.clone());
        self.phase.set(SessionPhase::Authenticated);
    }

    fn fail(&self, failure: AuthFailure) -> AuthFailure {
        self.phase.set(SessionPhase::AuthError);
        failure
    }
}
