#![warn(missing_docs)]
//! # pothole-report-session
//!
//! ## Purpose
//! Implements session lifecycle handling and per-call credential acquisition
//! for `pothole-report`.
//!
//! ## Responsibilities
//! - Model the single live [`Session`] restored from the identity provider.
//! - Resolve a forced-fresh bearer credential before every outbound call.
//! - Fail closed: destroy the session and force a full client reset on any
//!   credential failure, with no retry and no silent degradation.
//!
//! ## Data flow
//! Identity collaborator signs the user in -> [`SessionGuard`] holds the
//! [`Session`] -> orchestrators call [`SessionGuard::acquire_credential`]
//! before each request -> the returned token rides the `X-User-Token`
//! header downstream.
//!
//! ## Ownership and lifetimes
//! Token values are owned (`String`); the credential provider is shared
//! behind `Arc` so a restored session and the guard can coexist.
//!
//! ## Error model
//! Missing sessions and refresh failures are surfaced as [`SessionError`].
//! Both variants are handled at this boundary by the forced-reset side
//! effect; callers only need to abort.
//!
//! ## Security and privacy notes
//! This crate never logs or stores token values beyond the single call that
//! requested them. `Session` debug output shows the identity only.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Issues forced-fresh bearer credentials for the live session.
///
/// Implemented by the external identity collaborator; every call must mint
/// a fresh token rather than returning a cached one.
pub trait CredentialProvider: Send + Sync {
    /// Requests a forced-fresh bearer token.
    ///
    /// # Errors
    /// Returns [`CredentialError`] on provider or network failure.
    fn fresh_token(&self) -> Result<String, CredentialError>;
}

/// External identity collaborator (popup sign-in flow).
pub trait IdentityGateway: Send + Sync {
    /// Runs the interactive sign-in flow and returns the new session.
    ///
    /// # Errors
    /// Returns [`SessionError::SignInFailed`] when the flow is cancelled or
    /// the provider rejects the attempt.
    fn popup_sign_in(&self) -> Result<Session, SessionError>;

    /// Terminates the provider-side session.
    fn sign_out(&self);

    /// Returns the session restored by the provider, if any.
    ///
    /// Polled once at startup so a prior session survives a reload without
    /// an explicit re-login.
    fn current_session(&self) -> Option<Session>;
}

/// Receives the forced full-client-reset side effect.
///
/// Equivalent to a hard reload plus a re-login prompt in a browser shell.
pub trait ResetHandler: Send + Sync {
    /// Forces a full client reset.
    fn force_reload(&self);
}

/// The single live authenticated session.
#[derive(Clone)]
pub struct Session {
    /// Opaque user handle, e.g. an email address.
    pub identity: String,
    /// Provider minting fresh credentials for this session.
    pub provider: Arc<dyn CredentialProvider>,
}

impl Session {
    /// Creates a session for `identity` backed by `provider`.
    pub fn new(identity: impl Into<String>, provider: Arc<dyn CredentialProvider>) -> Self {
        Self {
            identity: identity.into(),
            provider,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Owns authentication state and resolves credentials per outbound call.
pub struct SessionGuard {
    session: Option<Session>,
    reset: Arc<dyn ResetHandler>,
}

impl SessionGuard {
    /// Creates a guard with no live session.
    pub fn new(reset: Arc<dyn ResetHandler>) -> Self {
        Self {
            session: None,
            reset,
        }
    }

    /// Replaces the live session, typically from startup restoration.
    pub fn restore(&mut self, session: Option<Session>) {
        self.session = session;
    }

    /// Runs the interactive sign-in flow and installs the resulting session.
    ///
    /// # Errors
    /// Propagates [`SessionError::SignInFailed`] without mutating state so
    /// the user may simply try again.
    pub fn sign_in(&mut self, gateway: &dyn IdentityGateway) -> Result<(), SessionError> {
        let session = gateway.popup_sign_in()?;
        self.session = Some(session);
        Ok(())
    }

    /// Signs out on the provider side and drops the live session.
    pub fn sign_out(&mut self, gateway: &dyn IdentityGateway) {
        gateway.sign_out();
        self.session = None;
    }

    /// Returns the signed-in identity, if any.
    pub fn identity(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.identity.as_str())
    }

    /// Returns `true` when a session is live.
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Resolves a forced-fresh bearer credential for one outbound call.
    ///
    /// Both failure paths trigger the forced-reset side effect before
    /// returning, so callers abort without surfacing their own message.
    ///
    /// # Errors
    /// Returns [`SessionError::Unauthenticated`] when no session is live.
    /// Returns [`SessionError::CredentialRefreshFailed`] when the provider
    /// cannot mint a token; the session is destroyed first (fail closed).
    pub fn acquire_credential(&mut self) -> Result<String, SessionError> {
        let Some(session) = &self.session else {
            self.reset.force_reload();
            return Err(SessionError::Unauthenticated);
        };

        match session.provider.fresh_token() {
            Ok(token) => Ok(token),
            Err(error) => {
                self.session = None;
                self.reset.force_reload();
                Err(SessionError::CredentialRefreshFailed(error))
            }
        }
    }
}

/// Credential provider failures.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Transport-level failure reaching the identity provider.
    #[error("credential network failure: {0}")]
    Network(String),
    /// Provider rejected the refresh request.
    #[error("credential provider failure: {0}")]
    Provider(String),
}

/// Session lifecycle errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No live session exists; a full re-login is required.
    #[error("no live session")]
    Unauthenticated,
    /// The provider could not mint a fresh credential.
    #[error("credential refresh failed: {0}")]
    CredentialRefreshFailed(#[from] CredentialError),
    /// The interactive sign-in flow failed or was cancelled.
    #[error("sign-in failed: {0}")]
    SignInFailed(String),
}
