//! Session context: the one place that knows who is signed in
//!
//! A `SessionContext` is created once at the application root and handed to
//! whatever needs the current user. Session changes are broadcast to every
//! receiver obtained from [`SessionContext::subscribe`].

use crate::domain::{AuthEvent, Session, User};
use crate::error::{DaybookError, Result};
use crate::infrastructure::AuthService;
use std::sync::mpsc::{channel, Receiver, Sender};

pub struct SessionContext<A> {
    auth: A,
    session: Option<Session>,
    subscribers: Vec<Sender<AuthEvent>>,
}

impl<A: AuthService> SessionContext<A> {
    /// Create a context with no session; call [`refresh`](Self::refresh) to
    /// pick up a stored one.
    pub fn new(auth: A) -> Self {
        SessionContext {
            auth,
            session: None,
            subscribers: Vec::new(),
        }
    }

    /// Receive every subsequent session change
    pub fn subscribe(&mut self) -> Receiver<AuthEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn require_user(&self) -> Result<&User> {
        self.user().ok_or(DaybookError::NotSignedIn)
    }

    /// Re-read the stored session and notify subscribers of any change
    pub fn refresh(&mut self) -> Result<Option<&Session>> {
        let current = self.auth.current_session()?;
        let had_session = self.session.is_some();

        match current {
            Some((session, refreshed)) => {
                let event = if refreshed {
                    AuthEvent::TokenRefreshed(session.clone())
                } else if self.session.as_ref() != Some(&session) {
                    AuthEvent::SignedIn(session.clone())
                } else {
                    return Ok(self.session.as_ref());
                };
                self.session = Some(session);
                self.broadcast(event);
            }
            None => {
                self.session = None;
                if had_session {
                    self.broadcast(AuthEvent::SignedOut);
                }
            }
        }

        Ok(self.session.as_ref())
    }

    pub fn sign_up(&mut self, email: &str, password: &str) -> Result<&Session> {
        let session = self.auth.sign_up(email, password)?;
        Ok(self.signed_in(session))
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<&Session> {
        let session = self.auth.sign_in(email, password)?;
        Ok(self.signed_in(session))
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.auth.sign_out()?;
        self.session = None;
        self.broadcast(AuthEvent::SignedOut);
        Ok(())
    }

    fn signed_in(&mut self, session: Session) -> &Session {
        self.broadcast(AuthEvent::SignedIn(session.clone()));
        self.session.insert(session)
    }

    /// Send to every live subscriber, dropping those whose receiver is gone
    fn broadcast(&mut self, event: AuthEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
