//! # Cart State
//!
//! Owns the shopping session and its cart ledger.
//!
//! ## Session Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Ledger Per Session                               │
//! │                                                                         │
//! │  Product List ──┐                                                       │
//! │                 │   &CartState (handed, never copied)                   │
//! │  Cart ──────────┼──────────────────► Session { id, started_at, ledger } │
//! │                 │                                                       │
//! │  Checkout ──────┘                                                       │
//! │                                                                         │
//! │  confirm_checkout ──► ledger.clear() ──► new Session id                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The ledger itself is not synchronized. Access is serialized here with a
//! `Mutex`, so every command sees the effects of the previous one in order.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use storefront_core::CartLedger;
use tracing::info;
use uuid::Uuid;

/// One shopping session: created empty, discarded at checkout or exit.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identifier (UUID v4)
    pub id: Uuid,

    /// When the session began
    pub started_at: DateTime<Utc>,

    /// What the session currently holds
    pub ledger: CartLedger,
}

impl Session {
    /// Starts a new empty session.
    pub fn start() -> Self {
        Session {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            ledger: CartLedger::new(),
        }
    }

    /// Clears the ledger and replaces this session with a fresh one.
    ///
    /// Returns the id of the session that ended.
    pub fn restart(&mut self) -> Uuid {
        self.ledger.clear();
        let ended = std::mem::replace(self, Session::start());
        info!(ended = %ended.id, started = %self.id, "Shopping session restarted");
        ended.id
    }
}

/// Host-managed cart state.
///
/// Uses `Mutex<Session>` so the host can hand the same state to every
/// command while keeping mutations strictly ordered.
#[derive(Debug)]
pub struct CartState {
    session: Mutex<Session>,
}

impl CartState {
    /// Creates state holding a fresh session.
    pub fn new() -> Self {
        let session = Session::start();
        info!(session_id = %session.id, "Shopping session started");
        CartState {
            session: Mutex::new(session),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = cart_state.with_session(|s| s.ledger.summarize(catalog));
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().expect("Cart mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_session_mut(|s| s.ledger.increment(id));
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().expect("Cart mutex poisoned");
        f(&mut session)
    }

    /// Ends the current session and starts an empty one.
    ///
    /// Returns the id of the session that ended.
    pub fn reset(&self) -> Uuid {
        self.with_session_mut(Session::restart)
    }

    /// Id of the current session.
    pub fn session_id(&self) -> Uuid {
        self.with_session(|session| session.id)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
