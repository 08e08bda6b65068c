//! Ambient request context.
//!
//! Holds the correlation, request, and user identifiers for the request
//! currently being handled. Values live in a `tokio` task-local scope that
//! follows the request future across `.await` points, so two requests
//! in flight on the same worker never see each other's identifiers.
//!
//! Code that runs outside any scope (startup, background tasks, anything
//! moved onto a freshly spawned task) reads empty values and writes are
//! dropped.

use std::cell::RefCell;
use std::future::Future;

use serde::Serialize;

tokio::task_local! {
    static AMBIENT: RefCell<AmbientContext>;
}

/// One of the three ambient identifier slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    CorrelationId,
    RequestId,
    UserId,
}

/// Snapshot of the ambient identifiers. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AmbientContext {
    pub correlation_id: String,
    pub request_id: String,
    pub user_id: String,
}

impl AmbientContext {
    fn slot_mut(&mut self, slot: Slot) -> &mut String {
        match slot {
            Slot::CorrelationId => &mut self.correlation_id,
            Slot::RequestId => &mut self.request_id,
            Slot::UserId => &mut self.user_id,
        }
    }

    fn slot(&self, slot: Slot) -> &str {
        match slot {
            Slot::CorrelationId => &self.correlation_id,
            Slot::RequestId => &self.request_id,
            Slot::UserId => &self.user_id,
        }
    }

    /// Non-empty identifiers as `(field name, value)` pairs.
    pub fn present(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("correlation_id", self.correlation_id.as_str()),
            ("request_id", self.request_id.as_str()),
            ("user_id", self.user_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
    }
}

/// Run `fut` inside a fresh ambient scope.
///
/// The scope starts as a copy of the enclosing one (empty at top level), so
/// values set by an outer layer stay visible. Writes inside `fut` never reach
/// the enclosing scope or any sibling scope.
pub async fn scope<F>(fut: F) -> F::Output
where
    F: Future,
{
    AMBIENT.scope(RefCell::new(snapshot()), fut).await
}

/// Store `value` in `slot` for the current scope.
///
/// Returns `false` when called outside a scope.
pub fn set(slot: Slot, value: impl Into<String>) -> bool {
    let value = value.into();
    AMBIENT
        .try_with(|ctx| *ctx.borrow_mut().slot_mut(slot) = value)
        .is_ok()
}

/// Current value of `slot`, or an empty string if unset.
pub fn get(slot: Slot) -> String {
    AMBIENT
        .try_with(|ctx| ctx.borrow().slot(slot).to_string())
        .unwrap_or_default()
}

/// Copy of all three identifiers for the current scope.
pub fn snapshot() -> AmbientContext {
    AMBIENT
        .try_with(|ctx| ctx.borrow().clone())
        .unwrap_or_default()
}
