//! Memory events emitted during execution.
//!
//! The interpreter reports scope lifetimes and binding changes as a stream
//! of tagged records, in strict program order, for hosts that replay a run
//! as a visualization. `value` is the rendered form of the runtime value;
//! hosts display it but do not interpret it.

use serde::Serialize;

/// One step in the memory trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all_fields = "camelCase")]
pub enum MemoryEvent {
    /// A new environment was created. `parent_scope_id` is `None` only for
    /// the global scope.
    EnterScope {
        scope_id: usize,
        parent_scope_id: Option<usize>,
    },
    /// An environment reached the end of its lifetime.
    ExitScope { scope_id: usize },
    /// A binding was created in `scope_id`.
    Declare {
        scope_id: usize,
        name: String,
        value: String,
        moved: bool,
    },
    /// An existing binding was updated in place.
    Update {
        scope_id: usize,
        name: String,
        value: String,
        moved: bool,
    },
    /// A non-primitive binding was consumed; the name is poisoned.
    Move {
        scope_id: usize,
        name: String,
        value: String,
        moved: bool,
    },
}

impl MemoryEvent {
    /// The scope this event concerns.
    pub fn scope_id(&self) -> usize {
        match self {
            MemoryEvent::EnterScope { scope_id, .. }
            | MemoryEvent::ExitScope { scope_id }
            | MemoryEvent::Declare { scope_id, .. }
            | MemoryEvent::Update { scope_id, .. }
            | MemoryEvent::Move { scope_id, .. } => *scope_id,
        }
    }
}
