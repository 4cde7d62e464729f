//! Resume states and the per-decode [`Session`].
//!
//! A parse attempt that runs out of bytes must be resumable later from
//! exactly where it stopped, without re-decoding anything already
//! consumed. Each node's progress lives in a [`ContextStore`] keyed by
//! node identity; aggregates carry a nested store so every child keeps
//! its own independent state through arbitrary nesting depth.

use std::collections::HashMap;

use reservoir::Reservoir;

use crate::node::NodeId;
use crate::value::Value;

/// Mapping from node identity to that node's resume state.
///
/// States are created lazily on first encounter. The same node within
/// the same store always resolves to the same state; distinct nodes
/// never collide (identities are unique process-wide).
#[derive(Debug, Default)]
pub(crate) struct ContextStore {
    states: HashMap<NodeId, State>,
}

/// Per-node-kind resume state.
///
/// Integer leaves decode atomically (all bytes or nothing) and keep no
/// state at all, so they have no variant here.
#[derive(Debug)]
pub(crate) enum State {
    Aggregate(AggregateState),
    Layer(LayerState),
    Translate(TranslateState),
}

/// Progress through a struct or sequence.
#[derive(Debug, Default)]
pub(crate) struct AggregateState {
    /// Index of the next not-yet-parsed member. Only ever advances, and
    /// only after that member has fully parsed.
    pub(crate) position: usize,
    /// Values of members already parsed, in declaration order.
    pub(crate) parsed: Vec<Value>,
    /// Resume states of this aggregate's children.
    pub(crate) children: ContextStore,
}

#[derive(Debug, Default)]
pub(crate) struct LayerState {
    /// The lower envelope's decoded value, once it has parsed.
    pub(crate) lower: Option<Value>,
    pub(crate) children: ContextStore,
}

#[derive(Debug, Default)]
pub(crate) struct TranslateState {
    pub(crate) children: ContextStore,
}

impl ContextStore {
    pub(crate) fn aggregate(&mut self, id: NodeId) -> &mut AggregateState {
        match self
            .states
            .entry(id)
            .or_insert_with(|| State::Aggregate(AggregateState::default()))
        {
            State::Aggregate(state) => state,
            // An entry is only ever created by the node that owns the id.
            _ => unreachable!("resume state kind mismatch for {id:?}"),
        }
    }

    pub(crate) fn layer(&mut self, id: NodeId) -> &mut LayerState {
        match self
            .states
            .entry(id)
            .or_insert_with(|| State::Layer(LayerState::default()))
        {
            State::Layer(state) => state,
            _ => unreachable!("resume state kind mismatch for {id:?}"),
        }
    }

    pub(crate) fn translate(&mut self, id: NodeId) -> &mut TranslateState {
        match self
            .states
            .entry(id)
            .or_insert_with(|| State::Translate(TranslateState::default()))
        {
            State::Translate(state) => state,
            _ => unreachable!("resume state kind mismatch for {id:?}"),
        }
    }
}

/// One in-progress (or completed) decode of one top-level value: a byte
/// reservoir plus the root context store.
///
/// Sessions are single-threaded mutable state; callers serialize access
/// (typically one session per connection). After a successful decode the
/// session is spent; start a fresh one for the next value.
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) reservoir: Reservoir,
    pub(crate) root: ContextStore,
}

impl Session {
    /// Creates a fresh session with an empty reservoir and context tree.
    pub fn new() -> Self {
        Session::default()
    }

    /// The session's byte reservoir, for inspection.
    pub fn reservoir(&self) -> &Reservoir {
        &self.reservoir
    }
}
