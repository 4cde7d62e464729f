//! Drivers tying a codec node to a reservoir and a context tree.
//!
//! [`feed`] is re-entrant: call it with each fragment as it arrives,
//! against the same [`Session`]. A call that returns
//! [`Progress::Incomplete`] has silently preserved all partial progress
//! (claimed bytes and per-node resume states), so the next call picks up
//! exactly where this one stopped. [`emit`] is the inverse and needs no
//! session: serialization always completes in one pass.

use reservoir::Reservoir;

use crate::context::{ContextStore, Session};
use crate::error::CodecError;
use crate::node::{Node, NodeKind};
use crate::value::{Record, Value};

/// Outcome of one parse attempt.
///
/// `Incomplete` is flow control, not a fault: it means "not enough bytes
/// have arrived yet; call [`feed`] again with the same session once they
/// do". It always reaches the outermost caller; no enclosing aggregate
/// swallows it.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// The top-level value decoded completely.
    Complete(Value),
    /// More bytes are needed; partial progress is preserved.
    Incomplete,
}

/// Appends `bytes` to the session's reservoir and attempts one parse
/// step of `node` against the session's context tree.
///
/// # Examples
///
/// ```
/// use dapper::{emit, feed, Node, Progress, Session};
///
/// let point = Node::struct_of([("x", Node::int16()), ("y", Node::int16())]);
/// let mut session = Session::new();
///
/// assert_eq!(
///     feed(&point, &[0xFF, 0xFE, 0x00], &mut session).unwrap(),
///     Progress::Incomplete,
/// );
/// let Progress::Complete(value) = feed(&point, &[0x2A], &mut session).unwrap() else {
///     panic!("four bytes decode a whole point");
/// };
/// assert_eq!(value.as_record().unwrap().get("x").unwrap().as_int(), Some(-2));
/// assert_eq!(emit(&point, &value).unwrap(), [0xFF, 0xFE, 0x00, 0x2A]);
/// ```
pub fn feed(node: &Node, bytes: &[u8], session: &mut Session) -> Result<Progress, CodecError> {
    session.reservoir.write(bytes);
    feed_node(node, &mut session.root, &mut session.reservoir)
}

/// Serializes `value` against `node` into a fresh byte sink.
///
/// Cannot fail for insufficient data, only for value/shape mismatches.
pub fn emit(node: &Node, value: &Value) -> Result<Vec<u8>, CodecError> {
    let mut sink = Vec::new();
    emit_node(node, value, &mut sink)?;
    Ok(sink)
}

fn feed_node(
    node: &Node,
    store: &mut ContextStore,
    buffer: &mut Reservoir,
) -> Result<Progress, CodecError> {
    match node.kind() {
        NodeKind::Int(layout) => {
            // Atomic: either all bytes are present or nothing is claimed,
            // so a retry sees the reservoir untouched.
            if buffer.unclaimed() < layout.width {
                return Ok(Progress::Incomplete);
            }
            let decoded = layout.decode(buffer.claim(layout.width));
            Ok(Progress::Complete(Value::Int(decoded)))
        }

        NodeKind::Struct(members) => {
            let state = store.aggregate(node.id());
            while state.position < members.len() {
                let (_, child) = &members[state.position];
                match feed_node(child, &mut state.children, buffer)? {
                    Progress::Complete(value) => {
                        state.parsed.push(value);
                        state.position += 1;
                    }
                    // The in-flight member keeps its own nested state;
                    // our position stays on it for the next attempt.
                    Progress::Incomplete => return Ok(Progress::Incomplete),
                }
            }
            let record: Record = members
                .iter()
                .zip(&state.parsed)
                .map(|((name, _), value)| (name.clone(), value.clone()))
                .collect();
            Ok(Progress::Complete(Value::Record(record)))
        }

        NodeKind::Sequence(members) => {
            let state = store.aggregate(node.id());
            while state.position < members.len() {
                let child = &members[state.position];
                match feed_node(child, &mut state.children, buffer)? {
                    Progress::Complete(value) => {
                        state.parsed.push(value);
                        state.position += 1;
                    }
                    Progress::Incomplete => return Ok(Progress::Incomplete),
                }
            }
            Ok(Progress::Complete(Value::List(state.parsed.clone())))
        }

        NodeKind::Layer { lower, upper } => {
            let state = store.layer(node.id());
            if state.lower.is_none() {
                match feed_node(lower, &mut state.children, buffer)? {
                    Progress::Complete(value) => state.lower = Some(value),
                    Progress::Incomplete => return Ok(Progress::Incomplete),
                }
            }
            // TODO: thread the recorded lower value into the upper parse
            // so the envelope can bound the payload (length-prefixed
            // framing). Until then the stages are sequenced but
            // independent.
            feed_node(upper, &mut state.children, buffer)
        }

        NodeKind::Translate { inner, inward, .. } => {
            let state = store.translate(node.id());
            match feed_node(inner, &mut state.children, buffer)? {
                Progress::Complete(value) => Ok(Progress::Complete((**inward)(value)?)),
                Progress::Incomplete => Ok(Progress::Incomplete),
            }
        }
    }
}

fn emit_node(node: &Node, value: &Value, sink: &mut Vec<u8>) -> Result<(), CodecError> {
    match node.kind() {
        NodeKind::Int(layout) => {
            let Value::Int(int) = value else {
                return Err(CodecError::TypeMismatch {
                    expected: "integer",
                    found: value.shape(),
                });
            };
            layout.encode(*int, sink)
        }

        NodeKind::Struct(members) => {
            let Value::Record(record) = value else {
                return Err(CodecError::TypeMismatch {
                    expected: "record",
                    found: value.shape(),
                });
            };
            for (name, child) in members {
                let field = record
                    .get(name)
                    .ok_or_else(|| CodecError::MissingField(name.clone()))?;
                emit_node(child, field, sink)?;
            }
            Ok(())
        }

        NodeKind::Sequence(members) => {
            let Value::List(items) = value else {
                return Err(CodecError::TypeMismatch {
                    expected: "list",
                    found: value.shape(),
                });
            };
            if items.len() != members.len() {
                return Err(CodecError::LengthMismatch {
                    expected: members.len(),
                    found: items.len(),
                });
            }
            for (child, item) in members.iter().zip(items) {
                emit_node(child, item, sink)?;
            }
            Ok(())
        }

        // The parse path discards the lower envelope's value, so no
        // faithful inverse exists to serialize one.
        NodeKind::Layer { .. } => Err(CodecError::Unsupported("layer serialization")),

        NodeKind::Translate { inner, outward, .. } => {
            let encoded = (**outward)(value.clone())?;
            emit_node(inner, &encoded, sink)
        }
    }
}
