//! Codec nodes: immutable, identity-bearing descriptions of a binary
//! layout, composed into trees.
//!
//! A node describes one fragment of a fixed layout and how to decode and
//! encode it. Trees are built once by the protocol author and reused
//! across many parsing sessions. Identity matters: each node's
//! [`NodeId`] keys its resume state in a session's context store, so the
//! same node fed across many partial deliveries always resumes from its
//! own state. Build a distinct node for every position in a layout;
//! placing one `Arc<Node>` at two positions of the same aggregate would
//! make them share resume state.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::CodecError;
use crate::value::Value;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a codec node, assigned once at construction.
///
/// Context stores are keyed by `NodeId`, never by structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    fn mint() -> Self {
        NodeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Fallible value conversion used by translate nodes.
pub type TranslateFn = Arc<dyn Fn(Value) -> Result<Value, CodecError> + Send + Sync>;

/// One fragment of a binary layout.
///
/// Constructed through [`Node::uint8`], [`Node::struct_of`] and friends,
/// which hand back `Arc<Node>` ready for composition.
pub struct Node {
    id: NodeId,
    kind: NodeKind,
}

pub(crate) enum NodeKind {
    /// Fixed-width big-endian integer leaf.
    Int(IntLayout),
    /// Ordered named aggregate; decodes to a [`Record`](crate::Record).
    Struct(Vec<(String, Arc<Node>)>),
    /// Ordered positional aggregate; decodes to a [`Value::List`].
    Sequence(Vec<Arc<Node>>),
    /// Two-stage layering: parse `lower`, then `upper`. Experimental.
    Layer { lower: Arc<Node>, upper: Arc<Node> },
    /// Wraps `inner`, converting values on the way in and out.
    Translate {
        inner: Arc<Node>,
        inward: TranslateFn,
        outward: TranslateFn,
    },
}

/// Wire shape of an integer leaf: big-endian, 1 to 4 bytes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IntLayout {
    pub(crate) width: usize,
    pub(crate) signed: bool,
}

impl IntLayout {
    /// Decodes exactly `self.width` big-endian bytes.
    pub(crate) fn decode(&self, bytes: &[u8]) -> i64 {
        debug_assert_eq!(bytes.len(), self.width);
        let mut magnitude: u64 = 0;
        for &byte in bytes {
            magnitude = magnitude << 8 | u64::from(byte);
        }
        if self.signed {
            // Sign-extend from the wire width.
            let shift = 64 - 8 * self.width as u32;
            ((magnitude << shift) as i64) >> shift
        } else {
            magnitude as i64
        }
    }

    /// Encodes `value` as exactly `self.width` big-endian bytes.
    pub(crate) fn encode(&self, value: i64, sink: &mut Vec<u8>) -> Result<(), CodecError> {
        if !self.fits(value) {
            return Err(CodecError::ValueOutOfRange {
                value,
                width: self.width,
                signed: self.signed,
            });
        }
        for position in (0..self.width).rev() {
            sink.push((value >> (8 * position)) as u8);
        }
        Ok(())
    }

    fn fits(&self, value: i64) -> bool {
        let bits = 8 * self.width as u32;
        if self.signed {
            let min = -(1i64 << (bits - 1));
            let max = (1i64 << (bits - 1)) - 1;
            (min..=max).contains(&value)
        } else {
            (0..1i64 << bits).contains(&value)
        }
    }
}

impl Node {
    fn build(kind: NodeKind) -> Arc<Node> {
        Arc::new(Node {
            id: NodeId::mint(),
            kind,
        })
    }

    fn int(width: usize, signed: bool) -> Arc<Node> {
        Node::build(NodeKind::Int(IntLayout { width, signed }))
    }

    /// Unsigned big-endian 8-bit integer.
    pub fn uint8() -> Arc<Node> {
        Node::int(1, false)
    }

    /// Unsigned big-endian 16-bit integer.
    pub fn uint16() -> Arc<Node> {
        Node::int(2, false)
    }

    /// Unsigned big-endian 24-bit integer, assembled from three byte
    /// components as `high << 16 | mid << 8 | low`.
    pub fn uint24() -> Arc<Node> {
        Node::int(3, false)
    }

    /// Unsigned big-endian 32-bit integer.
    pub fn uint32() -> Arc<Node> {
        Node::int(4, false)
    }

    /// Signed big-endian 8-bit integer.
    pub fn int8() -> Arc<Node> {
        Node::int(1, true)
    }

    /// Signed big-endian 16-bit integer.
    pub fn int16() -> Arc<Node> {
        Node::int(2, true)
    }

    /// Signed big-endian 32-bit integer.
    pub fn int32() -> Arc<Node> {
        Node::int(4, true)
    }

    /// Ordered named aggregate. Members parse and emit in declaration
    /// order; the decoded value is a [`Record`](crate::Record).
    pub fn struct_of<I, S>(members: I) -> Arc<Node>
    where
        I: IntoIterator<Item = (S, Arc<Node>)>,
        S: Into<String>,
    {
        Node::build(NodeKind::Struct(
            members
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        ))
    }

    /// Ordered positional aggregate. Members parse and emit in
    /// declaration order; the decoded value is a [`Value::List`].
    pub fn sequence_of<I>(members: I) -> Arc<Node>
    where
        I: IntoIterator<Item = Arc<Node>>,
    {
        Node::build(NodeKind::Sequence(members.into_iter().collect()))
    }

    /// Two-stage layering: the lower envelope parses first, then the
    /// upper payload. Experimental: serialization is not supported yet,
    /// and the lower value does not drive the upper parse.
    pub fn layer(lower: Arc<Node>, upper: Arc<Node>) -> Arc<Node> {
        Node::build(NodeKind::Layer { lower, upper })
    }

    /// Wraps `inner` with a pair of conversions: `inward` maps the inner
    /// node's decoded value to the external representation, `outward`
    /// maps an external value back to the inner node's encoded
    /// representation before emission.
    ///
    /// Round-trips hold whenever `inward` after `outward` is the
    /// identity.
    pub fn translate<F, G>(inner: Arc<Node>, inward: F, outward: G) -> Arc<Node>
    where
        F: Fn(Value) -> Result<Value, CodecError> + Send + Sync + 'static,
        G: Fn(Value) -> Result<Value, CodecError> + Send + Sync + 'static,
    {
        Node::build(NodeKind::Translate {
            inner,
            inward: Arc::new(inward),
            outward: Arc::new(outward),
        })
    }

    /// This node's stable identity.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            NodeKind::Int(layout) => {
                return write!(
                    f,
                    "Node({:?}, {}int{})",
                    self.id,
                    if layout.signed { "" } else { "u" },
                    8 * layout.width
                );
            }
            NodeKind::Struct(_) => "struct",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Layer { .. } => "layer",
            NodeKind::Translate { .. } => "translate",
        };
        write!(f, "Node({:?}, {kind})", self.id)
    }
}
