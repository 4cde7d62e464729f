//! Declarative codecs for fixed-layout binary structures.
//!
//! Describe a layout once as a tree of [`Node`]s and use that single
//! description both to parse and to serialize. Parsing is incremental:
//! bytes may arrive in arbitrary-sized fragments (one at a time, if the
//! transport is unkind) and every partial attempt resumes exactly where
//! the previous one stopped, without re-decoding finished sub-structures.
//!
//! # Quickstart
//!
//! ```
//! use dapper::{emit, feed, Node, Progress, Record, Session, Value};
//!
//! // One description, built once, reused across sessions.
//! let frame = Node::struct_of([
//!     ("kind", Node::uint8()),
//!     ("body", Node::struct_of([
//!         ("flags", Node::sequence_of([Node::uint8(), Node::uint8()])),
//!         ("size", Node::uint16()),
//!     ])),
//! ]);
//!
//! let value = Value::Record(
//!     Record::new().with("kind", 7).with(
//!         "body",
//!         Record::new()
//!             .with("flags", vec![Value::Int(1), Value::Int(2)])
//!             .with("size", 300),
//!     ),
//! );
//!
//! let bytes = emit(&frame, &value).unwrap();
//! assert_eq!(bytes, [0x07, 0x01, 0x02, 0x01, 0x2C]);
//!
//! // Feed the same bytes back in two fragments.
//! let mut session = Session::new();
//! assert_eq!(feed(&frame, &bytes[..3], &mut session).unwrap(), Progress::Incomplete);
//! assert_eq!(
//!     feed(&frame, &bytes[3..], &mut session).unwrap(),
//!     Progress::Complete(value),
//! );
//! ```
//!
//! # Architecture
//!
//! - [`reservoir::Reservoir`]: append-only byte buffer with a claim
//!   cursor (its own crate; the session's backing store).
//! - [`node`]: the layout description tree with integer leaves, structs,
//!   sequences, layering and value translation.
//! - [`context`]: per-node resume states and the [`Session`] pairing a
//!   reservoir with a context tree.
//! - [`engine`]: the [`feed`]/[`emit`] drivers.
//!
//! The engine never blocks or yields; "waiting for more bytes" is the
//! caller's scheduling concern. One `feed` call at a time per session.

pub mod context;
pub mod engine;
pub mod error;
pub mod node;
pub mod value;

pub use context::Session;
pub use engine::{Progress, emit, feed};
pub use error::CodecError;
pub use node::{Node, NodeId, TranslateFn};
pub use value::{Record, Value};
