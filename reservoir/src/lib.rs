//! Claimable byte reservoir for incremental parsers.
//!
//! A [`Reservoir`] accumulates bytes that arrive in arbitrary-sized
//! fragments (e.g. from a streaming transport) and tracks a claim cursor
//! separating bytes already consumed by completed decode steps from bytes
//! still waiting to be decoded. Parsers check [`Reservoir::unclaimed`]
//! before committing to a decode, so a failed attempt leaves the cursor
//! untouched and can be retried once more bytes have been written.

pub mod buffer;

pub use buffer::Reservoir;
