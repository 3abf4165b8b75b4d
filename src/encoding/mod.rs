//! State encoding for learning agents.
//!
//! `get_state` hands agents a fixed-length `f32` vector; `layout` names
//! every offset in it.

pub mod encoder;
pub mod layout;

pub use encoder::{EncodedState, FlatEncoder, StateEncoder};
pub use layout::STATE_SIZE;
