//! Application layer: the forward-input use case.
//!
//! Wires captured input events through the encoder and into the frame sink.
//! Depends only on the [`crate::infrastructure::transport::FrameSink`] trait,
//! so tests drive it with in-memory sinks.

pub mod forward_input;
