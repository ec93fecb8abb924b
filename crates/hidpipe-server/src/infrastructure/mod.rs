//! Infrastructure layer: OS input capture, the pipe transport, and
//! configuration persistence.

pub mod capture;
pub mod storage;
pub mod transport;
