//! Diagnostics reconnaissance for automotive bus networks: a protocol engine for ISO 14229
//! (UDS) requests/responses, layered over an ISO 15765-2-shaped transport, plus the discovery
//! and enumeration scanners built on top of it.

mod error;
pub use error::{Error, Result};

pub mod service;
pub use service::UdsServiceType;

pub mod common;

pub mod request;
pub use request::{Alfid, Request, RoutineControlSubFunction};

pub mod response;

pub mod bus;
pub mod transport;

pub mod cancel;
pub use cancel::CancellationToken;

pub mod client;
pub use client::ProtocolClient;

pub mod scan;
