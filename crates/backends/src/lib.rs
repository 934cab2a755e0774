// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! swarm-backends: the two interchangeable process backends (`direct`,
//! `session`) a worker can be bound to — start, capture, send, signal,
//! alive. Dispatch over the pair lives in [`BoundBackend`], the seam
//! `swarm-supervisor` calls through.

pub mod direct;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod spawn;

pub use direct::DirectBackend;
pub use dispatch::BoundBackend;
pub use error::BackendError;
pub use session::SessionBackend;
pub use spawn::{SignalKind, SpawnRequest};
