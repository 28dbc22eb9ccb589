// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Trimflow integration tests.
//!
//! Deterministic doubles for the three external collaborators. All mocks
//! record call counts so tests can assert a collaborator was, or was not,
//! consulted.

pub mod mock_channel;
pub mod mock_generative;
pub mod mock_nlu;

pub use mock_channel::MockChannel;
pub use mock_generative::MockGenerator;
pub use mock_nlu::MockIntentDetector;
