//! Cross-cutting helpers

pub mod shutdown;

pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
