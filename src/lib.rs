pub mod config;
pub mod di;
pub mod entity;
pub mod handlers;
pub mod interactor;
pub mod pinata;
pub mod presenter;
pub mod router;
pub mod solana;
pub mod view;

// Re-export commonly used items
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use presenter::*;
pub use router::*;
pub use solana::*;

/// Crate version, reported at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
