//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **memory**: in-process project, tryout, membership, and comment stores
//! - **directory**: identity directory and resume lookup, optionally seeded
//!   from a JSON file
//! - **links**: expiring download links for stored thumbnails and avatars
//! - **notifications**: bounded channel sink with a logging dispatcher
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod directory;
pub mod links;
pub mod memory;
pub mod notifications;
