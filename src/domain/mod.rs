//! Domain layer types and invariants.

pub mod about;
pub mod categories;
pub mod documents;
pub mod entities;
pub mod error;
pub mod home;
pub mod patch;
pub mod posts;
pub mod references;
pub mod sections;
pub mod services;
pub mod slug;
pub mod types;
