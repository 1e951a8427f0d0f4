//! Application services over the repository traits.

pub mod catalog;
pub mod categories;
pub mod documents;
pub mod error;
pub mod home;
pub mod pagination;
pub mod posts;
pub mod repos;
