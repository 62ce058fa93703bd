//! # redcamp-clients
//!
//! Blocking HTTP adapters for the two remote systems:
//! [`RedmineClient`] implements [`redcamp_sync::ProjectSource`] and
//! [`TimeCampClient`] implements [`redcamp_sync::TaskTarget`].

pub mod http;
pub mod listing;
pub mod redmine;
pub mod timecamp;

pub use listing::TaskListing;
pub use redmine::RedmineClient;
pub use timecamp::TimeCampClient;
