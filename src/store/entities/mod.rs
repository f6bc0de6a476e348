//! Database entities

pub mod logged_request;

pub use logged_request::Entity as LoggedRequest;
