pub mod auth;
pub mod event;
pub mod export;
pub mod registration;
pub mod shared;
pub mod site;
pub mod stats;
