pub mod assets;
pub mod event;
pub mod export;
pub mod hash;
pub mod jwt;
pub mod registration;
pub mod xlsx;
