pub mod admin_user;
pub mod event;
pub mod registration;
pub mod registration_member;
