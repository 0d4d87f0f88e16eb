
mod auth;
mod event;
mod registration;
mod site;
