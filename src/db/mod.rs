pub mod pull_requests;
pub mod service;
pub mod teams;
pub mod users;
