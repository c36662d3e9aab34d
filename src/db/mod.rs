pub mod executor;
pub mod invite;
pub mod service;
pub mod teams;
pub mod transaction;
pub mod user;
pub mod vacation;
