pub mod error;
pub mod invite;
pub mod response;
pub mod team;
pub mod user;
pub mod vacation;
pub mod validate;
