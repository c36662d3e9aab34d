pub mod crypto;
pub mod webutils;
