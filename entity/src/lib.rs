pub mod invite;
pub mod team;
pub mod user;
pub mod user_team;
pub mod vacation_approval;
pub mod vacation_request;

/*
 Status and type columns are stored as plain integers, the same codes the API speaks.
 The typed enums live in the service crate and convert on every read.
 There are no foreign keys between these tables; the service checks that users and
 teams exist before it writes anything that references them.
 */
