pub mod charge;
pub mod common;
pub mod dedicated_account;
pub mod webhook;
