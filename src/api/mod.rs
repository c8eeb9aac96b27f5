pub mod charge;
pub mod dedicated_account;
