pub mod digest;
pub mod vesting;
