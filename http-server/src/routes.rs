pub mod credentials;
pub mod magic_link;
pub mod referral;
pub mod withdrawal;
