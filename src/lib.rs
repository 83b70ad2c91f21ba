//! Gym Membership - membership ledger, admin API and mail relay
//!
//! Accounts buy time-boxed packages; the ledger derives plan status,
//! remaining days and prorated refunds from the purchase history. A small
//! relay forwards OTP, reminder and reply emails through the mail API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
