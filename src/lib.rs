pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod ledger;
pub mod quests;
pub mod random;
pub mod rules;
pub mod simulator;
pub mod tracker;
// cmd and reports are binary modules (declared in main.rs).
