// Foodcourt Kernel
//
// In-memory catalog store and the session layer for a food ordering
// counter.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod invariants;
pub mod log;
pub mod orders;
pub mod payment;
pub mod replay;
pub mod session;
pub mod simulate;
