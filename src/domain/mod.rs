//! Domain modules (vertical slices): types, wire types, sub-clients.

pub mod account;
pub mod asset;
pub mod governance;
pub mod market;
pub mod network;
pub mod order;
pub mod party;
pub mod trade;
