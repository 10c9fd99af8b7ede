//! SeaORM adapters. Each function is one statement against the store.

pub mod moves_sea;
pub mod sessions_sea;
