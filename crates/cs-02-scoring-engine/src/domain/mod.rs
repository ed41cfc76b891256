//! Domain layer for the scoring engine

pub mod figures;
pub mod innings;
pub mod state;
