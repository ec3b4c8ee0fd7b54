//! Entidades tipadas del sistema
//! 
//! Las filas del store se convierten a estos structs en la frontera
//! de persistencia (repositories).

pub mod user;
pub mod vehicle;
pub mod share;
pub mod license;
