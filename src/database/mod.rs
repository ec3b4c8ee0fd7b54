//! Acceso a base de datos
//! 
//! Pool de conexiones y migraciones de arranque.

pub mod connection;
pub mod schema;
