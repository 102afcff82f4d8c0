// Adapters layer: concrete implementations for external systems (http engine, stdin, station files)

pub mod prompt;
pub mod stations;
pub mod taup_client;
