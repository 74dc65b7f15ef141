// Adapters layer: concrete implementations for external systems (files, export formats).

pub mod export;
pub mod storage;
