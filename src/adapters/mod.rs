// Adapters layer: file formats at the edge of the engine (CSV, clipboard text).

pub mod tabular;
