// Domain layer: grid rows, output document shapes and ports (interfaces).

pub mod document;
pub mod model;
pub mod ports;
