// Domain layer: models, phase lists and ports. No I/O here.

pub mod model;
pub mod phases;
pub mod ports;
