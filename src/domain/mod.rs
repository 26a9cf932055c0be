// Domain layer: boleto types and the rendering port. No I/O here.

pub mod model;
pub mod ports;
