// Domain layer: book records, import results and the config port.

pub mod model;
pub mod ports;
