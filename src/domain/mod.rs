// Domain layer: core models and ports (interfaces). No I/O in here; the
// serial device and the terminal only appear behind the traits in `ports`.

pub mod model;
pub mod ports;
