// Adapters layer: concrete implementations of the domain ports for the
// machine we actually run on (serial device in, terminal out).

pub mod serial;
pub mod terminal;
