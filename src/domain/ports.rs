use crate::domain::model::{LocalizedTime, RenderMode};
use crate::utils::error::Result;

/// Byte-oriented input with poll semantics. `read_available` must return
/// immediately with whatever is buffered; a silent receiver yields zero
/// bytes, never a blocked call.
pub trait ByteSource: Send {
    fn bytes_available(&self) -> Result<usize>;
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// Consumer of the per-tick time value. Gets calendar fields only, already
/// zone-adjusted, at most once per second.
pub trait DisplaySink: Send {
    fn render(&mut self, time: &LocalizedTime, mode: RenderMode) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn port_path(&self) -> &str;
    fn baud_rate(&self) -> u32;
    fn time_zone(&self) -> &str;
    fn render_mode(&self) -> RenderMode;
}
