pub mod decoder;
pub mod engine;
pub mod reader;
pub mod synchronizer;

pub use crate::domain::model::{LocalizedTime, RenderMode, RmcData, Sentence, ZoneSelection};
pub use crate::domain::ports::{ByteSource, ConfigProvider, DisplaySink};
pub use crate::utils::error::Result;
