pub mod error;
pub mod header;
pub mod transcoder;
pub mod types;
pub mod utils;

pub use crate::error::PiNbtError;
pub use crate::transcoder::{inspect, transcode, transcode_file};
pub use crate::types::{Action, HeaderInfo, HeaderState, LevelHeader, Operation, TranscodeReport};

/// 存储格式版本号（头部的前4个字节）
pub const FORMAT_TAG: u32 = 3;

/// 头部总长度：格式标记 + 数据大小
pub const HEADER_SIZE: usize = 8;

/// 检测头部时预读的字节数
pub const PROBE_SIZE: usize = 4;
