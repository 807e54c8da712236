use crate::error::PiNbtError;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// 尽量读满缓冲区，遇到EOF时提前返回，返回实际读取的字节数
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, PiNbtError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// 计算从当前位置到流末尾的长度，之后恢复原位置
pub fn remaining_len<S: Seek>(seeker: &mut S) -> Result<u64, PiNbtError> {
    let current = seeker.stream_position()?;
    let end = seeker.seek(SeekFrom::End(0))?;
    seeker.seek(SeekFrom::Start(current))?;

    Ok(end.saturating_sub(current))
}

/// 原样复制剩余的全部字节
pub fn copy_stream<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<u64, PiNbtError> {
    Ok(io::copy(reader, writer)?)
}
