use crate::{
    error::PiNbtError,
    types::{HeaderState, LevelHeader},
    utils::read_up_to,
    FORMAT_TAG, HEADER_SIZE, PROBE_SIZE,
};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Seek, SeekFrom, Write};

/// 写入8字节头部：格式标记 + 数据大小，均为小端序
pub fn write_header<W: Write>(writer: &mut W, header: &LevelHeader) -> Result<(), PiNbtError> {
    writer.write_u32::<LittleEndian>(header.format_tag)?;
    writer.write_u32::<LittleEndian>(header.payload_size)?;
    Ok(())
}

/// 读取8字节头部，不检查格式标记
pub fn read_header<R: Read>(reader: &mut R) -> Result<LevelHeader, PiNbtError> {
    let format_tag = reader.read_u32::<LittleEndian>()?;
    let payload_size = reader.read_u32::<LittleEndian>()?;

    Ok(LevelHeader {
        format_tag,
        payload_size,
    })
}

/// 预读前4个字节判断是否已有头部，读取位置会被恢复
///
/// 不足4个字节的输入（包括空文件）视为没有头部。
/// 这只是启发式判断：恰好以 `03 00 00 00` 开头的原始数据也会被认为带有头部。
pub fn detect_header<R: Read + Seek>(reader: &mut R) -> Result<HeaderState, PiNbtError> {
    let mut probe = [0u8; PROBE_SIZE];
    let bytes_read = read_up_to(reader, &mut probe)?;
    reader.seek(SeekFrom::Current(-(bytes_read as i64)))?;

    if bytes_read == PROBE_SIZE && LittleEndian::read_u32(&probe) == FORMAT_TAG {
        Ok(HeaderState::Present)
    } else {
        Ok(HeaderState::Absent)
    }
}

/// 跳过头部，不检查其内容
pub fn skip_header<S: Seek>(seeker: &mut S) -> Result<(), PiNbtError> {
    seeker.seek(SeekFrom::Current(HEADER_SIZE as i64))?;
    Ok(())
}
