use crate::{
    error::PiNbtError,
    header::{detect_header, read_header, skip_header, write_header},
    types::{Action, HeaderInfo, HeaderState, LevelHeader, Operation, TranscodeReport},
    utils::{copy_stream, read_up_to, remaining_len},
    HEADER_SIZE,
};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// 检测输入头部状态并执行对应动作
pub fn transcode<R: Read + Seek, W: Write>(
    operation: Operation,
    input: &mut R,
    output: &mut W,
) -> Result<TranscodeReport, PiNbtError> {
    let state = detect_header(input)?;
    let action = Action::resolve(operation, state);

    match (operation, action) {
        (Operation::AddHeader, Action::PassThrough) => tracing::info!("Header Already Exists"),
        (Operation::RemoveHeader, Action::PassThrough) => {
            tracing::info!("Header Is Already Removed")
        }
        (_, Action::PrependHeader) => tracing::info!("Adding Header..."),
        (_, Action::SkipHeader) => tracing::info!("Removing Header..."),
    }

    execute(action, input, output)
}

/// 执行选定的动作，数据部分逐字节原样复制
pub fn execute<R: Read + Seek, W: Write>(
    action: Action,
    input: &mut R,
    output: &mut W,
) -> Result<TranscodeReport, PiNbtError> {
    let mut report = TranscodeReport {
        action,
        header_written: 0,
        header_skipped: 0,
        payload_copied: 0,
    };

    match action {
        Action::PassThrough => {}
        Action::PrependHeader => {
            // 必须在读取数据之前确定长度
            let len = remaining_len(input)?;
            if len > u32::MAX as u64 {
                tracing::warn!("输入大小 {} 超过4GB，头部中的大小字段将被截断", len);
            }

            let header = LevelHeader::for_payload(len);
            tracing::debug!(
                "写入头部: 版本 {}, 数据大小 {}",
                header.format_tag,
                header.payload_size
            );
            write_header(output, &header)?;
            report.header_written = HEADER_SIZE as u64;
        }
        Action::SkipHeader => {
            let before = remaining_len(input)?;
            skip_header(input)?;
            report.header_skipped = before.min(HEADER_SIZE as u64);
        }
    }

    report.payload_copied = copy_stream(input, output)?;
    tracing::debug!(
        "{:?}: 头部写入 {} 字节, 跳过 {} 字节, 复制数据 {} 字节",
        report.action,
        report.header_written,
        report.header_skipped,
        report.payload_copied
    );

    Ok(report)
}

/// 检查输入的头部信息，不修改读取位置
pub fn inspect<R: Read + Seek>(input: &mut R) -> Result<HeaderInfo, PiNbtError> {
    let state = detect_header(input)?;
    let total = remaining_len(input)?;

    let header = match state {
        HeaderState::Absent => None,
        HeaderState::Present => {
            let mut raw = [0u8; HEADER_SIZE];
            let n = read_up_to(input, &mut raw)?;
            input.seek(SeekFrom::Current(-(n as i64)))?;
            if n == HEADER_SIZE {
                Some(read_header(&mut &raw[..])?)
            } else {
                None
            }
        }
    };

    let actual_payload_size = match state {
        HeaderState::Absent => total,
        HeaderState::Present => total.saturating_sub(HEADER_SIZE as u64),
    };

    Ok(HeaderInfo {
        state,
        header,
        actual_payload_size,
    })
}

/// 对文件执行转换
///
/// 先打开输入；输入无法打开时不会创建输出文件。
/// 输入与输出为同一文件时，先写入同目录下的临时文件，完成后再替换原文件。
pub fn transcode_file<P: AsRef<Path>, Q: AsRef<Path>>(
    operation: Operation,
    input_path: P,
    output_path: Q,
) -> Result<TranscodeReport, PiNbtError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    let file = File::open(input_path).map_err(|e| PiNbtError::open(input_path, e))?;
    let in_place = same_file(&file, input_path, output_path)?;
    let mut reader = BufReader::new(file);

    // 声明的大小只记录，不做校验
    let info = inspect(&mut reader)?;
    match info.header {
        Some(header) if !info.size_matches() => tracing::debug!(
            "头部声明的数据大小 {} 与实际剩余 {} 不一致",
            header.payload_size,
            info.actual_payload_size
        ),
        Some(header) => tracing::debug!("头部声明的数据大小: {}", header.payload_size),
        None => tracing::debug!(
            "{:?}: 数据大小 {}",
            info.state,
            info.actual_payload_size
        ),
    }

    let report = if in_place {
        tracing::debug!("输入与输出为同一文件，使用临时文件: {}", output_path.display());
        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| PiNbtError::open(output_path, e))?;

        let report = {
            let mut writer = BufWriter::new(temp.as_file_mut());
            let report = transcode(operation, &mut reader, &mut writer)?;
            writer.flush()?;
            report
        };

        // 保留原文件的权限，临时文件默认为 0600
        let permissions = reader.get_ref().metadata()?.permissions();
        temp.as_file().set_permissions(permissions)?;

        // 替换前先关闭输入文件
        drop(reader);
        temp.persist(output_path).map_err(|e| PiNbtError::Io(e.error))?;
        report
    } else {
        let file = File::create(output_path).map_err(|e| PiNbtError::open(output_path, e))?;
        let mut writer = BufWriter::new(file);
        let report = transcode(operation, &mut reader, &mut writer)?;
        writer.flush()?;
        report
    };

    tracing::info!("Done");
    Ok(report)
}

/// 判断输出路径是否指向已打开的输入文件（包括硬链接）
#[cfg(unix)]
fn same_file(input: &File, _input_path: &Path, output: &Path) -> Result<bool, PiNbtError> {
    use std::os::unix::fs::MetadataExt;

    let output = match fs::metadata(output) {
        Ok(metadata) => metadata,
        // 输出文件尚不存在
        Err(_) => return Ok(false),
    };
    let input = input.metadata()?;
    Ok(input.dev() == output.dev() && input.ino() == output.ino())
}

/// 非 unix 平台只比较规范化路径，无法识别硬链接
#[cfg(not(unix))]
fn same_file(_input: &File, input_path: &Path, output: &Path) -> Result<bool, PiNbtError> {
    let output = match fs::canonicalize(output) {
        Ok(path) => path,
        Err(_) => return Ok(false),
    };
    Ok(fs::canonicalize(input_path)? == output)
}
