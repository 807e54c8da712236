use std::fmt;

/// 请求的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddHeader,
    RemoveHeader,
}

impl Operation {
    /// 命令行中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::AddHeader => "add-header",
            Operation::RemoveHeader => "remove-header",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 输入流的头部检测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Present,
    Absent,
}

/// 根据操作和检测结果选出的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 原样复制
    PassThrough,
    /// 写入新头部后复制全部输入
    PrependHeader,
    /// 跳过8字节头部后复制剩余部分
    SkipHeader,
}

impl Action {
    pub fn resolve(operation: Operation, state: HeaderState) -> Self {
        match (operation, state) {
            (Operation::AddHeader, HeaderState::Present) => Action::PassThrough,
            (Operation::AddHeader, HeaderState::Absent) => Action::PrependHeader,
            (Operation::RemoveHeader, HeaderState::Absent) => Action::PassThrough,
            (Operation::RemoveHeader, HeaderState::Present) => Action::SkipHeader,
        }
    }
}

/// level.dat 存储头部
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelHeader {
    pub format_tag: u32,
    pub payload_size: u32,
}

impl LevelHeader {
    /// 为指定长度的数据创建头部，超过4GB的长度按 2^32 取模
    pub fn for_payload(len: u64) -> Self {
        Self {
            format_tag: crate::FORMAT_TAG,
            payload_size: len as u32,
        }
    }
}

/// 一次转换的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeReport {
    pub action: Action,
    /// 写入的头部字节数（仅 PrependHeader 为8）
    pub header_written: u64,
    /// 跳过的头部字节数（仅 SkipHeader 非0）
    pub header_skipped: u64,
    /// 复制到输出的数据字节数
    pub payload_copied: u64,
}

/// 头部检查信息，不修改任何数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderInfo {
    pub state: HeaderState,
    pub header: Option<LevelHeader>,
    /// 头部之后实际剩余的字节数（无头部时为整个流的长度）
    pub actual_payload_size: u64,
}

impl HeaderInfo {
    /// 声明的数据大小是否与实际剩余长度一致
    pub fn size_matches(&self) -> bool {
        match self.header {
            Some(header) => header.payload_size as u64 == self.actual_payload_size,
            None => true,
        }
    }
}
