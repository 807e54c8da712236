use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PiNbtError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid Arguments: {0}")]
    InvalidArguments(String),

    #[error("Unable To Open Input/Output File(s): {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PiNbtError {
    /// 为打开文件失败的错误附加路径信息
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PiNbtError::Open {
            path: path.into(),
            source,
        }
    }
}
