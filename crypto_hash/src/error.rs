use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashError {
    /// 实际字节长度`real`和目标字节长度`target`不匹配
    MismatchingByteLen {
        target: usize,
        real: usize,
    },
    /// 已经调用过`finish`的上下文不能再写入数据, 需先`reset`
    Finalized,
    /// 不能识别的哈希模式名
    UnknownMode(String),
}

impl Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashError::MismatchingByteLen { target, real } => f.write_fmt(format_args!(
                "real byte length `{real}` not match to target byte length `{target}`"
            )),
            HashError::Finalized => {
                f.write_str("the hash context is already finished, reset it before update")
            }
            HashError::UnknownMode(s) => f.write_fmt(format_args!("unknown hash mode `{s}`")),
        }
    }
}

impl Error for HashError {}

impl From<HashError> for std::io::Error {
    fn from(value: HashError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, value)
    }
}
