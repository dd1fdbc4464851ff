use crate::sha2::{HashContext, INIT_384, INIT_512, STATE_WSIZE};
use crate::{HashError, Output};
use std::fmt::Display;
use std::str::FromStr;

/// 哈希模式, 创建`HashContext`时指定, 之后不可更改.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    SHA384,
    SHA512,
}

impl Mode {
    /// 初始哈希值
    pub const fn init(self) -> [u64; STATE_WSIZE] {
        match self {
            Mode::SHA384 => INIT_384,
            Mode::SHA512 => INIT_512,
        }
    }

    /// 摘要位长度
    pub const fn digest_bits(self) -> usize {
        match self {
            Mode::SHA384 => 384,
            Mode::SHA512 => 512,
        }
    }

    /// 摘要字节长度
    pub const fn digest_bytes(self) -> usize {
        self.digest_bits() >> 3
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::SHA384 => "SHA-384",
            Mode::SHA512 => "SHA-512",
        }
    }

    /// 生成消息摘要
    pub fn digest(self, msg: &[u8]) -> Output {
        let mut ctx = HashContext::new(self);
        ctx.absorb(msg);
        ctx.finish()
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 可接受`384`, `sha384`, `SHA-512`, `s2-512`等写法, 不区分大小写.
impl FromStr for Mode {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let bits = lower
            .strip_prefix("sha")
            .or_else(|| lower.strip_prefix("s2"))
            .unwrap_or(lower.as_str())
            .trim_start_matches(['-', '_']);

        match bits {
            "384" => Ok(Mode::SHA384),
            "512" => Ok(Mode::SHA512),
            _ => Err(HashError::UnknownMode(s.to_string())),
        }
    }
}
