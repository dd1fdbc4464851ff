use crate::{sha2::Mode, HashError};
use num_bigint::BigUint;
use std::fmt::{Display, LowerHex, UpperHex};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 消息哈希摘要输出。 按书写顺序存储, 即大端序.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    // 由`HashContext::finish`保证`data.len() == mode.digest_bytes()`
    data: Vec<u8>,
    mode: Mode,
}

impl Output {
    pub(crate) fn from_vec(mode: Mode, digest: Vec<u8>) -> Self {
        debug_assert_eq!(digest.len(), mode.digest_bytes());
        Self { data: digest, mode }
    }

    pub fn iter(&self) -> std::slice::Iter<u8> {
        self.data.iter()
    }

    /// 生成该摘要的哈希模式
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn to_vec(self) -> Vec<u8> {
        self.data
    }

    /// 字节长度
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 位长度
    pub fn bits(&self) -> usize {
        self.data.len() << 3
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for Output {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

impl AsRef<[u8]> for Output {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// `N`必须和`Output.len()`匹配, 否则会返回`HashError`.
impl<const N: usize> TryFrom<Output> for [u8; N] {
    type Error = HashError;

    fn try_from(value: Output) -> Result<Self, Self::Error> {
        if N != value.len() {
            Err(HashError::MismatchingByteLen {
                target: N,
                real: value.len(),
            })
        } else {
            let mut arr = [0u8; N];
            arr.copy_from_slice(value.as_ref());

            Ok(arr)
        }
    }
}

impl From<Output> for Vec<u8> {
    fn from(value: Output) -> Self {
        value.data
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = BigUint::from_bytes_be(self.as_ref());
        f.write_fmt(format_args!("{}", n))
    }
}

impl LowerHex for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for &b in self.as_ref() {
            f.write_fmt(format_args!("{:02x}", b))?;
        }

        Ok(())
    }
}

impl UpperHex for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            f.write_str("0X")?;
        }
        for &b in self.as_ref() {
            f.write_fmt(format_args!("{:02X}", b))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::sha2::Mode;
    use crate::HashError;

    #[test]
    fn hex_keeps_leading_zero_bytes() {
        let out = super::Output::from_vec(Mode::SHA384, [0u8; 48].to_vec());
        assert_eq!(format!("{:x}", out), "0".repeat(96));
        assert_eq!(format!("{:#X}", out), format!("0X{}", "0".repeat(96)));
        assert_eq!(format!("{}", out), "0");
    }

    #[test]
    fn accessors() {
        let out = Mode::SHA384.digest(b"abc");
        assert_eq!(out.mode(), Mode::SHA384);
        assert_eq!(out.len(), 48);
        assert_eq!(out.bits(), 384);
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), out.as_ref());
        assert_eq!(out.iter().next(), Some(&0xcb));
    }

    #[test]
    fn to_array() {
        let out = Mode::SHA512.digest(b"abc");
        let arr: [u8; 64] = out.clone().try_into().unwrap();
        assert_eq!(arr.as_slice(), out.as_ref());

        let err = <[u8; 48]>::try_from(out).unwrap_err();
        assert_eq!(
            err,
            HashError::MismatchingByteLen {
                target: 48,
                real: 64
            }
        );
    }
}
