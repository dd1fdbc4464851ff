//! 实现标准: [FIPS 180-4](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf)<br>
//!
//! SHA-384和SHA-512共用同一个压缩函数, 只有初始化常量和输出摘要的长度不同.

use std::ops::{BitAnd, BitXor, Not};

#[inline]
fn f_ch<T>(x: T, y: T, z: T) -> T
where
    T: Not<Output = T> + BitXor<Output = T> + BitAnd<Output = T> + Copy,
{
    (x & y) ^ ((!x) & z)
}

#[inline]
fn f_maj<T>(x: T, y: T, z: T) -> T
where
    T: Not<Output = T> + BitXor<Output = T> + BitAnd<Output = T> + Copy,
{
    (x & y) ^ (x & z) ^ (y & z)
}

/// 块字节长度
pub const BLOCK_SIZE: usize = 128;
/// 单词字节长度
pub const WORD_SIZE: usize = 8;
/// 寄存器(单词)个数
pub const STATE_WSIZE: usize = 8;
/// 填充时数据的位长度占用的字节数
const LEN_PADDING_SIZE: usize = 16;

mod consts;
pub use consts::{INIT_384, INIT_512, K};

mod compress;
pub use compress::compress_block;

mod mode;
pub use mode::Mode;

mod context;
pub use context::HashContext;

mod sha512;
pub use sha512::{SHA384, SHA512};

mod selftest;
pub use selftest::{self_test, self_test_with, SelfTestCase, SelfTestFailure, SELF_TEST_CASES};
