//! FIPS 180-2 附录中的SHA-384/SHA-512测试向量自检.

use crate::sha2::{HashContext, Mode};
use crate::Output;
use std::fmt::Display;

/// 自检用例: 消息由`chunk`重复写入`repeat`次组成.
#[derive(Clone, Copy, Debug)]
pub struct SelfTestCase {
    pub mode: Mode,
    pub chunk: &'static [u8],
    pub repeat: usize,
    pub expected: &'static str,
}

impl SelfTestCase {
    /// 按用例的分块方式计算摘要
    pub fn run(&self) -> Output {
        let mut ctx = HashContext::new(self.mode);
        (0..self.repeat).for_each(|_| ctx.absorb(self.chunk));
        ctx.finish()
    }

    /// `expected`解码后的摘要字节, 非法的十六进制字符串返回`None`
    pub fn expected_bytes(&self) -> Option<Vec<u8>> {
        let s = self.expected.as_bytes();
        if s.len() % 2 != 0 {
            return None;
        }

        s.chunks_exact(2)
            .map(|x| {
                std::str::from_utf8(x)
                    .ok()
                    .and_then(|x| u8::from_str_radix(x, 16).ok())
            })
            .collect()
    }
}

const ABC: &[u8] = b"abc";
const TWO_BLOCK: &[u8] = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";
const A_1000: &[u8] = &[b'a'; 1000];

pub const SELF_TEST_CASES: [SelfTestCase; 6] = [
    SelfTestCase {
        mode: Mode::SHA384,
        chunk: ABC,
        repeat: 1,
        expected: "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
    },
    SelfTestCase {
        mode: Mode::SHA384,
        chunk: TWO_BLOCK,
        repeat: 1,
        expected: "09330c33f71147e83d192fc782cd1b4753111b173b3b05d22fa08086e3b0f712fcc7c71a557e2db966c3e9fa91746039",
    },
    SelfTestCase {
        mode: Mode::SHA384,
        chunk: A_1000,
        repeat: 1000,
        expected: "9d0e1809716474cb086e834e310a4a1ced149e9c00f248527972cec5704c2a5b07b8b3dc38ecc4ebae97ddd87f3d8985",
    },
    SelfTestCase {
        mode: Mode::SHA512,
        chunk: ABC,
        repeat: 1,
        expected: "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
    },
    SelfTestCase {
        mode: Mode::SHA512,
        chunk: TWO_BLOCK,
        repeat: 1,
        expected: "8e959b75dae313da8cf4f72814fc143f8f7779c6eb9f7fa17299aeadb6889018501d289e4900f7e4331b99dec4b5433ac7d329eeb6dd26545e96e55b874be909",
    },
    SelfTestCase {
        mode: Mode::SHA512,
        chunk: A_1000,
        repeat: 1000,
        expected: "e718483d0ce769644e2e42c7bc15b4638e1f98b13b2044285632a803afa973ebde0ff244877ea60a4cb0432ce577c31beb009c5c2c49aa2e4eadb217ad8cc09b",
    },
];

/// 自检失败, 表示实现有误, 与输入数据无关.
#[derive(Clone, Debug)]
pub struct SelfTestFailure {
    pub mode: Mode,
    /// 同一模式下用例的序号, 从1开始
    pub case: usize,
    pub expected: &'static str,
    pub actual: String,
}

impl Display for SelfTestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{} test {} failed: expected `{}`, got `{}`",
            self.mode, self.case, self.expected, self.actual
        ))
    }
}

impl std::error::Error for SelfTestFailure {}

/// 运行全部自检用例, 遇到第一个失败的用例即返回.
pub fn self_test() -> Result<(), SelfTestFailure> {
    self_test_with(|_, _, _| {})
}

/// 同`self_test`, 每个用例完成后以`(模式, 序号, 是否通过)`回调`report`.
pub fn self_test_with<F>(mut report: F) -> Result<(), SelfTestFailure>
where
    F: FnMut(Mode, usize, bool),
{
    for (i, case) in SELF_TEST_CASES.iter().enumerate() {
        let idx = i % 3 + 1;
        let actual = format!("{:x}", case.run());
        let passed = actual == case.expected;
        report(case.mode, idx, passed);

        if !passed {
            return Err(SelfTestFailure {
                mode: case.mode,
                case: idx,
                expected: case.expected,
                actual,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{self_test, self_test_with, SELF_TEST_CASES};
    use crate::sha2::Mode;

    #[test]
    fn fips_vectors() {
        assert!(self_test().is_ok());
    }

    #[test]
    fn report_order() {
        let mut seen = Vec::new();
        self_test_with(|mode, idx, passed| seen.push((mode, idx, passed))).unwrap();
        assert_eq!(
            seen,
            vec![
                (Mode::SHA384, 1, true),
                (Mode::SHA384, 2, true),
                (Mode::SHA384, 3, true),
                (Mode::SHA512, 1, true),
                (Mode::SHA512, 2, true),
                (Mode::SHA512, 3, true),
            ]
        );
    }

    #[test]
    fn digest_len_matches_mode() {
        for case in SELF_TEST_CASES {
            assert_eq!(case.run().len(), case.mode.digest_bytes());
            assert_eq!(case.expected.len(), case.mode.digest_bytes() * 2);
        }
    }

    #[test]
    fn expected_bytes() {
        for case in SELF_TEST_CASES {
            assert_eq!(case.expected_bytes().as_deref(), Some(case.run().as_ref()));
        }

        let mut case = SELF_TEST_CASES[0];
        case.expected = "0g";
        assert!(case.expected_bytes().is_none());
        case.expected = "abc";
        assert!(case.expected_bytes().is_none());
    }
}
