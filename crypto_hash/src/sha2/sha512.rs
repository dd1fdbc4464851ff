use crate::sha2::{HashContext, Mode, BLOCK_SIZE, WORD_SIZE};
use crate::{Digest, Output};
use std::io::Write;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// $NAME: 结构体的名字<br>
/// $MODE: 对应的哈希模式<br>
macro_rules! sha512_family {
    ($NAME: ident, $MODE: expr) => {
        /// 实现标准: [FIPS 180-4](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf)
        #[derive(Clone)]
        pub struct $NAME {
            ctx: HashContext,
        }

        impl $NAME {
            pub const fn new() -> Self {
                Self {
                    ctx: HashContext::new($MODE),
                }
            }
        }

        impl Default for $NAME {
            fn default() -> Self {
                Self::new()
            }
        }

        #[cfg(feature = "sec-zeroize")]
        impl Zeroize for $NAME {
            fn zeroize(&mut self) {
                self.ctx.zeroize();
            }
        }

        impl Write for $NAME {
            fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
                self.ctx.update(data)?;
                Ok(data.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl Digest for $NAME {
            const BLOCK_BITS: usize = BLOCK_SIZE << 3;
            const WORD_BITS: usize = WORD_SIZE << 3;
            const DIGEST_BITS: usize = $MODE.digest_bits();

            fn digest(msg: &[u8]) -> Output {
                $MODE.digest(msg)
            }

            fn finalize(&mut self) -> Output {
                self.ctx.finish()
            }

            fn reset(&mut self) {
                self.ctx.reset();
            }
        }
    };
}

sha512_family!(SHA512, Mode::SHA512);
sha512_family!(SHA384, Mode::SHA384);
