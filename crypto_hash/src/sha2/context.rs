use crate::sha2::{compress::compress, Mode, BLOCK_SIZE, LEN_PADDING_SIZE, STATE_WSIZE};
use crate::{HashError, Output};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 数据长度需填充到该字节数(模`BLOCK_SIZE`), 剩余的`LEN_PADDING_SIZE`字节存放数据的位长度
const DATA_PADDING_BYTES: usize = BLOCK_SIZE - LEN_PADDING_SIZE;

/// 对未满一个块的剩余数据`pending`做填充: 追加`0x80`, 补0到长度模`BLOCK_SIZE`为`DATA_PADDING_BYTES`,
/// 最后追加大端序的128位消息位长度`bits`. <br>
///
/// 返回填充结果和其有效字节长度(`BLOCK_SIZE`或`2*BLOCK_SIZE`).
pub(in crate::sha2) fn pad(pending: &[u8], bits: u128) -> ([u8; 2 * BLOCK_SIZE], usize) {
    debug_assert!(pending.len() < BLOCK_SIZE);

    let len = if pending.len() < DATA_PADDING_BYTES {
        BLOCK_SIZE
    } else {
        2 * BLOCK_SIZE
    };

    let mut blocks = [0u8; 2 * BLOCK_SIZE];
    blocks[..pending.len()].copy_from_slice(pending);
    blocks[pending.len()] = 0x80;
    blocks[(len - LEN_PADDING_SIZE)..len].copy_from_slice(&bits.to_be_bytes());

    (blocks, len)
}

/// SHA-384/SHA-512的流式哈希上下文. <br>
///
/// - `update`可调用任意多次, 数据按任意大小分块写入;
/// - `finish`完成填充并输出摘要, 重复调用返回相同的摘要;
/// - `finish`之后调用`update`会返回`HashError::Finalized`, 需先`reset`;
#[derive(Clone)]
pub struct HashContext {
    mode: Mode,
    digest: [u64; STATE_WSIZE],
    buf: [u8; BLOCK_SIZE],
    // 记录buf下一个可写入位置的索引
    idx: usize,
    // 记录已写入数据的总位长度
    bits: u128,
    is_finalize: bool,
}

impl HashContext {
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            digest: mode.init(),
            buf: [0; BLOCK_SIZE],
            idx: 0,
            bits: 0,
            is_finalize: false,
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn is_finished(&self) -> bool {
        self.is_finalize
    }

    /// 已写入数据的位长度
    pub const fn bit_len(&self) -> u128 {
        self.bits
    }

    /// 缓冲区中尚未压缩的字节数, 总是小于`BLOCK_SIZE`
    pub const fn pending_len(&self) -> usize {
        self.idx
    }

    pub fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        if self.is_finalize {
            return Err(HashError::Finalized);
        }

        self.absorb(data);
        Ok(())
    }

    pub(in crate::sha2) fn absorb(&mut self, mut data: &[u8]) {
        self.bits = self.bits.wrapping_add((data.len() as u128) << 3);

        if self.idx > 0 {
            let ava_len = data.len().min(BLOCK_SIZE - self.idx);
            self.buf[self.idx..(self.idx + ava_len)].copy_from_slice(&data[..ava_len]);
            self.idx += ava_len;
            data = &data[ava_len..];

            if self.idx < BLOCK_SIZE {
                return;
            }

            compress(&mut self.digest, &self.buf);
            self.idx = 0;
        }

        let n = data.len() - data.len() % BLOCK_SIZE;
        if n > 0 {
            compress(&mut self.digest, &data[..n]);
            data = &data[n..];
        }

        if !data.is_empty() {
            self.buf[..data.len()].copy_from_slice(data);
            self.idx = data.len();
        }
    }

    pub fn finish(&mut self) -> Output {
        if !self.is_finalize {
            let (blocks, len) = pad(&self.buf[..self.idx], self.bits);
            compress(&mut self.digest, &blocks[..len]);
            self.buf = [0; BLOCK_SIZE];
            self.idx = 0;
            self.is_finalize = true;
        }

        let mut v = self
            .digest
            .iter()
            .flat_map(|x| x.to_be_bytes())
            .collect::<Vec<_>>();
        v.truncate(self.mode.digest_bytes());

        Output::from_vec(self.mode, v)
    }

    /// 恢复到初始化状态, 模式不变
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for HashContext {
    fn zeroize(&mut self) {
        self.digest.zeroize();
        self.buf.zeroize();
        self.idx.zeroize();
        self.bits.zeroize();
        // 擦除后回到初始状态, 与`reset`一致
        self.digest = self.mode.init();
        self.is_finalize = false;
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for HashContext {
    fn drop(&mut self) {
        self.zeroize();
    }
}
