use crate::sha2::{f_ch, f_maj, BLOCK_SIZE, K, STATE_WSIZE, WORD_SIZE};

#[inline]
const fn rotate_s0(x: u64) -> u64 {
    x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

#[inline]
const fn rotate_s1(x: u64) -> u64 {
    x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

#[inline]
const fn rotate_d0(x: u64) -> u64 {
    x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

#[inline]
const fn rotate_d1(x: u64) -> u64 {
    x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

/// 压缩一个128字节的块, 返回新的哈希状态. 所有加法都是模2^64的.
pub fn compress_block(
    digest: [u64; STATE_WSIZE],
    block: &[u8; BLOCK_SIZE],
) -> [u64; STATE_WSIZE] {
    let mut words = [0u64; 80];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(WORD_SIZE)) {
        let mut be = [0u8; WORD_SIZE];
        be.copy_from_slice(bytes);
        *word = u64::from_be_bytes(be);
    }

    (BLOCK_SIZE / WORD_SIZE..words.len()).for_each(|j| {
        words[j] = rotate_d1(words[j - 2])
            .wrapping_add(words[j - 7])
            .wrapping_add(rotate_d0(words[j - 15]))
            .wrapping_add(words[j - 16]);
    });

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = digest;

    words.into_iter().zip(K).for_each(|(word, k)| {
        let t1 = h
            .wrapping_add(rotate_s1(e))
            .wrapping_add(f_ch(e, f, g))
            .wrapping_add(k)
            .wrapping_add(word);
        let t2 = rotate_s0(a).wrapping_add(f_maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    });

    let mut out = digest;
    for (o, x) in out.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *o = o.wrapping_add(x);
    }
    out
}

/// 依次压缩`blocks`中的每个完整块, `blocks.len()`需为`BLOCK_SIZE`的整数倍, 多余的尾部字节会被忽略.
pub(in crate::sha2) fn compress(digest: &mut [u64; STATE_WSIZE], blocks: &[u8]) {
    for chunk in blocks.chunks_exact(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        *digest = compress_block(*digest, &block);
    }
}
