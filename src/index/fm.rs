use serde::{Deserialize, Serialize};

/// 压缩字母表：只为语料中实际出现的（大写折叠后的）字节分配编码，
/// 编码从 1 开始，0 预留给 read 之间的分隔符 `$`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alphabet {
    /// 256 entries, indexed by the uppercased byte; 0 = absent
    codes: Vec<u8>,
    sigma: u8,
}

impl Alphabet {
    pub fn from_reads<'a, I>(reads: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut seen = [false; 256];
        for read in reads {
            for &b in read {
                seen[b.to_ascii_uppercase() as usize] = true;
            }
        }
        let mut codes = vec![0u8; 256];
        let mut next = 1u8;
        for b in 0..256 {
            if seen[b] {
                codes[b] = next;
                next += 1;
            }
        }
        Self { codes, sigma: next }
    }

    /// 字母表大小（含分隔符）
    #[inline]
    pub fn sigma(&self) -> usize {
        self.sigma as usize
    }

    #[inline]
    pub fn encode(&self, b: u8) -> Option<u8> {
        match self.codes[b.to_ascii_uppercase() as usize] {
            0 => None,
            c => Some(c),
        }
    }

    /// Returns `None` when some byte never occurs in the corpus.
    pub fn encode_seq(&self, seq: &[u8]) -> Option<Vec<u8>> {
        seq.iter().map(|&b| self.encode(b)).collect()
    }
}

/// 朴素 FM 索引：
/// - 字母以 [0..sigma) 编码（0 为分隔符）；
/// - Occ 按定长分块采样，块内顺扫补偿；
/// - 保存完整 SA，便于从区间直接取位置。
#[derive(Debug, Serialize, Deserialize)]
pub struct FMIndex {
    pub sigma: u16,
    pub block: u32,
    /// C[a] = 文本中编码 < a 的字符总数
    pub c: Vec<u32>,
    pub bwt: Vec<u8>,
    /// occ_samples[block_id * sigma + a] = BWT[0..block_id*block) 中 a 的个数
    pub occ_samples: Vec<u32>,
    pub sa: Vec<u32>,
}

impl FMIndex {
    pub fn build(bwt: Vec<u8>, sa: Vec<u32>, sigma: usize, block: usize) -> Self {
        let n = bwt.len();
        let block = block.max(1);

        let mut freq = vec![0u32; sigma];
        for &ch in &bwt {
            freq[ch as usize] += 1;
        }
        let c: Vec<u32> = freq
            .iter()
            .scan(0u32, |acc, &f| {
                let start = *acc;
                *acc += f;
                Some(start)
            })
            .collect();

        let num_blocks = (n + block - 1) / block;
        let mut occ_samples = Vec::with_capacity(num_blocks * sigma);
        let mut running = vec![0u32; sigma];
        for chunk in bwt.chunks(block) {
            occ_samples.extend_from_slice(&running);
            for &ch in chunk {
                running[ch as usize] += 1;
            }
        }

        Self { sigma: sigma as u16, block: block as u32, c, bwt, occ_samples, sa }
    }

    /// BWT[0..pos) 中 `a` 的出现次数
    #[inline]
    pub fn occ(&self, a: u8, pos: usize) -> u32 {
        if pos == 0 {
            return 0;
        }
        let sigma = self.sigma as usize;
        let block = self.block as usize;
        let bi = (pos - 1) / block;
        let start = bi * block;
        let base = self.occ_samples[bi * sigma + a as usize];
        base + self.bwt[start..pos].iter().filter(|&&ch| ch == a).count() as u32
    }

    /// Extends the interval `[l, r)` by one leading character `a`.
    #[inline]
    pub fn rank_range(&self, a: u8, l: usize, r: usize) -> (usize, usize) {
        let c0 = self.c[a as usize] as usize;
        (c0 + self.occ(a, l) as usize, c0 + self.occ(a, r) as usize)
    }

    /// 反向搜索精确匹配；`pat` 为编码后的字符（不含 0）。
    pub fn backward_search(&self, pat: &[u8]) -> Option<(usize, usize)> {
        if self.bwt.is_empty() {
            return None;
        }
        let (mut l, mut r) = (0usize, self.bwt.len());
        for &a in pat.iter().rev() {
            if a as usize >= self.sigma as usize {
                return None;
            }
            let (nl, nr) = self.rank_range(a, l, r);
            if nl >= nr {
                return None;
            }
            l = nl;
            r = nr;
        }
        Some((l, r))
    }

    pub fn sa_interval_positions(&self, l: usize, r: usize) -> &[u32] {
        &self.sa[l..r]
    }
}
