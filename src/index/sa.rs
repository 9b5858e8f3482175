use rayon::prelude::*;

/// 构建后缀数组（前缀倍增，每轮按 (rank[i], rank[i+k]) 排序）。
/// 输入为编码后的文本，0 为 read 之间的分隔符，可出现多次。
/// 排序步骤使用 rayon 并行；这只发生在离线建索引阶段。
pub fn build_sa(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut sa: Vec<u32> = (0..n as u32).collect();
    // rank 0 is reserved for "past the end"
    let mut rank: Vec<u32> = text.iter().map(|&b| u32::from(b) + 1).collect();
    let mut next = vec![0u32; n];

    let mut k = 1usize;
    loop {
        let key = |i: u32| {
            let i = i as usize;
            (rank[i], if i + k < n { rank[i + k] } else { 0 })
        };
        sa.par_sort_unstable_by_key(|&i| key(i));

        next[sa[0] as usize] = 1;
        for w in 1..n {
            let bump = u32::from(key(sa[w - 1]) != key(sa[w]));
            next[sa[w] as usize] = next[sa[w - 1] as usize] + bump;
        }
        std::mem::swap(&mut rank, &mut next);

        if rank[sa[n - 1] as usize] as usize == n || k >= n {
            break;
        }
        k <<= 1;
    }
    sa
}
