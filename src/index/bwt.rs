/// 由后缀数组得到 BWT：每个后缀的前一个字符（循环）。
pub fn build_bwt(text: &[u8], sa: &[u32]) -> Vec<u8> {
    let n = text.len();
    sa.iter()
        .map(|&p| {
            let p = p as usize;
            text[if p == 0 { n - 1 } else { p - 1 }]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::sa::build_sa;

    #[test]
    fn bwt_of_small_text() {
        // A C A $ -> 1 2 1 0 ; sorted suffixes: $, A$, ACA$, CA$
        let text = [1u8, 2, 1, 0];
        let sa = build_sa(&text);
        assert_eq!(sa, vec![3, 2, 0, 1]);
        assert_eq!(build_bwt(&text, &sa), vec![1, 2, 0, 1]);
    }
}
