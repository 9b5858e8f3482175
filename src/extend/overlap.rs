use crate::contig::{Contig, SupercontigSet};

/// 闭环检测的长度窗口 `[min, max]`（含两端）。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlapBounds {
    pub min: usize,
    pub max: usize,
}

impl OverlapBounds {
    #[inline]
    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}

impl SupercontigSet {
    /// 闭环检测：片段的完整内容（长度在窗口内）与任一 supercontig 的 head
    /// 片段开头逐字节相同。只看当前已挂回 supercontig 的片段，
    /// 处理中的片段（在栈上）不参与。
    pub fn is_closing(&self, contig: &Contig, bounds: OverlapBounds) -> bool {
        if !bounds.contains(contig.content.len()) {
            return false;
        }
        self.supercontigs
            .iter()
            .filter_map(|sc| sc.head())
            .any(|head| contig.content.is_prefix_of(&head.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contig::{ContigSeq, ContigStatus, Supercontig, SupercontigStatus};

    fn sc(contigs: &[&str]) -> Supercontig {
        Supercontig {
            status: SupercontigStatus::Open,
            contigs: contigs.iter().map(|&c| Contig::open(ContigSeq::from(c))).collect(),
        }
    }

    fn seq(len: usize, seed: u32) -> String {
        let mut x = seed;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                b"ACGT"[((x >> 16) % 4) as usize] as char
            })
            .collect()
    }

    #[test]
    fn exact_head_match_within_bounds_closes() {
        let head = seq(60, 1);
        let set = SupercontigSet::new(vec![sc(&["TTTT"]), sc(&[head.as_str()])]);
        let bounds = OverlapBounds { min: 50, max: 70 };
        let probe = Contig::open(ContigSeq::from(head.as_str()));
        assert!(set.is_closing(&probe, bounds));
    }

    #[test]
    fn prefix_of_longer_head_closes() {
        let head = seq(200, 2);
        let set = SupercontigSet::new(vec![sc(&[head.as_str(), "ACGT"])]);
        let probe = Contig::open(ContigSeq::from(&head[..55]));
        assert!(set.is_closing(&probe, OverlapBounds { min: 50, max: 70 }));
    }

    #[test]
    fn out_of_bounds_or_mismatch_does_not_close() {
        let head = seq(200, 3);
        let set = SupercontigSet::new(vec![sc(&[head.as_str()])]);
        let bounds = OverlapBounds { min: 50, max: 70 };
        let short = Contig::open(ContigSeq::from(&head[..49]));
        let long = Contig::open(ContigSeq::from(&head[..71]));
        assert!(!set.is_closing(&short, bounds));
        assert!(!set.is_closing(&long, bounds));

        let mut other = head[..60].to_string();
        other.replace_range(59..60, if head.as_bytes()[59] == b'A' { "C" } else { "A" });
        assert!(!set.is_closing(&Contig::open(ContigSeq::from(other.as_str())), bounds));
    }

    #[test]
    fn only_heads_are_consulted() {
        let head = seq(60, 4);
        let second = seq(60, 5);
        let set = SupercontigSet::new(vec![sc(&[head.as_str(), second.as_str()]), Supercontig {
            status: SupercontigStatus::Closed,
            contigs: Vec::new(),
        }]);
        let bounds = OverlapBounds { min: 50, max: 70 };
        let probe = Contig { status: ContigStatus::Open, content: ContigSeq::from(second.as_str()) };
        assert!(!set.is_closing(&probe, bounds));
    }
}
