//! Supercontig 延伸：后继推断、闭环检测与分支搜索引擎。

pub mod engine;
pub mod overlap;
pub mod successor;

pub use engine::{ExtendReport, Extender};
pub use overlap::OverlapBounds;
pub use successor::{RankedSuccessors, SuccessorSource, SuccessorTable};

/// 延伸参数。引擎内部不设默认值，全部由配置层提供。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtendOpt {
    pub max_contig_length: usize,
    pub max_suffix_length: usize,
    pub min_suffix_length: usize,
    pub suffix_length_step: usize,
    pub successor_length: usize,
    pub definitive_successor_threshold: f64,
    pub definitive_successor_total_min: usize,
    pub branching_successor_threshold: f64,
    pub branching_successor_max_count: usize,
    pub branching_successor_total_min: usize,
    pub max_contig_amount: usize,
    pub overlap: OverlapBounds,
}

impl ExtendOpt {
    /// Suffix lengths tried for one fragment, longest first. The last value is
    /// the smallest one still `>= min_suffix_length`.
    pub fn suffix_lengths(&self) -> impl Iterator<Item = usize> {
        (self.min_suffix_length..=self.max_suffix_length)
            .rev()
            .step_by(self.suffix_length_step.max(1))
    }
}
