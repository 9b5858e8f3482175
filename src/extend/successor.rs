use std::collections::HashMap;

/// 后继推断的统一接口：线性扫描（[`crate::corpus::ReadCorpus`]）
/// 与 FM 索引（[`crate::index::CorpusIndex`]）都实现它，且结果一致。
pub trait SuccessorSource {
    /// 统计 `suffix`（忽略 ASCII 大小写）之后紧跟的 `window` 个字符。
    fn find_successors(&self, suffix: &[u8], window: usize) -> SuccessorTable;
}

/// One suffix query's successor → count tally. Keys keep read case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessorTable {
    counts: HashMap<Vec<u8>, usize>,
}

impl SuccessorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, successor: &[u8]) {
        match self.counts.get_mut(successor) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(successor.to_vec(), 1);
            }
        }
    }

    pub fn count(&self, successor: &[u8]) -> usize {
        self.counts.get(successor).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// 排序：计数降序；计数相同时按后继字符串降序。
    pub fn ranked(&self) -> RankedSuccessors {
        let mut entries: Vec<(Vec<u8>, usize)> =
            self.counts.iter().map(|(s, &n)| (s.clone(), n)).collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        let total = entries.iter().map(|e| e.1).sum();
        RankedSuccessors { entries, total }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSuccessors {
    pub entries: Vec<(Vec<u8>, usize)>,
    pub total: usize,
}

impl RankedSuccessors {
    fn share(&self, count: usize) -> f64 {
        count as f64 / self.total as f64
    }

    /// 唯一后继：总数达到 `total_min` 且排名第一者占比 ≥ `threshold`。
    pub fn definitive(&self, threshold: f64, total_min: usize) -> Option<&[u8]> {
        let (top, count) = self.entries.first()?;
        if self.total < total_min {
            return None;
        }
        if self.share(*count) >= threshold {
            Some(top)
        } else {
            None
        }
    }

    /// 分支候选：按排名取占比 ≥ `threshold` 者，最多 `max_count` 个。
    pub fn branching(&self, threshold: f64, total_min: usize, max_count: usize) -> Vec<&[u8]> {
        if self.entries.is_empty() || self.total < total_min {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|(_, n)| self.share(*n) >= threshold)
            .take(max_count)
            .map(|(s, _)| s.as_slice())
            .collect()
    }
}

/// 在单条 read 上做非重叠的左到右扫描。
///
/// 每次命中消费 `suffix + window` 个字符，游标跳到窗口之后；
/// 剩余长度不足以容纳后缀加窗口时停止。
pub fn scan_read(read: &[u8], suffix: &[u8], window: usize, table: &mut SuccessorTable) {
    let span = suffix.len() + window;
    if span == 0 {
        return;
    }
    let mut pos = 0usize;
    while pos + span <= read.len() {
        let last = read.len() - span;
        let hit = (pos..=last).find(|&i| read[i..i + suffix.len()].eq_ignore_ascii_case(suffix));
        match hit {
            Some(i) => {
                table.record(&read[i + suffix.len()..i + span]);
                pos = i + span;
            }
            None => break,
        }
    }
}
