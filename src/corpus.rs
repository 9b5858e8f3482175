use serde::{Deserialize, Serialize};

use crate::extend::successor::{scan_read, SuccessorSource, SuccessorTable};

/// 原始 read 集合：加载一次，只读，多次查询。顺序与重复均保留。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCorpus {
    pub reads: Vec<Vec<u8>>,
}

impl ReadCorpus {
    pub fn new(reads: Vec<Vec<u8>>) -> Self {
        Self { reads }
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn total_len(&self) -> usize {
        self.reads.iter().map(Vec::len).sum()
    }
}

impl<S: AsRef<[u8]>> FromIterator<S> for ReadCorpus {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|r| r.as_ref().to_vec()).collect())
    }
}

impl SuccessorSource for ReadCorpus {
    fn find_successors(&self, suffix: &[u8], window: usize) -> SuccessorTable {
        let mut table = SuccessorTable::new();
        for read in &self.reads {
            scan_read(read, suffix, window, &mut table);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_across_reads() {
        let corpus: ReadCorpus = ["AAACGTACGTTT", "ttAAACGTACaa", "", "AAAC"].into_iter().collect();
        assert_eq!(corpus.len(), 4);
        assert_eq!(corpus.total_len(), 28);
        let t = corpus.find_successors(b"AAAC", 4);
        assert_eq!(t.count(b"GTAC"), 2);
        assert_eq!(t.total(), 2);
        assert!(corpus.find_successors(b"CCCCC", 2).is_empty());
    }
}
