//! 基于 FM 索引的 read 语料索引，回答与线性扫描完全相同的后继查询。

pub mod bwt;
pub mod fm;
pub mod sa;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::corpus::ReadCorpus;
use crate::extend::successor::{SuccessorSource, SuccessorTable};
use fm::{Alphabet, FMIndex};

/// Occ sampling interval used by the CLI.
pub const DEFAULT_OCC_BLOCK: usize = 64;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexMeta {
    pub source_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 语料 + FM 索引。文本为各 read 大写折叠后依次拼接、以 0 分隔；
/// 后继窗口从原始大小写的 read 中截取。
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusIndex {
    pub corpus: ReadCorpus,
    alphabet: Alphabet,
    /// 每条 read 在拼接文本中的起始偏移
    starts: Vec<u32>,
    fm: FMIndex,
    pub meta: IndexMeta,
}

impl CorpusIndex {
    pub fn build(corpus: ReadCorpus, block: usize) -> Result<Self> {
        let text_len = corpus.total_len() + corpus.len();
        ensure!(
            text_len <= u32::MAX as usize,
            "corpus too large to index: {} bytes including separators",
            text_len
        );

        let alphabet = Alphabet::from_reads(corpus.reads.iter().map(Vec::as_slice));
        let mut text: Vec<u8> = Vec::with_capacity(text_len);
        let mut starts: Vec<u32> = Vec::with_capacity(corpus.len());
        for read in &corpus.reads {
            starts.push(text.len() as u32);
            text.extend(read.iter().filter_map(|&b| alphabet.encode(b)));
            text.push(0);
        }

        let sa_arr = sa::build_sa(&text);
        let bwt_arr = bwt::build_bwt(&text, &sa_arr);
        let fm = FMIndex::build(bwt_arr, sa_arr, alphabet.sigma(), block);

        Ok(Self { corpus, alphabet, starts, fm, meta: IndexMeta::default() })
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = meta;
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let f = std::fs::File::create(path)
            .with_context(|| format!("cannot create index file '{}'", path.display()))?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)
            .with_context(|| format!("cannot write index to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .with_context(|| format!("cannot open index file '{}'", path.display()))?;
        let idx: Self = bincode::deserialize_from(std::io::BufReader::new(f))
            .with_context(|| format!("'{}' is not a valid corpus index", path.display()))?;
        Ok(idx)
    }

    /// 将文本位置映射到 (read 编号, read 内偏移)；落在分隔符上返回 None。
    fn map_text_pos(&self, pos: u32) -> Option<(usize, usize)> {
        let ri = self.starts.partition_point(|&s| s <= pos).checked_sub(1)?;
        let off = (pos - self.starts[ri]) as usize;
        (off < self.corpus.reads[ri].len()).then_some((ri, off))
    }

    /// 所有（忽略大小写的）命中位置，按 (read, offset) 排序。
    pub fn occurrences(&self, suffix: &[u8]) -> Vec<(usize, usize)> {
        let Some(pattern) = self.alphabet.encode_seq(suffix) else {
            return Vec::new();
        };
        let Some((l, r)) = self.fm.backward_search(&pattern) else {
            return Vec::new();
        };
        let mut hits: Vec<(usize, usize)> = self
            .fm
            .sa_interval_positions(l, r)
            .iter()
            .filter_map(|&p| self.map_text_pos(p))
            .collect();
        hits.sort_unstable();
        hits
    }
}

impl SuccessorSource for CorpusIndex {
    fn find_successors(&self, suffix: &[u8], window: usize) -> SuccessorTable {
        if suffix.is_empty() {
            return self.corpus.find_successors(suffix, window);
        }
        let span = suffix.len() + window;
        let mut table = SuccessorTable::new();
        // (read, first offset not yet consumed)
        let mut cursor: Option<(usize, usize)> = None;
        for (ri, off) in self.occurrences(suffix) {
            if matches!(cursor, Some((cr, free)) if cr == ri && off < free) {
                continue;
            }
            let read = &self.corpus.reads[ri];
            if off + span > read.len() {
                continue;
            }
            table.record(&read[off + suffix.len()..off + span]);
            cursor = Some((ri, off + span));
        }
        table
    }
}
