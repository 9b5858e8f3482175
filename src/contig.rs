use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// 片段（contig）状态。只有 `Open` 会被继续延伸，其余均为终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContigStatus {
    Open,
    Overlapping,
    TooLong,
    Stuck,
    Closed,
}

impl ContigStatus {
    pub const ALL: [ContigStatus; 5] = [
        ContigStatus::Open,
        ContigStatus::Overlapping,
        ContigStatus::TooLong,
        ContigStatus::Stuck,
        ContigStatus::Closed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContigStatus::Open => "open",
            ContigStatus::Overlapping => "overlapping",
            ContigStatus::TooLong => "too_long",
            ContigStatus::Stuck => "stuck",
            ContigStatus::Closed => "closed",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.label() == s)
    }

    #[inline]
    pub fn is_open(self) -> bool {
        self == ContigStatus::Open
    }
}

impl fmt::Display for ContigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Supercontig status: `open`, `closed`, or any user label kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupercontigStatus {
    Open,
    Closed,
    Other(String),
}

impl SupercontigStatus {
    pub fn from_label(s: &str) -> Self {
        match s {
            "open" => SupercontigStatus::Open,
            "closed" => SupercontigStatus::Closed,
            other => SupercontigStatus::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SupercontigStatus::Open => "open",
            SupercontigStatus::Closed => "closed",
            SupercontigStatus::Other(s) => s,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        *self == SupercontigStatus::Open
    }
}

impl fmt::Display for SupercontigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 共享前缀的序列：不可变的引用计数前缀 + 自有尾部。
///
/// 分支时父序列只冻结一次（`freeze`），所有子片段共享同一前缀，
/// 避免对长片段做 k 次深拷贝。
#[derive(Debug, Clone)]
pub struct ContigSeq {
    shared: Rc<[u8]>,
    tail: Vec<u8>,
}

impl ContigSeq {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { shared: Rc::from(Vec::<u8>::new()), tail: bytes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shared.len() + self.tail.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.tail.extend_from_slice(bytes);
    }

    /// Moves the tail into the shared prefix and hands out the prefix.
    pub fn freeze(&mut self) -> Rc<[u8]> {
        if !self.tail.is_empty() {
            let mut all = Vec::with_capacity(self.len());
            all.extend_from_slice(&self.shared);
            all.append(&mut self.tail);
            self.shared = Rc::from(all);
        }
        Rc::clone(&self.shared)
    }

    /// A sequence sharing `prefix` with `extra` appended.
    pub fn branch(prefix: &Rc<[u8]>, extra: &[u8]) -> Self {
        Self { shared: Rc::clone(prefix), tail: extra.to_vec() }
    }

    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.shared.iter().chain(self.tail.iter()).copied()
    }

    /// 取末尾 `n` 个字节（不足 `n` 时返回全部）；仅在跨越前缀与尾部时分配。
    pub fn suffix(&self, n: usize) -> Cow<'_, [u8]> {
        let n = n.min(self.len());
        if n <= self.tail.len() {
            Cow::Borrowed(&self.tail[self.tail.len() - n..])
        } else if self.tail.is_empty() {
            Cow::Borrowed(&self.shared[self.shared.len() - n..])
        } else {
            let from_shared = n - self.tail.len();
            let mut out = Vec::with_capacity(n);
            out.extend_from_slice(&self.shared[self.shared.len() - from_shared..]);
            out.extend_from_slice(&self.tail);
            Cow::Owned(out)
        }
    }

    /// True when the whole of `self` equals the first `self.len()` bytes of `other`.
    pub fn is_prefix_of(&self, other: &ContigSeq) -> bool {
        self.len() <= other.len() && self.bytes().zip(other.bytes()).all(|(a, b)| a == b)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes().collect()
    }
}

impl Default for ContigSeq {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PartialEq for ContigSeq {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_prefix_of(other)
    }
}

impl Eq for ContigSeq {}

impl From<&str> for ContigSeq {
    fn from(s: &str) -> Self {
        ContigSeq::new(s.as_bytes().to_vec())
    }
}

impl fmt::Display for ContigSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.shared))?;
        f.write_str(&String::from_utf8_lossy(&self.tail))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub status: ContigStatus,
    pub content: ContigSeq,
}

impl Contig {
    pub fn open(content: ContigSeq) -> Self {
        Self { status: ContigStatus::Open, content }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supercontig {
    pub status: SupercontigStatus,
    /// `contigs[0]` 为代表性的 head 片段
    pub contigs: Vec<Contig>,
}

impl Supercontig {
    pub fn head(&self) -> Option<&Contig> {
        self.contigs.first()
    }
}

/// 全部 supercontig，有序；运行期间原地修改。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupercontigSet {
    pub supercontigs: Vec<Supercontig>,
}

impl SupercontigSet {
    pub fn new(supercontigs: Vec<Supercontig>) -> Self {
        Self { supercontigs }
    }

    pub fn len(&self) -> usize {
        self.supercontigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supercontigs.is_empty()
    }

    pub fn contig_count(&self) -> usize {
        self.supercontigs.iter().map(|sc| sc.contigs.len()).sum()
    }

    pub fn open_contig_count(&self) -> usize {
        self.supercontigs
            .iter()
            .filter(|sc| sc.status.is_open())
            .flat_map(|sc| sc.contigs.iter())
            .filter(|c| c.status.is_open())
            .count()
    }
}
