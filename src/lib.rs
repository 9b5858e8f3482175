//! # supercontig-extender
//!
//! 基于 read 语料的 supercontig 贪心延伸工具。
//!
//! 每个 OPEN 片段取末尾后缀，在 read 语料中统计紧随其后的固定长度窗口（后继），
//! 据此唯一延伸、分叉，或在闭环 / 过长 / 无后继时终止：
//!
//! - **后继推断**：线性扫描，或基于 FM 索引（后缀数组 + BWT）的等价查询
//! - **延伸引擎**：LIFO 深度优先的分支搜索，每个 supercontig 有分支预算
//! - **闭环检测**：片段与任一 supercontig 的首片段开头重合
//! - **协作式中断**：`StopFlag` 置位后保留可续跑的中间结果
//!
//! ## 快速示例
//!
//! ```rust
//! use supercontig_extender::contig::{Contig, ContigSeq, Supercontig, SupercontigSet, SupercontigStatus};
//! use supercontig_extender::corpus::ReadCorpus;
//! use supercontig_extender::extend::{ExtendOpt, Extender, OverlapBounds};
//! use supercontig_extender::util::StopFlag;
//!
//! let corpus: ReadCorpus = ["AAACGTACGTTT"].into_iter().collect();
//! let mut set = SupercontigSet::new(vec![Supercontig {
//!     status: SupercontigStatus::Open,
//!     contigs: vec![Contig::open(ContigSeq::from("AAAC"))],
//! }]);
//! let opt = ExtendOpt {
//!     max_contig_length: 1000,
//!     max_suffix_length: 4,
//!     min_suffix_length: 4,
//!     suffix_length_step: 1,
//!     successor_length: 4,
//!     definitive_successor_threshold: 0.9,
//!     definitive_successor_total_min: 1,
//!     branching_successor_threshold: 0.3,
//!     branching_successor_max_count: 3,
//!     branching_successor_total_min: 1,
//!     max_contig_amount: 5,
//!     overlap: OverlapBounds { min: 50, max: 70 },
//! };
//! Extender::new(&corpus, opt, StopFlag::new()).run(&mut set);
//! assert_eq!(set.supercontigs[0].contigs[0].content.to_vec(), b"AAACGTACGTTT".to_vec());
//! ```
//!
//! ## 模块说明
//!
//! - [`contig`] — 片段 / supercontig 数据模型与共享前缀序列
//! - [`extend`] — 后继统计、闭环检测、延伸引擎
//! - [`index`] — 语料 FM 索引（后缀数组、BWT、FM 索引）
//! - [`io`] — FASTA / FASTQ read 解析，supercontig 文本存储
//! - [`config`] — TOML 配置与校验
//! - [`pipeline`] — 命令行使用的端到端流程

pub mod config;
pub mod contig;
pub mod corpus;
pub mod extend;
pub mod index;
pub mod io;
pub mod pipeline;
pub mod util;
