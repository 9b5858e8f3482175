use tracing::{debug, info};

use super::successor::SuccessorSource;
use super::ExtendOpt;
use crate::contig::{Contig, ContigSeq, ContigStatus, SupercontigSet};
use crate::util::StopFlag;

/// Outcome of trying every suffix length on one OPEN fragment.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Definitive(Vec<u8>),
    Branch(Vec<Vec<u8>>),
    Stuck,
    Interrupted,
}

/// 一次运行的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendReport {
    pub supercontigs_visited: usize,
    pub supercontigs_skipped: usize,
    pub definitive_extensions: usize,
    pub branch_events: usize,
    pub branches_created: usize,
    /// 分支预算耗尽后被丢弃的候选
    pub candidates_dropped: usize,
    pub overlapping: usize,
    pub too_long: usize,
    pub stuck: usize,
    /// 中断时仍为 OPEN、原样写回的片段
    pub left_open: usize,
    pub interrupted: bool,
}

impl ExtendReport {
    fn record_finalized(&mut self, status: ContigStatus) {
        match status {
            ContigStatus::Overlapping => self.overlapping += 1,
            ContigStatus::TooLong => self.too_long += 1,
            ContigStatus::Stuck => self.stuck += 1,
            ContigStatus::Open | ContigStatus::Closed => {}
        }
    }
}

/// 分支延伸引擎。
///
/// 每个 OPEN supercontig 的 OPEN 片段入栈（LIFO，深度优先，最后列出/最后
/// 产生的分支先处理），逐个判定：闭环 → OVERLAPPING，过长 → TOO_LONG，
/// 否则按后缀长度从长到短查询后继：唯一后继则追加，多个候选则分叉，
/// 都没有则 STUCK。同一 supercontig 的所有分支共享 `max_contig_amount` 预算。
pub struct Extender<'a, S: SuccessorSource + ?Sized> {
    source: &'a S,
    opt: ExtendOpt,
    stop: StopFlag,
}

impl<'a, S: SuccessorSource + ?Sized> Extender<'a, S> {
    pub fn new(source: &'a S, opt: ExtendOpt, stop: StopFlag) -> Self {
        Self { source, opt, stop }
    }

    pub fn run(&self, set: &mut SupercontigSet) -> ExtendReport {
        let mut report = ExtendReport::default();
        for idx in 0..set.supercontigs.len() {
            if self.stop.is_stopped() {
                report.interrupted = true;
                break;
            }
            if !set.supercontigs[idx].status.is_open() {
                report.supercontigs_skipped += 1;
                continue;
            }
            info!("supercontig number {}", idx);
            report.supercontigs_visited += 1;
            self.extend_supercontig(set, idx, &mut report);
        }
        report
    }

    fn extend_supercontig(&self, set: &mut SupercontigSet, idx: usize, report: &mut ExtendReport) {
        let contigs = std::mem::take(&mut set.supercontigs[idx].contigs);
        let (mut stack, finalized): (Vec<Contig>, Vec<Contig>) =
            contigs.into_iter().partition(|c| c.status.is_open());
        set.supercontigs[idx].contigs = finalized;
        let mut total_count = stack.len() + set.supercontigs[idx].contigs.len();

        loop {
            if self.stop.is_stopped() {
                report.interrupted = true;
                break;
            }
            let Some(mut contig) = stack.pop() else {
                break;
            };

            if contig.status.is_open() {
                if set.is_closing(&contig, self.opt.overlap) {
                    contig.status = ContigStatus::Overlapping;
                } else if contig.content.len() > self.opt.max_contig_length {
                    contig.status = ContigStatus::TooLong;
                }
            }
            if !contig.status.is_open() {
                debug!(status = %contig.status, len = contig.content.len(), "fragment finalized");
                report.record_finalized(contig.status);
                set.supercontigs[idx].contigs.push(contig);
                continue;
            }

            match self.next_step(&contig.content) {
                Step::Definitive(successor) => {
                    contig.content.push_bytes(&successor);
                    report.definitive_extensions += 1;
                    stack.push(contig);
                }
                Step::Branch(candidates) => {
                    report.branch_events += 1;
                    total_count -= 1;
                    let prefix = contig.content.freeze();
                    for cand in &candidates {
                        if total_count >= self.opt.max_contig_amount {
                            report.candidates_dropped += 1;
                            continue;
                        }
                        stack.push(Contig::open(ContigSeq::branch(&prefix, cand)));
                        total_count += 1;
                        report.branches_created += 1;
                    }
                }
                Step::Stuck => {
                    // stays on top; finalized on the next pass
                    contig.status = ContigStatus::Stuck;
                    stack.push(contig);
                }
                Step::Interrupted => {
                    stack.push(contig);
                    report.interrupted = true;
                    break;
                }
            }
        }

        report.left_open += stack.iter().filter(|c| c.status.is_open()).count();
        for contig in &stack {
            report.record_finalized(contig.status);
        }
        set.supercontigs[idx].contigs.extend(stack);
    }

    /// 按后缀长度从长到短尝试；一旦得到唯一后继或分叉即返回。
    fn next_step(&self, content: &ContigSeq) -> Step {
        let opt = &self.opt;
        for suffix_len in opt.suffix_lengths() {
            if self.stop.is_stopped() {
                return Step::Interrupted;
            }
            let suffix = content.suffix(suffix_len);
            let ranked = self.source.find_successors(&suffix, opt.successor_length).ranked();
            debug!(
                suffix_len,
                distinct = ranked.entries.len(),
                total = ranked.total,
                "successors for {}",
                String::from_utf8_lossy(&suffix)
            );

            if let Some(s) =
                ranked.definitive(opt.definitive_successor_threshold, opt.definitive_successor_total_min)
            {
                debug!("definitive successor {}", String::from_utf8_lossy(s));
                return Step::Definitive(s.to_vec());
            }

            let candidates = ranked.branching(
                opt.branching_successor_threshold,
                opt.branching_successor_total_min,
                opt.branching_successor_max_count,
            );
            if candidates.len() > 1 {
                debug!(count = candidates.len(), "branching");
                return Step::Branch(candidates.into_iter().map(<[u8]>::to_vec).collect());
            }
        }
        Step::Stuck
    }
}
