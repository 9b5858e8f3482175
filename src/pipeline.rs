//! 端到端流程：加载 supercontig 与 read 语料，运行延伸引擎，写回结果。

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::config::{Config, SearchBackend};
use crate::corpus::ReadCorpus;
use crate::extend::{ExtendReport, Extender, SuccessorSource};
use crate::index::{CorpusIndex, IndexMeta, DEFAULT_OCC_BLOCK};
use crate::io::{load_corpus, supercontig};
use crate::util::StopFlag;

/// 执行一次完整的延伸运行。中断时仍会写出输出文件。
pub fn run_extend(cfg: &Config, stop: &StopFlag) -> Result<ExtendReport> {
    let paths = &cfg.paths;
    let mut set = supercontig::load_supercontigs(&paths.supercontigs_path)?;
    info!(
        supercontigs = set.len(),
        fragments = set.contig_count(),
        open = set.open_contig_count(),
        "loaded '{}'",
        paths.supercontigs_path.display()
    );

    let report = match cfg.searcher.backend {
        SearchBackend::Scan => {
            let corpus = load_reads(&paths.reads_path)?;
            extend_with(&corpus, cfg, stop, &mut set)
        }
        SearchBackend::Index => {
            let index = match &paths.index_path {
                Some(p) => {
                    let idx = CorpusIndex::load_from_file(p)?;
                    info!(reads = idx.corpus.len(), "loaded corpus index '{}'", p.display());
                    idx
                }
                None => {
                    let corpus = load_reads(&paths.reads_path)?;
                    info!("building in-memory corpus index");
                    CorpusIndex::build(corpus, DEFAULT_OCC_BLOCK)?
                }
            };
            extend_with(&index, cfg, stop, &mut set)
        }
    };

    log_report(&report);
    supercontig::save_supercontigs(&paths.supercontigs_output_path, &set, cfg.linebreak_at())?;
    info!("supercontigs written to '{}'", paths.supercontigs_output_path.display());
    Ok(report)
}

fn load_reads(path: &Path) -> Result<ReadCorpus> {
    let corpus = load_corpus(path)?;
    info!(reads = corpus.len(), bases = corpus.total_len(), "loaded reads '{}'", path.display());
    Ok(corpus)
}

fn extend_with<S: SuccessorSource + ?Sized>(
    source: &S,
    cfg: &Config,
    stop: &StopFlag,
    set: &mut crate::contig::SupercontigSet,
) -> ExtendReport {
    Extender::new(source, cfg.extend_opt(), stop.clone()).run(set)
}

fn log_report(r: &ExtendReport) {
    if r.interrupted {
        warn!(left_open = r.left_open, "extension interrupted, unfinished fragments are kept open");
    }
    info!(
        visited = r.supercontigs_visited,
        skipped = r.supercontigs_skipped,
        extensions = r.definitive_extensions,
        branch_events = r.branch_events,
        branches = r.branches_created,
        overlapping = r.overlapping,
        too_long = r.too_long,
        stuck = r.stuck,
        "extension finished"
    );
    if r.candidates_dropped > 0 {
        warn!(dropped = r.candidates_dropped, "branch candidates dropped after the budget was exhausted");
    }
}

/// 从 read 文件构建语料索引并写入 `<prefix>.fm`，返回索引与输出路径。
pub fn build_index(reads: &Path, prefix: &str, build_args: Option<String>) -> Result<(CorpusIndex, String)> {
    let corpus = load_corpus(reads)?;
    if corpus.is_empty() {
        anyhow::bail!("reads file '{}' contains no sequences", reads.display());
    }
    if corpus.total_len() == 0 {
        anyhow::bail!("reads file '{}' contains only empty sequences", reads.display());
    }

    let mut index = CorpusIndex::build(corpus, DEFAULT_OCC_BLOCK)?;
    index.set_meta(IndexMeta {
        source_file: Some(reads.display().to_string()),
        build_args,
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });

    let out_path = format!("{}.fm", prefix);
    index
        .save_to_file(&out_path)
        .with_context(|| format!("cannot write index for '{}'", reads.display()))?;
    Ok((index, out_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn small_config(dir: &Path) -> Config {
        let mut cfg = Config::default();
        cfg.paths.reads_path = dir.join("reads.fa");
        cfg.paths.supercontigs_path = dir.join("in.txt");
        cfg.paths.supercontigs_output_path = dir.join("out.txt");
        let e = &mut cfg.extension;
        e.max_suffix_length = 4;
        e.min_suffix_length = 4;
        e.suffix_length_step = 1;
        e.successor_length = 4;
        e.definitive_successor_threshold = 0.9;
        e.definitive_successor_total_min = 1;
        e.branching_successor_total_min = 1;
        cfg
    }

    fn write_inputs(dir: &Path) {
        std::fs::write(dir.join("reads.fa"), ">r1\nAAACGTACGTTT\n").unwrap();
        std::fs::write(dir.join("in.txt"), "# input\n-----\n \nAAAC\n-----\n@closed\n \nGGGG\n").unwrap();
    }

    const EXPECTED: &str = "-----\n \n@@stuck\nAAACGTACGTTT\n-----\n@closed\n \nGGGG\n";

    #[test]
    fn scan_backend_extends_and_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let cfg = small_config(dir.path());

        let report = run_extend(&cfg, &StopFlag::new()).unwrap();
        assert_eq!(report.supercontigs_visited, 1);
        assert_eq!(report.supercontigs_skipped, 1);
        assert_eq!(report.definitive_extensions, 2);
        assert_eq!(report.stuck, 1);
        assert_eq!(std::fs::read_to_string(dir.path().join("out.txt")).unwrap(), EXPECTED);
    }

    #[test]
    fn index_backend_from_saved_index_matches_scan() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let prefix = dir.path().join("reads").display().to_string();
        let (index, out_path) = build_index(&dir.path().join("reads.fa"), &prefix, None).unwrap();
        assert_eq!(index.corpus.len(), 1);
        assert!(index.meta.build_timestamp.is_some());

        let mut cfg = small_config(dir.path());
        cfg.searcher.backend = SearchBackend::Index;
        cfg.paths.index_path = Some(PathBuf::from(out_path));
        run_extend(&cfg, &StopFlag::new()).unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("out.txt")).unwrap(), EXPECTED);
    }

    #[test]
    fn stopped_run_still_writes_input_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let cfg = small_config(dir.path());
        let stop = StopFlag::new();
        stop.stop();

        let report = run_extend(&cfg, &stop).unwrap();
        assert!(report.interrupted);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "-----\n \nAAAC\n-----\n@closed\n \nGGGG\n"
        );
    }

    #[test]
    fn missing_inputs_are_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = small_config(dir.path());
        let err = run_extend(&cfg, &StopFlag::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("in.txt"));

        let err = build_index(&dir.path().join("nope.fa"), "x", None).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.fa"));
    }

    #[test]
    fn empty_reads_file_cannot_be_indexed() {
        let dir = tempfile::tempdir().unwrap();
        let reads = dir.path().join("empty.fa");
        std::fs::write(&reads, "").unwrap();
        let prefix = dir.path().join("e").display().to_string();
        assert!(build_index(&reads, &prefix, None).is_err());
    }
}
