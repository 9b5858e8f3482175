use criterion::{black_box, criterion_group, criterion_main, Criterion};

use supercontig_extender::config::Config;
use supercontig_extender::contig::{Contig, ContigSeq, Supercontig, SupercontigSet, SupercontigStatus};
use supercontig_extender::corpus::ReadCorpus;
use supercontig_extender::extend::{Extender, SuccessorSource};
use supercontig_extender::index::{sa, CorpusIndex, DEFAULT_OCC_BLOCK};
use supercontig_extender::util::StopFlag;

fn make_genome(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = 42;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

/// 100bp reads starting at every position.
fn make_corpus(genome: &[u8]) -> ReadCorpus {
    (0..genome.len().saturating_sub(100))
        .map(|i| genome[i..i + 100].to_vec())
        .collect()
}

fn bench_find_successors(c: &mut Criterion) {
    let genome = make_genome(5_000);
    let corpus = make_corpus(&genome);
    let index = CorpusIndex::build(corpus.clone(), DEFAULT_OCC_BLOCK).unwrap();
    let suffix = &genome[2_000..2_050];

    c.bench_function("find_successors_scan_50bp", |b| {
        b.iter(|| black_box(corpus.find_successors(black_box(suffix), 8)))
    });
    c.bench_function("find_successors_index_50bp", |b| {
        b.iter(|| black_box(index.find_successors(black_box(suffix), 8)))
    });
}

fn bench_extend(c: &mut Criterion) {
    let genome = make_genome(5_000);
    let index = CorpusIndex::build(make_corpus(&genome), DEFAULT_OCC_BLOCK).unwrap();
    let opt = Config::default().extend_opt();

    c.bench_function("extend_index_1kb", |b| {
        b.iter(|| {
            let mut set = SupercontigSet::new(vec![Supercontig {
                status: SupercontigStatus::Open,
                contigs: vec![Contig::open(ContigSeq::new(genome[1_000..1_060].to_vec()))],
            }]);
            let mut opt = opt;
            opt.max_contig_length = 1_000;
            black_box(Extender::new(&index, opt, StopFlag::new()).run(&mut set))
        })
    });
}

fn bench_build_sa(c: &mut Criterion) {
    let text: Vec<u8> = make_genome(10_000)
        .iter()
        .map(|&b| match b {
            b'A' => 1,
            b'C' => 2,
            b'G' => 3,
            _ => 4,
        })
        .chain(std::iter::once(0u8))
        .collect();

    c.bench_function("build_sa_10k", |b| {
        b.iter(|| {
            black_box(sa::build_sa(black_box(&text)));
        })
    });
}

criterion_group!(benches, bench_find_successors, bench_extend, bench_build_sa);
criterion_main!(benches);
