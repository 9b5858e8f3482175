//! Supercontig 文本格式的读写。
//!
//! ```text
//! # comment
//! -----            supercontig separator
//! @reviewed        supercontig status (omitted when open)
//!                  blank line: fragment separator
//! @@stuck          status of the next fragment (omitted when open)
//! ACGTACGT...      sequence lines, wrapped
//! ```

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;
use thiserror::Error;

use crate::contig::{Contig, ContigSeq, ContigStatus, Supercontig, SupercontigSet, SupercontigStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("line {line}: unknown fragment status '{label}'")]
    UnknownContigStatus { line: usize, label: String },
    #[error("linebreak_at must be positive")]
    ZeroLinebreak,
}

#[derive(Default)]
struct Builder {
    out: Vec<Supercontig>,
    contigs: Vec<Contig>,
    status: Option<SupercontigStatus>,
    seq: Vec<u8>,
    next_contig_status: Option<ContigStatus>,
}

impl Builder {
    fn flush_contig(&mut self) {
        if !self.seq.is_empty() {
            let status = self.next_contig_status.take().unwrap_or(ContigStatus::Open);
            let content = ContigSeq::new(std::mem::take(&mut self.seq));
            self.contigs.push(Contig { status, content });
        }
    }

    fn flush_supercontig(&mut self) {
        self.flush_contig();
        if !self.contigs.is_empty() {
            let status = self.status.take().unwrap_or(SupercontigStatus::Open);
            self.out.push(Supercontig { status, contigs: std::mem::take(&mut self.contigs) });
        }
        self.status = None;
        self.next_contig_status = None;
    }
}

pub fn read_supercontigs<R: BufRead>(reader: R) -> Result<SupercontigSet> {
    let mut b = Builder::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        } else if let Some(label) = line.strip_prefix("@@") {
            b.flush_contig();
            let label = label.trim();
            let status = ContigStatus::from_label(label).ok_or_else(|| StoreError::UnknownContigStatus {
                line: i + 1,
                label: label.to_string(),
            })?;
            b.next_contig_status = Some(status);
        } else if let Some(label) = line.strip_prefix('@') {
            b.flush_contig();
            b.status = Some(SupercontigStatus::from_label(label.trim()));
        } else if line.trim().is_empty() {
            b.flush_contig();
        } else if line.starts_with("-----") {
            b.flush_supercontig();
        } else {
            b.seq.extend_from_slice(line.trim_end().as_bytes());
        }
    }
    b.flush_supercontig();
    Ok(SupercontigSet::new(b.out))
}

pub fn write_supercontigs<W: Write>(mut w: W, set: &SupercontigSet, linebreak_at: usize) -> Result<()> {
    if linebreak_at == 0 {
        return Err(StoreError::ZeroLinebreak.into());
    }
    for sc in &set.supercontigs {
        writeln!(w, "-----")?;
        if !sc.status.is_open() {
            writeln!(w, "@{}", sc.status)?;
        }
        for contig in &sc.contigs {
            writeln!(w, " ")?;
            if !contig.status.is_open() {
                writeln!(w, "@@{}", contig.status)?;
            }
            for chunk in contig.content.to_vec().chunks(linebreak_at) {
                w.write_all(chunk)?;
                w.write_all(b"\n")?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

pub fn load_supercontigs(path: impl AsRef<Path>) -> Result<SupercontigSet> {
    let path = path.as_ref();
    let f = std::fs::File::open(path)
        .with_context(|| format!("cannot open supercontigs file '{}'", path.display()))?;
    read_supercontigs(std::io::BufReader::new(f))
        .with_context(|| format!("cannot parse supercontigs file '{}'", path.display()))
}

pub fn save_supercontigs(path: impl AsRef<Path>, set: &SupercontigSet, linebreak_at: usize) -> Result<()> {
    let path = path.as_ref();
    let f = std::fs::File::create(path)
        .with_context(|| format!("cannot create output file '{}'", path.display()))?;
    write_supercontigs(std::io::BufWriter::new(f), set, linebreak_at)
        .with_context(|| format!("cannot write supercontigs to '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> SupercontigSet {
        read_supercontigs(Cursor::new(text.as_bytes())).unwrap()
    }

    fn render(set: &SupercontigSet, linebreak_at: usize) -> String {
        let mut out = Vec::new();
        write_supercontigs(&mut out, set, linebreak_at).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_fragments_and_statuses() {
        let set = parse(
            "# header comment\nACGT\nACGT\n\nTTTT\n-----\n@closed\nGGGG\n  \nCC\n-----\n@@stuck\nAAAA\n",
        );
        assert_eq!(set.len(), 3);

        let first = &set.supercontigs[0];
        assert_eq!(first.status, SupercontigStatus::Open);
        assert_eq!(first.contigs.len(), 2);
        assert_eq!(first.contigs[0].content.to_string(), "ACGTACGT");
        assert_eq!(first.contigs[1].content.to_string(), "TTTT");

        let second = &set.supercontigs[1];
        assert_eq!(second.status, SupercontigStatus::Closed);
        assert_eq!(second.contigs.len(), 2);

        let third = &set.supercontigs[2];
        assert_eq!(third.status, SupercontigStatus::Open);
        assert_eq!(third.contigs[0].status, ContigStatus::Stuck);
    }

    #[test]
    fn status_line_flushes_current_fragment() {
        let set = parse("AAAA\n@draft\nCCCC\n");
        let sc = &set.supercontigs[0];
        assert_eq!(sc.status, SupercontigStatus::Other("draft".to_string()));
        assert_eq!(sc.contigs.len(), 2);
    }

    #[test]
    fn empty_supercontigs_are_dropped() {
        let set = parse("-----\n-----\n@closed\n-----\nACGT\n");
        assert_eq!(set.len(), 1);
        assert_eq!(set.supercontigs[0].status, SupercontigStatus::Open);
    }

    #[test]
    fn unknown_fragment_status_is_rejected() {
        let err = read_supercontigs(Cursor::new(&b"ACGT\n\n@@sleepy\nAC\n"[..])).unwrap_err();
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::UnknownContigStatus { line: 3, label: "sleepy".to_string() })
        );
    }

    #[test]
    fn writer_wraps_and_labels() {
        let set = parse("@closed\nACGTACGTAC\n-----\n@@too_long\nGG\n\nTT\n");
        let text = render(&set, 4);
        assert_eq!(text, "-----\n@closed\n \nACGT\nACGT\nAC\n-----\n \n@@too_long\nGG\n \nTT\n");
    }

    #[test]
    fn write_then_read_roundtrip() {
        let set = parse("@reviewed\nACGTACGTACGT\n\nAAAA\n-----\n@@overlapping\nCCCCGGGG\n\n@@stuck\nTTT\n\nGATTACA\n");
        for width in [1, 3, 80] {
            assert_eq!(parse(&render(&set, width)), set);
        }
    }

    #[test]
    fn zero_linebreak_is_rejected() {
        let set = parse("ACGT\n");
        assert!(write_supercontigs(Vec::new(), &set, 0).is_err());
    }
}
