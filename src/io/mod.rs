pub mod fasta;
pub mod fastq;
pub mod supercontig;

use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::corpus::ReadCorpus;

/// 从 FASTA 或 FASTQ 读取 read 语料；格式由首个非空白字节判断（'@' 为 FASTQ）。
pub fn read_corpus<R: BufRead>(mut reader: R) -> Result<ReadCorpus> {
    let is_fastq = loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(ReadCorpus::default());
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(i) => break buf[i] == b'@',
            None => {
                let n = buf.len();
                reader.consume(n);
            }
        }
    };

    let mut reads = Vec::new();
    if is_fastq {
        let mut r = fastq::FastqReader::new(reader);
        while let Some(rec) = r.next_record()? {
            reads.push(rec.seq);
        }
    } else {
        let mut r = fasta::FastaReader::new(reader);
        while let Some(rec) = r.next_record()? {
            reads.push(rec.seq);
        }
    }
    Ok(ReadCorpus::new(reads))
}

pub fn load_corpus(path: impl AsRef<Path>) -> Result<ReadCorpus> {
    let path = path.as_ref();
    let f = std::fs::File::open(path)
        .with_context(|| format!("cannot open reads file '{}'", path.display()))?;
    read_corpus(std::io::BufReader::new(f))
        .with_context(|| format!("cannot parse reads file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn detects_fasta() {
        let c = read_corpus(Cursor::new(&b"\n>r1\nACGT\n>r2\nacgg\n"[..])).unwrap();
        assert_eq!(c.reads, vec![b"ACGT".to_vec(), b"acgg".to_vec()]);
    }

    #[test]
    fn detects_fastq_after_blank_lines() {
        let c = read_corpus(Cursor::new(&b"\n  \n@r1\nACGT\n+\nIIII\n"[..])).unwrap();
        assert_eq!(c.reads, vec![b"ACGT".to_vec()]);
    }

    #[test]
    fn empty_input_is_an_empty_corpus() {
        assert!(read_corpus(Cursor::new(&b""[..])).unwrap().is_empty());
        assert!(read_corpus(Cursor::new(&b"\n\n"[..])).unwrap().is_empty());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_corpus("/definitely/not/here.fa").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.fa"));
    }
}
