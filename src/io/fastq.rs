use anyhow::{bail, Result};
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

/// 四行一条的 FASTQ 读取器；质量行只用于校验长度，不保留。
pub struct FastqReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    n_records: usize,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), done: false, n_records: 0 }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.buf.clear();
        Ok(self.reader.read_line(&mut self.buf)? > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        if self.done {
            return Ok(None);
        }

        // header, skipping blank lines between records
        loop {
            if !self.read_line()? {
                self.done = true;
                return Ok(None);
            }
            if !self.buf.trim().is_empty() {
                break;
            }
        }
        let rec_no = self.n_records + 1;
        let Some(header) = self.buf.strip_prefix('@') else {
            bail!("FASTQ record {}: header not starting with '@'", rec_no);
        };
        let id = header.split_whitespace().next().unwrap_or("").to_string();

        if !self.read_line()? {
            bail!("FASTQ record {}: unexpected EOF after header", rec_no);
        }
        let seq = self.buf.trim_end().as_bytes().to_vec();

        if !self.read_line()? || !self.buf.starts_with('+') {
            bail!("FASTQ record {}: missing '+' line", rec_no);
        }

        if !self.read_line()? {
            bail!("FASTQ record {}: missing quality line", rec_no);
        }
        let qual_len = self.buf.trim_end().len();
        if qual_len != seq.len() {
            bail!(
                "FASTQ record {}: sequence length {} but quality length {}",
                rec_no,
                seq.len(),
                qual_len
            );
        }

        self.n_records = rec_no;
        Ok(Some(FastqRecord { id, seq }))
    }
}
