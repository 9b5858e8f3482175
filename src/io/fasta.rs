use anyhow::Result;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// 位于第一个 '>' 之前的序列行组成的记录没有 id
    pub id: Option<String>,
    pub seq: Vec<u8>,
}

/// FASTA reader for read corpora. Unlike a reference reader it keeps the
/// original case (successors are reported as they appear in the reads).
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // None only for sequence lines that precede the first header
        let id = self.peek_header.take();
        let mut seq: Vec<u8> = Vec::new();
        let mut saw_line = id.is_some();
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                break;
            }
            if let Some(rest) = self.buf.strip_prefix('>') {
                let h = rest.split_whitespace().next().unwrap_or("").to_string();
                if saw_line {
                    self.peek_header = Some(h);
                    break;
                }
                // first line of the file is a header: this record is that one
                return self.record_after_header(h);
            }
            for &b in self.buf.as_bytes() {
                if !b.is_ascii_whitespace() {
                    seq.push(b);
                    saw_line = true;
                }
            }
        }

        if !saw_line {
            return Ok(None);
        }
        Ok(Some(FastaRecord { id, seq }))
    }

    fn record_after_header(&mut self, header: String) -> Result<Option<FastaRecord>> {
        self.peek_header = Some(header);
        self.next_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn all(data: &[u8]) -> Vec<FastaRecord> {
        let mut r = FastaReader::new(Cursor::new(data));
        let mut out = Vec::new();
        while let Some(rec) = r.next_record().unwrap() {
            out.push(rec);
        }
        out
    }

    #[test]
    fn parse_simple_fasta_keeps_case() {
        let recs = all(b">r1 first\nACgTNN\n>r2\nAAA\n");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id.as_deref(), Some("r1"));
        assert_eq!(recs[0].seq, b"ACgTNN");
        assert_eq!(recs[1].id.as_deref(), Some("r2"));
        assert_eq!(recs[1].seq, b"AAA");
    }

    #[test]
    fn multi_line_records_and_crlf() {
        let recs = all(b">r1\r\nAC g t\r\n acgt\r\n>r2 \r\n");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].seq, b"ACgtacgt");
        assert_eq!(recs[1].id.as_deref(), Some("r2"));
        assert!(recs[1].seq.is_empty());
    }

    #[test]
    fn sequence_before_first_header_is_a_read() {
        let recs = all(b"GATTACA\n>r1\nACGT\n");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, None);
        assert_eq!(recs[0].seq, b"GATTACA");
        assert_eq!(recs[1].seq, b"ACGT");
    }

    #[test]
    fn leading_blank_lines_are_ignored() {
        let recs = all(b"\n\n>r1\nACGT\n");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id.as_deref(), Some("r1"));
    }

    #[test]
    fn empty_input() {
        assert!(all(b"").is_empty());
    }
}
