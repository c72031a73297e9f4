use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, ScanError};

/// 按行读取基因组文本，每行（去掉行尾 `\n` / `\r\n`）作为一个分块。
///
/// 以 `>` 开头的 FASTA 标题行被跳过，不计入 offset；空行作为长度为 0 的分块返回。
/// 其余行首尾相接构成一条连续序列。
pub struct GenomeReader<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
    lines: u64,
    headers: u64,
}

impl GenomeReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let fh = File::open(path).map_err(|e| ScanError::at(path, e))?;
        Ok(Self::new(BufReader::new(fh)))
    }
}

impl<R: BufRead> GenomeReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new(), lines: 0, headers: 0 }
    }

    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>> {
        loop {
            self.buf.clear();
            let n = self.reader.read_until(b'\n', &mut self.buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.lines += 1;

            let mut end = self.buf.len();
            if end > 0 && self.buf[end - 1] == b'\n' {
                end -= 1;
            }
            if end > 0 && self.buf[end - 1] == b'\r' {
                end -= 1;
            }
            if self.buf.first() == Some(&b'>') {
                self.headers += 1;
                continue;
            }
            return Ok(Some(&self.buf[..end]));
        }
    }

    /// Physical lines read so far, headers included.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn headers(&self) -> u64 {
        self.headers
    }
}
