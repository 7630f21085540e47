use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use futures::Stream;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, BufReader};

use crate::error::{Error, Result};

use super::Payload;
use super::partition::ByteRange;

pub(crate) async fn open_input(path: &Path) -> Result<File> {
    File::open(path).await.map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one row, terminator included, into `buf` and returns its byte
/// length (0 at end of input). `at` is the row's payload offset, used for
/// error reporting only.
pub(crate) async fn read_row<R>(reader: &mut R, buf: &mut Vec<u8>, max_row_bytes: usize, at: u64) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let n = (&mut *reader)
        .take((max_row_bytes as u64).saturating_add(1))
        .read_until(b'\n', buf)
        .await?;
    if n > max_row_bytes {
        return Err(Error::RowTooLong { offset: at, limit: max_row_bytes });
    }
    Ok(n)
}

fn decode(buf: &[u8]) -> String {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    String::from_utf8_lossy(line).into_owned()
}

/// Streams the rows owned by worker `rank`, whose range is `range`.
///
/// Every worker except the first drops everything up to and including the
/// next `\n`: that row belongs to the previous range. Rows are then read
/// while the cursor is at or before `range.end`, so a row starting inside the
/// range is finished even if it runs past the end.
///
/// Alignment keys off the rank rather than `range.start == 0`: with more
/// workers than payload bytes several ranges start at 0, and only the first
/// one owns the opening row.
pub fn rows_in_range(
    path: PathBuf,
    payload: Payload,
    rank: usize,
    range: ByteRange,
    max_row_bytes: usize,
) -> impl Stream<Item = Result<String>> {
    async_stream::try_stream! {
        let mut file = open_input(&path).await?;
        file.seek(SeekFrom::Start(payload.offset + range.start)).await?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut pos = range.start;

        if rank != 0 {
            pos += read_row(&mut reader, &mut buf, max_row_bytes, pos).await? as u64;
        }

        while pos <= range.end {
            let n = read_row(&mut reader, &mut buf, max_row_bytes, pos).await?;
            if n == 0 {
                break;
            }
            pos += n as u64;
            yield decode(&buf);
        }
    }
}
