use std::io::SeekFrom;
use std::path::Path;

use tokio::io::{AsyncSeekExt, BufReader};

use crate::error::{Error, Result};

use super::Payload;
use super::rows::{open_input, read_row};

/// Skips the header line and measures what follows it.
pub async fn discover(path: &Path, max_row_bytes: usize) -> Result<Payload> {
    let mut reader = BufReader::new(open_input(path).await?);
    let mut header = Vec::new();
    let header_len = read_row(&mut reader, &mut header, max_row_bytes, 0).await? as u64;
    if header_len == 0 {
        return Err(Error::EmptyInput { path: path.to_path_buf() });
    }
    let mut file = reader.into_inner();
    let total = file.seek(SeekFrom::End(0)).await?;
    log::debug!("{}: header {} bytes, payload {} bytes", path.display(), header_len, total - header_len);
    Ok(Payload { offset: header_len, len: total - header_len })
}
