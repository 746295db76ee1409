//! Equality oracle
//!
//! Decides whether a destination file already holds exactly the bytes a
//! source file would deploy. The bytes compared are the ones that would be
//! uploaded, i.e. the transformed content when minification is on, so the raw
//! size of the source file plays no part in the answer.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use tracing::trace;

use crate::error::{DeployError, DeployResult};

const CHUNK_SIZE: usize = 64 * 1024;

/// Compare `dest` against the payload produced from `source`.
///
/// A missing source or destination is "not equal" rather than an error; any
/// other stat or read failure propagates.
pub fn files_equal(source: &Path, dest: &Path, payload: &[u8]) -> DeployResult<bool> {
    if stat(source)?.is_none() {
        return Ok(false);
    }
    let Some(dest_meta) = stat(dest)? else {
        return Ok(false);
    };

    // Unequal lengths can never hold equal bytes.
    if dest_meta.len() != payload.len() as u64 {
        trace!(
            dest = %dest.display(),
            dest_len = dest_meta.len(),
            payload_len = payload.len(),
            "size differs"
        );
        return Ok(false);
    }

    let file = match File::open(dest) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(DeployError::io(dest, e)),
    };
    content_matches(file, payload).map_err(|e| DeployError::io(dest, e))
}

fn stat(path: &Path) -> DeployResult<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DeployError::io(path, e)),
    }
}

/// Stream `reader` and compare it byte for byte with `expected`.
fn content_matches<R: Read>(mut reader: R, expected: &[u8]) -> io::Result<bool> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut offset = 0usize;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(offset == expected.len()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let end = offset + n;
        if end > expected.len() || buf[..n] != expected[offset..end] {
            return Ok(false);
        }
        offset = end;
    }
}
