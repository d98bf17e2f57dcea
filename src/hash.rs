//! BLAKE3 content hashing, used to tell unchanged framework files from updated ones

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{Result, read_failed};

/// Calculate the BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<blake3::Hash> {
    let file = File::open(path).map_err(|e| read_failed(path, e))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| read_failed(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize())
}

/// Whether `target` exists as a file with exactly the content of `source`
pub fn same_content(source: &Path, target: &Path) -> Result<bool> {
    let Ok(target_meta) = std::fs::metadata(target) else {
        return Ok(false);
    };
    if !target_meta.is_file() {
        return Ok(false);
    }
    let source_meta = std::fs::metadata(source).map_err(|e| read_failed(source, e))?;
    if source_meta.len() != target_meta.len() {
        return Ok(false);
    }
    Ok(hash_file(source)? == hash_file(target)?)
}
