use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::ReadError;

/// Opens a text file, turning a missing path into `ReadError::NotFound`.
pub fn open_text(path: &Path) -> Result<BufReader<File>, ReadError> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ReadError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(ReadError::Io(e)),
    }
}

/// Calls `f` with the 1-based line number and the tokens of every
/// non-blank line.
pub fn for_each_record<R, F>(path: &Path, reader: R, mut f: F) -> Result<(), ReadError>
where
    R: BufRead,
    F: FnMut(usize, &[&str]) -> Result<(), ReadError>,
{
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = String::from_utf8(bytes).map_err(|e| {
            ReadError::malformed(path, index + 1, format!("record is not valid UTF-8: {}", e))
        })?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        f(index + 1, &tokens).map_err(|e| match e {
            ReadError::MalformedRecord { line, reason, .. } => {
                ReadError::malformed(path, line, reason)
            }
            other => other,
        })?;
    }

    Ok(())
}

/// Parses the token at `index` as a float.
pub fn parse_field(tokens: &[&str], index: usize, name: &str, line: usize) -> Result<f64, ReadError> {
    let token = tokens.get(index).ok_or_else(|| {
        ReadError::malformed(
            "",
            line,
            format!(
                "expected {} at column {}, found only {} column(s)",
                name,
                index + 1,
                tokens.len()
            ),
        )
    })?;

    token.parse::<f64>().map_err(|e| {
        ReadError::malformed("", line, format!("invalid {} {:?}: {}", name, token, e))
    })
}
