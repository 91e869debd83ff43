//! Raw binary field output.
//!
//! Layout: `rows` and `cols` as little-endian `u64`, followed by the
//! row-major pixel values as little-endian `f64`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use nimbus_field::Field;

/// Writes a field to `path` in the raw little-endian layout.
pub fn write_field(path: &Path, field: &Field) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    let mut w = BufWriter::new(file);

    w.write_all(&(field.rows() as u64).to_le_bytes())?;
    w.write_all(&(field.cols() as u64).to_le_bytes())?;
    for &v in field.as_slice() {
        w.write_all(&v.to_le_bytes())?;
    }
    w.flush()
        .with_context(|| format!("failed to write field: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_pixels() {
        let field = Field::from_vec(2, 3, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        let path = std::env::temp_dir().join(format!("nimbus-output-test-{}.bin", std::process::id()));
        write_field(&path, &field).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(bytes.len(), 16 + 6 * 8);
        assert_eq!(u64::from_le_bytes(bytes[0..8].try_into().unwrap()), 2);
        assert_eq!(u64::from_le_bytes(bytes[8..16].try_into().unwrap()), 3);
        let first = f64::from_le_bytes(bytes[16..24].try_into().unwrap());
        assert_eq!(first, 0.1);
        let last = f64::from_le_bytes(bytes[56..64].try_into().unwrap());
        assert_eq!(last, 0.6);
    }
}
