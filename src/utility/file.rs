use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use encoding_rs::Encoding;

// ラベルは WHATWG Encoding Standard に従う ("utf-8", "shift_jis", "windows-1252" 等)
pub fn read_text_file(path: &Path, encoding_label: Option<&str>) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let encoding = match encoding_label {
        Some(label) => Encoding::for_label(label.as_bytes())
            .with_context(|| format!("Unknown encoding: {}", label))?,
        None => encoding_rs::UTF_8,
    };

    // BOM があればそちらを優先する
    let (txt, actual_encoding, had_errors) = encoding.decode(&bytes);
    ensure!(
        !had_errors,
        "{} is not valid {}",
        path.display(),
        actual_encoding.name()
    );

    Ok(txt.into_owned())
}
