use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};

pub fn temp_dir(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir()
}

pub fn write_csv(base: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = base.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

/// One row per month on `day`, starting January 2023, in the producer's
/// `amount,categoryId,createdAt` column order and `MM-DD-YYYY` dates.
pub fn monthly_csv(months: u32, day: u32, amount: impl Fn(u32) -> f64) -> String {
    let mut body = String::from("amount,categoryId,createdAt\n");
    for offset in 0..months {
        let year = 2023 + offset / 12;
        let month = offset % 12 + 1;
        body.push_str(&format!(
            "{},food,{month:02}-{day:02}-{year}\n",
            amount(offset)
        ));
    }
    body
}
