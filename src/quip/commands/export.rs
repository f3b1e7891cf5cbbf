use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Quote;
use crate::repository::QuoteRepository;
use crate::store::StorageBackend;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXPORT_FILE: &str = "quotes.json";

/// Writes every quote, regardless of the active category, as pretty JSON.
pub fn run<B: StorageBackend>(repo: &QuoteRepository<B>, path: Option<&Path>) -> Result<CmdResult> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    write_export(&mut writer, repo.quotes())?;
    writer.flush()?;

    let count = repo.quotes().len();
    let mut result = CmdResult::default().with_paths(vec![path.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Exported {} quote{} to {}",
        count,
        if count == 1 { "" } else { "s" },
        path.display()
    )));
    Ok(result)
}

pub fn write_export<W: Write>(writer: &mut W, quotes: &[Quote]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, quotes)?;
    writeln!(writer)?;
    Ok(())
}
