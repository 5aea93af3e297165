use crate::domain::model::{DomainCount, OutputFormat};
use crate::utils::error::{ImportError, Result};

/// Serializes the domain counts in the requested format.
pub fn render(counts: &[DomainCount], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => render_csv(counts),
        OutputFormat::Json => {
            let mut data = serde_json::to_vec_pretty(counts)?;
            data.push(b'\n');
            Ok(data)
        }
    }
}

// 每行 `domain,count`，不輸出標題列
fn render_csv(counts: &[DomainCount]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for pair in counts {
        writer.write_record([pair.domain(), pair.count().to_string().as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| ImportError::IoError(e.into_error()))
}
