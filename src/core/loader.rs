use crate::domain::model::{CustomerBatch, Row};
use crate::utils::error::{ImportError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Opens `path` and loads every customer row, skipping the header line.
///
/// The file is dropped before returning, whether parsing succeeded or not.
pub fn load_customer_csv<P: AsRef<Path>>(path: P) -> Result<CustomerBatch> {
    let path = path.as_ref();
    let file_error = |source| ImportError::FileError {
        path: path.to_path_buf(),
        source,
    };

    let mut data = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut data))
        .map_err(file_error)?;

    tracing::debug!("Read {} bytes from {}", data.len(), path.display());
    parse_customer_csv(&data)
}

/// Parses comma-separated customer data.
///
/// The first record is taken as the header. Rows may have different field
/// counts here; the row shape is checked when domains are extracted.
pub fn parse_customer_csv(data: &[u8]) -> Result<CustomerBatch> {
    // csv 對未閉合的引號很寬鬆，會把剩下的檔案吞進同一欄
    if let Some(line) = unterminated_quote_line(data) {
        return Err(ImportError::UnterminatedQuote { line });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        rows.push(Row::new(line, record.iter().map(str::to_string).collect()));
    }

    tracing::debug!("Parsed {} customer rows", rows.len());
    Ok(CustomerBatch { headers, rows })
}

/// Line where a quoted field opens without ever being closed, if any.
///
/// A quote only opens a field at the start of that field; `""` inside a
/// quoted field is an escaped quote.
fn unterminated_quote_line(data: &[u8]) -> Option<u64> {
    let mut line = 1;
    let mut field_start = true;
    let mut quoted_from = None;
    let mut bytes = data.iter().peekable();

    while let Some(&byte) = bytes.next() {
        if quoted_from.is_some() {
            match byte {
                b'"' if bytes.peek() == Some(&&b'"') => {
                    bytes.next();
                }
                b'"' => quoted_from = None,
                b'\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' if field_start => quoted_from = Some(line),
            b',' => {
                field_start = true;
                continue;
            }
            b'\n' => {
                line += 1;
                field_start = true;
                continue;
            }
            _ => {}
        }
        field_start = false;
    }

    quoted_from
}
