use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccountRow<'a> {
    pub id: usize,
    pub name: &'a str,
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct HistoryRow<'a> {
    pub id: usize,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub amount: Decimal,
    pub to: Option<&'a str>,
    pub from: Option<&'a str>,
}

pub fn print_rows<W, T>(output: &mut W, rows: impl Iterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
