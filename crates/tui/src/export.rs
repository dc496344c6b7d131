//! CSV export of the whole session.
//!
//! Layout matches the app's historical export: a header with one share
//! column per participant, one row per item, a Tax row, a Tip row, a blank
//! line and a TOTALS row with `$`-prefixed per-person grand totals. All
//! money is formatted to exactly two decimals.

use std::{io::Write, path::Path};

use csv::WriterBuilder;
use engine::{RATIO_LABEL, Session, item_rows};

use crate::error::Result;

/// Writes the session to `path`, creating or truncating the file.
pub fn write_csv(path: &Path, session: &Session) -> Result<()> {
    // The blank separator line has fewer fields than the data rows.
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    write_rows(&mut writer, session)?;
    writer.flush()?;
    Ok(())
}

/// Renders the session to a CSV string.
pub fn to_csv_string(session: &Session) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    write_rows(&mut writer, session)?;
    let data = writer
        .into_inner()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, session: &Session) -> Result<()> {
    let totals = session.recompute();
    let rows = item_rows(session);

    let mut header = vec![
        "Item".to_string(),
        "Cost".to_string(),
        "Expense To".to_string(),
    ];
    header.extend(
        session
            .participants()
            .iter()
            .map(|p| format!("{} Share", p.name)),
    );
    writer.write_record(&header)?;

    for row in &rows {
        let mut record = vec![row.name.clone(), row.cost.to_string(), row.payer.clone()];
        record.extend(row.shares.iter().map(ToString::to_string));
        writer.write_record(&record)?;
    }

    let mut tax_record = vec![
        "Tax".to_string(),
        session.tax().to_string(),
        RATIO_LABEL.to_string(),
    ];
    tax_record.extend(totals.tax_shares.iter().map(ToString::to_string));
    writer.write_record(&tax_record)?;

    let mut tip_record = vec![
        "Tip".to_string(),
        session.tip().to_string(),
        RATIO_LABEL.to_string(),
    ];
    tip_record.extend(totals.tip_shares.iter().map(ToString::to_string));
    writer.write_record(&tip_record)?;

    writer.write_record([""])?;

    let mut totals_record = vec!["TOTALS".to_string(), String::new(), String::new()];
    totals_record.extend(totals.totals.iter().map(|t| format!("${t}")));
    writer.write_record(&totals_record)?;

    Ok(())
}
