use anyhow::Result;

use roletinha_core::History;

/// Dump a session's spins to CSV, oldest first so the file reads as a
/// timeline even though the history itself is newest first.
pub fn write_history(path: &str, history: &History) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&[
        "ts", "face", "stake", "position", "landed", "outcome", "payout", "change",
    ])?;
    let rows: Vec<_> = history.iter().collect();
    for record in rows.into_iter().rev() {
        writer.write_record(&[
            record.ts.to_rfc3339(),
            record.face.to_string(),
            record.stake.to_string(),
            record.position.to_string(),
            record.landed.to_string(),
            record.outcome.to_string(),
            record.payout.to_string(),
            record.change.to_string(),
        ])?;
    }
    writer.flush()?;
    println!("Exported {} rows to {}", history.len(), path);
    Ok(())
}
