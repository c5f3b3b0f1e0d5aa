//! Districts command implementation

use crate::output::OutputWriter;
use crate::output_types::DistrictRow;
use anyhow::Result;
use cropadvisor_core::models::Catalog;

pub fn execute(output: &OutputWriter) -> Result<()> {
    let catalog = Catalog::builtin();
    let rows: Vec<DistrictRow> = catalog.records().iter().map(DistrictRow::from).collect();

    output.section(format!("Districts ({})", rows.len()));
    output.table(rows)
}
