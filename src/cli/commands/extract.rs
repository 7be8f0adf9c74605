//! Entity-type extraction command.

use std::path::Path;

use ocr_aggregate::services::aggregation::extract_by_entity_type;

use crate::cli::helpers::read_pages;

pub fn cmd_extract(input: &Path, entity_type: &str) -> anyhow::Result<()> {
    let pages = read_pages(input)?;
    let texts = extract_by_entity_type(&pages, entity_type);
    tracing::info!("Found {} regions tagged {:?}", texts.len(), entity_type);

    for text in texts {
        println!("{}", text);
    }
    Ok(())
}
