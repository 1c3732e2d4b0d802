use std::io::Read;

use serde::Deserialize;

/// Raw row from a ratings export. Values stay as text here; resolution and
/// range checks happen in the importer.
#[derive(Debug, Deserialize)]
pub(crate) struct RatingRow {
    #[serde(rename = "Question")]
    pub(crate) question: String,
    #[serde(rename = "Rater")]
    pub(crate) rater: String,
    #[serde(rename = "Target")]
    pub(crate) target: String,
    #[serde(rename = "Value", default)]
    pub(crate) value: String,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RatingRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
