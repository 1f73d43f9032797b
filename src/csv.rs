use serde::de::DeserializeOwned;

/// Deserializes a CSV with headers into its rows, in order.
/// # Error
/// Errors if any row does not match `D`
pub fn deserialize<D: DeserializeOwned>(data: &[u8]) -> Result<Vec<D>, csv::Error> {
    csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(std::io::Cursor::new(data))
        .into_deserialize()
        .collect()
}

pub fn serialize(
    items: impl Iterator<Item = impl serde::Serialize>,
) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}
