use super::{Category, LoadError, Record, Table, DEFAULT_CLUSTER, DIMENSION_PREFIX};
use std::io::Read;

struct Layout {
    cluster: Option<usize>,
    name: Option<usize>,
    dimensions: Vec<(usize, String)>,
}

impl Layout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let mut cluster = None;
        let mut name = None;
        let mut dimensions = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let label = header.trim();
            if label.eq_ignore_ascii_case("klaster") || label.eq_ignore_ascii_case("cluster") {
                cluster.get_or_insert(index);
            } else if label.eq_ignore_ascii_case("nama") || label.eq_ignore_ascii_case("name") {
                name.get_or_insert(index);
            } else if label.to_uppercase().starts_with(DIMENSION_PREFIX) {
                dimensions.push((index, label.to_string()));
            }
        }

        if dimensions.is_empty() {
            return Err(LoadError::NoDimensionColumns);
        }

        Ok(Self {
            cluster,
            name,
            dimensions,
        })
    }
}

pub(crate) fn parse_table<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let layout = Layout::from_headers(csv_reader.headers()?)?;
    let mut records = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;

        let cluster = layout
            .cluster
            .and_then(|i| row.get(i))
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CLUSTER)
            .to_string();

        let name = layout
            .name
            .and_then(|i| row.get(i))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| index.to_string());

        let mut scores = Vec::with_capacity(layout.dimensions.len());
        for (column, label) in &layout.dimensions {
            let raw = row.get(*column).unwrap_or("");
            let score = raw
                .parse::<f64>()
                .map_err(|_| LoadError::InvalidScore {
                    row: index + 1,
                    column: label.clone(),
                })?;
            scores.push(score);
        }

        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let category = Category::from_average(average);

        records.push(Record {
            name,
            cluster,
            scores,
            average,
            category,
        });
    }

    let dimensions = layout
        .dimensions
        .into_iter()
        .map(|(_, label)| label)
        .collect();

    Ok(Table::new(dimensions, records))
}
