mod parser;

pub mod cache;

use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Cluster assigned when the source table carries no cluster column.
pub const DEFAULT_CLUSTER: &str = "Klaster1";

/// Case-insensitive header prefix marking a competency dimension column.
pub const DIMENSION_PREFIX: &str = "P";

/// Qualitative bin derived from an individual's average score.
///
/// The bins partition the 0–5 score range: below 3 is `Developing`, 3 up to
/// (but excluding) 4 is `Progressing`, 4 and above is `Optimal`. Boundary
/// averages land in the higher bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Developing,
    Progressing,
    Optimal,
}

impl Category {
    pub fn from_average(average: f64) -> Self {
        if average < 3.0 {
            Self::Developing
        } else if average < 4.0 {
            Self::Progressing
        } else {
            Self::Optimal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Developing => "Belum/Akan Berkembang",
            Self::Progressing => "Sedang Berkembang",
            Self::Optimal => "Sudah/Sangat Optimal",
        }
    }

    pub const fn status_glyph(self) -> &'static str {
        match self {
            Self::Developing => "🔴",
            Self::Progressing => "🟡",
            Self::Optimal => "🟢",
        }
    }

    /// Short recommendation lines shown on the live summary panel.
    pub const fn focus_points(self) -> &'static [&'static str] {
        match self {
            Self::Developing => &[
                "Fokus pada microlearning & coaching.",
                "Diperkuat dengan mentoring lintas klaster.",
            ],
            Self::Progressing => &[
                "Pertahankan praktik baik.",
                "Didorong kolaborasi & refleksi tim.",
            ],
            Self::Optimal => &[
                "Sudah sangat optimal.",
                "Siap menjadi fasilitator Learning Cell & mentor.",
            ],
        }
    }

    /// Longer recommendation lines used on the report's text page.
    pub const fn development_plan(self) -> &'static [&'static str] {
        match self {
            Self::Developing => &[
                "Pendampingan intensif",
                "Microlearning lintas klaster",
                "Coaching terarah",
            ],
            Self::Progressing => &[
                "Penguatan peer learning",
                "Simulasi & refleksi kolaboratif",
            ],
            Self::Optimal => &[
                "Siap menjadi role model & fasilitator Learning Cell",
                "Dokumentasi best practice",
            ],
        }
    }
}

/// One individual's row: identity plus scores parallel to the table's
/// dimension labels, with the derived average and category.
#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub cluster: String,
    pub scores: Vec<f64>,
    pub average: f64,
    pub category: Category,
}

/// The full score table, loaded once and read-only thereafter.
#[derive(Debug, Clone)]
pub struct Table {
    dimensions: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        parser::parse_table(reader)
    }

    pub(crate) fn new(dimensions: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            dimensions,
            records,
        }
    }

    /// Ordered labels of the discovered dimension columns.
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted distinct cluster values.
    pub fn clusters(&self) -> Vec<&str> {
        let mut clusters: Vec<&str> = self.records.iter().map(|r| r.cluster.as_str()).collect();
        clusters.sort_unstable();
        clusters.dedup();
        clusters
    }

    /// Sorted distinct names restricted to one cluster.
    pub fn names_in(&self, cluster: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .records
            .iter()
            .filter(|r| r.cluster == cluster)
            .map(|r| r.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Resolve one individual by exact (cluster, name) match. The first
    /// matching row wins if the pair is duplicated.
    pub fn select(&self, cluster: &str, name: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.cluster == cluster && r.name == name)
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    NoDimensionColumns,
    InvalidScore { row: usize, column: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read score table: {err}"),
            LoadError::Csv(err) => write!(f, "invalid score table data: {err}"),
            LoadError::NoDimensionColumns => write!(
                f,
                "no dimension columns found (expected headers starting with '{DIMENSION_PREFIX}')"
            ),
            LoadError::InvalidScore { row, column } => {
                write!(f, "data row {row}, column '{column}': score is not a number")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Csv(err) => Some(err),
            LoadError::NoDimensionColumns | LoadError::InvalidScore { .. } => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let csv = "\
Klaster,Nama,P1,P2,P3
KlasterA,Jane,5,5,5
KlasterA,Budi,1,2,3
KlasterB,Sari,4,4,4
";
        Table::from_reader(csv.as_bytes()).expect("sample table parses")
    }

    #[test]
    fn category_boundaries_land_in_the_higher_bin() {
        assert_eq!(Category::from_average(2.99), Category::Developing);
        assert_eq!(Category::from_average(3.0), Category::Progressing);
        assert_eq!(Category::from_average(3.99), Category::Progressing);
        assert_eq!(Category::from_average(4.0), Category::Optimal);
        assert_eq!(Category::from_average(5.0), Category::Optimal);
    }

    #[test]
    fn average_is_unweighted_mean_of_dimension_columns() {
        let table = sample_table();
        let budi = table.select("KlasterA", "Budi").expect("Budi exists");
        assert!((budi.average - 2.0).abs() < f64::EPSILON);
        assert_eq!(budi.category, Category::Developing);
    }

    #[test]
    fn clusters_are_sorted_and_distinct() {
        let table = sample_table();
        assert_eq!(table.clusters(), vec!["KlasterA", "KlasterB"]);
    }

    #[test]
    fn names_never_leak_across_clusters() {
        let table = sample_table();
        assert_eq!(table.names_in("KlasterA"), vec!["Budi", "Jane"]);
        assert_eq!(table.names_in("KlasterB"), vec!["Sari"]);
        assert!(table.names_in("KlasterC").is_empty());
    }

    #[test]
    fn select_requires_both_cluster_and_name() {
        let table = sample_table();
        assert!(table.select("KlasterB", "Jane").is_none());
        let jane = table.select("KlasterA", "Jane").expect("Jane exists");
        assert_eq!(jane.scores, vec![5.0, 5.0, 5.0]);
        assert_eq!(jane.category, Category::Optimal);
    }

    #[test]
    fn duplicate_pairs_resolve_to_the_first_row() {
        let csv = "\
Klaster,Nama,P1
KlasterA,Jane,5
KlasterA,Jane,1
";
        let table = Table::from_reader(csv.as_bytes()).expect("table parses");
        let jane = table.select("KlasterA", "Jane").expect("Jane exists");
        assert!((jane.average - 5.0).abs() < f64::EPSILON);
    }
}
