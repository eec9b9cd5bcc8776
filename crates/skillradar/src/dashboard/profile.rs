use super::dataset::{Category, Record, Table};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DimensionEntry {
    pub label: String,
    pub score: f64,
}

/// Everything the summary panel shows for one individual. The PDF exporter
/// consumes the same value, so displayed and exported figures cannot drift.
#[derive(Debug, Clone, Serialize)]
pub struct CompetencyProfile {
    pub name: String,
    pub cluster: String,
    pub dimensions: Vec<DimensionEntry>,
    pub average: f64,
    pub category: Category,
    pub category_label: &'static str,
    pub status_glyph: &'static str,
    pub strongest: String,
    pub weakest: String,
    pub recommendations: Vec<&'static str>,
}

impl CompetencyProfile {
    pub fn build(table: &Table, record: &Record) -> Self {
        let labels = table.dimensions();
        let dimensions: Vec<DimensionEntry> = labels
            .iter()
            .zip(&record.scores)
            .map(|(label, &score)| DimensionEntry {
                label: label.clone(),
                score,
            })
            .collect();

        // First occurrence wins on ties, for both extremes.
        let strongest = extreme_label(&dimensions, |candidate, best| candidate > best);
        let weakest = extreme_label(&dimensions, |candidate, best| candidate < best);

        Self {
            name: record.name.clone(),
            cluster: record.cluster.clone(),
            dimensions,
            average: record.average,
            category: record.category,
            category_label: record.category.label(),
            status_glyph: record.category.status_glyph(),
            strongest,
            weakest,
            recommendations: record.category.focus_points().to_vec(),
        }
    }

    /// Title used above the radar, e.g. `Radar Kompetensi - Jane (KlasterA)`.
    pub fn radar_title(&self) -> String {
        format!("Radar Kompetensi - {} ({})", self.name, self.cluster)
    }

    pub fn scores(&self) -> Vec<f64> {
        self.dimensions.iter().map(|entry| entry.score).collect()
    }

    pub fn dimension_labels(&self) -> Vec<String> {
        self.dimensions
            .iter()
            .map(|entry| entry.label.clone())
            .collect()
    }
}

fn extreme_label(dimensions: &[DimensionEntry], beats: impl Fn(f64, f64) -> bool) -> String {
    let mut chosen = &dimensions[0];
    for entry in &dimensions[1..] {
        if beats(entry.score, chosen.score) {
            chosen = entry;
        }
    }
    chosen.label.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> Table {
        Table::from_reader(csv.as_bytes()).expect("table parses")
    }

    #[test]
    fn uniform_scores_pick_the_first_dimension_for_both_extremes() {
        let table = table("Klaster,Nama,P1,P2,P3,P4,P5\nKlaster1,Jane,5,5,5,5,5\n");
        let jane = table.select("Klaster1", "Jane").expect("Jane exists");
        let profile = CompetencyProfile::build(&table, jane);

        assert!((profile.average - 5.0).abs() < f64::EPSILON);
        assert_eq!(profile.category, Category::Optimal);
        assert_eq!(profile.strongest, "P1");
        assert_eq!(profile.weakest, "P1");
    }

    #[test]
    fn ascending_scores_average_to_the_progressing_boundary() {
        let table = table("Klaster,Nama,P1,P2,P3,P4,P5\nKlaster1,Budi,1,2,3,4,5\n");
        let budi = table.select("Klaster1", "Budi").expect("Budi exists");
        let profile = CompetencyProfile::build(&table, budi);

        assert!((profile.average - 3.0).abs() < f64::EPSILON);
        assert_eq!(profile.category, Category::Progressing);
        assert_eq!(profile.category_label, "Sedang Berkembang");
        assert_eq!(profile.strongest, "P5");
        assert_eq!(profile.weakest, "P1");
    }

    #[test]
    fn recommendations_follow_the_category() {
        let table = table("Klaster,Nama,P1\nKlaster1,Sari,2\n");
        let sari = table.select("Klaster1", "Sari").expect("Sari exists");
        let profile = CompetencyProfile::build(&table, sari);

        assert_eq!(profile.category, Category::Developing);
        assert_eq!(profile.status_glyph, "🔴");
        assert_eq!(profile.recommendations, Category::Developing.focus_points());
    }

    #[test]
    fn radar_title_names_the_selection() {
        let table = table("Klaster,Nama,P1\nKlasterB,Sari,4\n");
        let sari = table.select("KlasterB", "Sari").expect("Sari exists");
        let profile = CompetencyProfile::build(&table, sari);
        assert_eq!(profile.radar_title(), "Radar Kompetensi - Sari (KlasterB)");
    }
}
