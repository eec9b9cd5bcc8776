use clap::Args;
use skillradar::config::AppConfig;
use skillradar::dashboard::dataset::cache;
use skillradar::dashboard::profile::CompetencyProfile;
use skillradar::dashboard::report::{render_profile_pdf, suggested_file_name};
use skillradar::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Cluster the individual belongs to
    #[arg(long)]
    pub(crate) cluster: String,
    /// Name of the individual
    #[arg(long)]
    pub(crate) name: String,
    /// Score table to load (defaults to the configured data file)
    #[arg(long)]
    pub(crate) data_file: Option<PathBuf>,
    /// Output path (defaults to the download file name in the current directory)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct InspectArgs {
    /// Score table to load (defaults to the configured data file)
    #[arg(long)]
    pub(crate) data_file: Option<PathBuf>,
    /// Restrict the listing to one cluster
    #[arg(long)]
    pub(crate) cluster: Option<String>,
}

/// CLI twin of the dashboard's download button.
pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        cluster,
        name,
        data_file,
        out,
    } = args;

    let table = cache::load(resolve_data_file(data_file)?)?;
    let record = table
        .select(&cluster, &name)
        .ok_or_else(|| AppError::SelectionNotFound {
            cluster: cluster.clone(),
            name: name.clone(),
        })?;

    let profile = CompetencyProfile::build(&table, record);
    let pdf = render_profile_pdf(&profile)?;
    let out = out.unwrap_or_else(|| PathBuf::from(suggested_file_name(&cluster, &name)));
    std::fs::write(&out, pdf)?;

    println!(
        "Wrote profile for {} ({}) to {}",
        profile.name,
        profile.cluster,
        out.display()
    );
    Ok(())
}

/// Walk the table on stdout: clusters, names, and the summary line per row.
pub(crate) fn run_inspect(args: InspectArgs) -> Result<(), AppError> {
    let InspectArgs { data_file, cluster } = args;

    let table = cache::load(resolve_data_file(data_file)?)?;
    println!(
        "Score table: {} individuals across {} dimensions",
        table.records().len(),
        table.dimensions().len()
    );

    for current in table.clusters() {
        if cluster.as_deref().is_some_and(|wanted| wanted != current) {
            continue;
        }

        println!("\n{current}");
        for name in table.names_in(current) {
            // names_in only yields names present in the cluster
            if let Some(record) = table.select(current, name) {
                let profile = CompetencyProfile::build(&table, record);
                println!(
                    "  {:<24} rata-rata {:.2}  {} {}",
                    profile.name, profile.average, profile.status_glyph, profile.category_label
                );
                println!(
                    "    tertinggi {}  |  terendah {}",
                    profile.strongest, profile.weakest
                );
            }
        }
    }

    Ok(())
}

fn resolve_data_file(override_path: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match override_path {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.dashboard.data_file),
    }
}
