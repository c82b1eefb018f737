//! `related` subcommand: search, normalize, sort, then render or export.

use std::path::{Path, PathBuf};

use clap::Args;

use kwfusion_labs::{
    normalize, records, KeywordRecord, RelatedKeywordsRequest, SortKey, SortOrder,
};

#[derive(Debug, Args)]
pub(crate) struct RelatedArgs {
    /// Seed keyword to search for.
    pub keyword: String,

    #[arg(long, default_value_t = 2840)]
    pub location_code: i64,

    #[arg(long, default_value = "en")]
    pub language_code: String,

    #[arg(long, default_value_t = 3)]
    pub depth: u32,

    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    #[arg(long)]
    pub include_seed_keyword: bool,

    #[arg(long)]
    pub include_serp_info: bool,

    #[arg(long)]
    pub ignore_synonyms: bool,

    #[arg(long)]
    pub include_clickstream_data: bool,

    #[arg(long)]
    pub replace_with_core_keyword: bool,

    /// Column to sort by: keyword, search-volume, cpc, competition,
    /// competition-level, or difficulty.
    #[arg(long, default_value = "search-volume")]
    pub sort_by: String,

    /// Sort order: asc or desc.
    #[arg(long, default_value = "desc")]
    pub order: String,

    /// Write a CSV file instead of printing a table. A directory path gets
    /// the default `keyword-results-<seed>.csv` filename appended.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub(crate) async fn run_related(args: &RelatedArgs) -> anyhow::Result<()> {
    if args.keyword.trim().is_empty() {
        anyhow::bail!("keyword must not be empty");
    }
    let sort_key: SortKey = args
        .sort_by
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let sort_order: SortOrder = args.order.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let config = kwfusion_core::load_app_config()?;
    let client = crate::labs_client(&config)?;

    let request = RelatedKeywordsRequest {
        keyword: args.keyword.clone(),
        location_code: args.location_code,
        language_code: args.language_code.clone(),
        depth: args.depth,
        limit: args.limit,
        include_seed_keyword: args.include_seed_keyword,
        include_serp_info: args.include_serp_info,
        ignore_synonyms: args.ignore_synonyms,
        include_clickstream_data: args.include_clickstream_data,
        replace_with_core_keyword: args.replace_with_core_keyword,
    };

    let raw = client.related_keywords(&request).await?;
    let mut keyword_records = normalize(&raw);
    tracing::info!(
        count = keyword_records.len(),
        keyword = %args.keyword,
        "normalized related keywords"
    );

    records::sort_records(&mut keyword_records, sort_key, sort_order);

    match &args.csv {
        Some(path) => {
            let path = resolve_csv_path(path, &args.keyword);
            std::fs::write(&path, records::to_csv(&keyword_records))?;
            println!(
                "wrote {} records to {}",
                keyword_records.len(),
                path.display()
            );
        }
        None => print_table(&keyword_records),
    }

    Ok(())
}

fn resolve_csv_path(path: &Path, seed_keyword: &str) -> PathBuf {
    if path.is_dir() {
        path.join(records::csv_filename(seed_keyword))
    } else {
        path.to_path_buf()
    }
}

fn print_table(keyword_records: &[KeywordRecord]) {
    if keyword_records.is_empty() {
        println!("no results");
        return;
    }

    println!(
        "{:<40} {:>12} {:>10} {:>8} {:>12}  {}",
        "KEYWORD", "VOLUME", "DIFFICULTY", "CPC", "COMPETITION", "INTENT"
    );
    for record in keyword_records {
        println!(
            "{:<40} {:>12} {:>10} {:>8.2} {:>12}  {}",
            record.keyword,
            record.search_volume,
            record.difficulty,
            record.cpc,
            record.competition_level,
            record.intent.main
        );
    }
}
