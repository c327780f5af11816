use std::env;
use std::sync::Arc;

use nameres_core::config::{expand_path, Config};
use nameres_core::types::DataSourceId;
use nameres_index::{CanonicalIndex, LevenshteinMatcher};
use nameres_parse::CanonicalParser;
use nameres_resolve::Resolver;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <resolve|stats> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn load_index(config: &Config) -> anyhow::Result<Arc<CanonicalIndex>> {
    let tsv: String =
        config.get("data.canonical_tsv").unwrap_or_else(|_| "data/canonicals.tsv".to_string());
    let index = CanonicalIndex::load_tsv(&expand_path(&tsv))?;
    Ok(Arc::new(index))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "resolve" => {
            let mut advanced = false;
            let mut sources: Vec<DataSourceId> = Vec::new();
            let mut names: Vec<String> = Vec::new();
            let mut iter = args.into_iter();
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--advanced" => advanced = true,
                    "--sources" => {
                        let list = iter.next().unwrap_or_else(|| {
                            eprintln!("--sources needs a comma-separated id list");
                            std::process::exit(1)
                        });
                        for id in list.split(',').filter(|s| !s.is_empty()) {
                            sources.push(id.trim().parse().unwrap_or_else(|_| {
                                eprintln!("Bad data source id: {}", id);
                                std::process::exit(1)
                            }));
                        }
                    }
                    _ => names.push(arg),
                }
            }
            if names.is_empty() {
                eprintln!("Usage: nameres resolve [--advanced] [--sources 1,2] \"<name>\"...");
                std::process::exit(1);
            }
            let index = load_index(&config)?;
            println!("Loaded {} canonical names", index.len());
            let max_distance: u8 = config.get("search.max_edit_distance").unwrap_or(2);
            let limit: usize = config.get("search.max_candidates").unwrap_or(10);
            let matcher = LevenshteinMatcher::with_limits(Arc::clone(&index), max_distance, limit)?;
            let resolver =
                Resolver::new(index, Box::new(matcher), Box::new(CanonicalParser::new()));
            let responses = resolver.resolve(&names, &sources, advanced)?;
            for response in &responses {
                println!("{}", serde_json::to_string(response)?);
            }
        }
        "stats" => {
            let index = load_index(&config)?;
            println!(
                "{} canonical names across {} data sources",
                index.len(),
                index.source_count()
            );
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
