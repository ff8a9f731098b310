use anyhow::Context;
use basse_catalog::config::cli::{CliConfig, Command};
use basse_catalog::utils::logger;
use basse_catalog::utils::validation::{
    parse_index_location, validate_non_empty_string, IndexLocation, Validate,
};
use basse_catalog::{
    Catalog, CatalogError, ConfigProvider, CourseBuilder, CourseRequest, FileSource, HttpSource,
    IndexSource, Resource, SearchEngine, SearchHit, TomlConfig,
};
use clap::Parser;
use std::collections::HashMap;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting basse-catalog");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file {}", path))?,
        ),
        None => None,
    };
    let settings = cli.resolve_settings(file_config.as_ref());

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let source: Box<dyn IndexSource> =
        match parse_index_location("index", settings.index_location())? {
            IndexLocation::Url(url) => Box::new(HttpSource::new(url)),
            IndexLocation::Path(path) => Box::new(FileSource::new(path)),
        };

    let catalog = match Catalog::load(source.as_ref()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("❌ Failed to load index: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let mut engine = SearchEngine::new(catalog).with_cache(settings.cache_enabled());

    run_command(&cli, &settings, &mut engine)
}

fn run_command(
    cli: &CliConfig,
    settings: &basse_catalog::Settings,
    engine: &mut SearchEngine,
) -> anyhow::Result<()> {
    match &cli.command {
        Command::Search { query, exact, .. } => {
            let filters = cli.command.search_filters();
            let raw = query.clone().unwrap_or_default();
            let raw = if *exact { format!("\"{}\"", raw) } else { raw };
            let hits = engine.search(&raw, &filters);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                print_hits(&hits);
            }
        }
        Command::Suggest { partial, limit } => {
            let limit = (*limit).unwrap_or_else(|| settings.suggestion_limit());
            let suggestions = engine.suggestions(partial, limit);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else if suggestions.is_empty() {
                println!("No suggestions");
            } else {
                for suggestion in suggestions {
                    println!("{}", suggestion);
                }
            }
        }
        Command::Similar { id, limit } => {
            let limit = (*limit).unwrap_or_else(|| settings.similar_limit());
            let hits = engine.find_similar(id, limit)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                print_hits(&hits);
            }
        }
        Command::Recommend { id, limit } => {
            let limit = (*limit).unwrap_or_else(|| settings.similar_limit());
            let recommendations = CourseBuilder::new(engine).recommendations(id, limit)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            } else {
                print_resources(&recommendations);
            }
        }
        Command::Backing { style, key } => {
            validate_non_empty_string("style", style)?;
            let tracks = CourseBuilder::new(engine).backing_tracks(style, key.as_deref());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tracks)?);
            } else {
                print_resources(&tracks);
            }
        }
        Command::Course {
            style,
            difficulty,
            no_warmup,
            no_theory,
            no_application,
            no_improvisation,
            no_fun,
        } => {
            let request = CourseRequest {
                style: style.clone(),
                difficulty: difficulty.clone(),
                include_warmup: !*no_warmup,
                include_theory: !*no_theory,
                include_application: !*no_application,
                include_improvisation: !*no_improvisation,
                include_fun: !*no_fun,
            };
            request.validate()?;
            let plan = CourseBuilder::new(engine).build(&request);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_section("Warmup", &plan.warmup);
                print_section("Theory", &plan.theory);
                print_section("Application", &plan.application);
                print_section("Improvisation", &plan.improvisation);
                print_section("Fun", &plan.fun);
            }
        }
        Command::Show { id } => {
            let resource = engine
                .get(id)
                .cloned()
                .ok_or_else(|| CatalogError::UnknownResource { id: id.clone() })?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&resource)?);
            } else {
                print_resource_detail(&resource);
            }
        }
        Command::Stats => {
            let stats = engine.catalog().stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                if let Some(generated) = engine.catalog().metadata().generated {
                    println!("Index generated: {}", generated);
                }
                println!("Total resources: {}", stats.total);
                println!("With audio:      {}", stats.with_mp3);
                print_counts("By kind", &stats.by_kind);
                print_counts("By style", &stats.by_style);
                print_counts("By level", &stats.by_level);
                print_counts("By book", &stats.by_book);
                print_counts("By difficulty", &stats.by_difficulty);
            }
        }
        Command::Filters => {
            let filters = engine.catalog().available_filters();
            let books = engine.catalog().available_books();
            if cli.json {
                let payload = serde_json::json!({
                    "kinds": filters.kinds,
                    "styles": filters.styles,
                    "levels": filters.levels,
                    "books": books,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Kinds:  {}", filters.kinds.join(", "));
                println!("Styles: {}", filters.styles.join(", "));
                println!("Levels: {}", filters.levels.join(", "));
                println!("Books:  {}", books.join(", "));
            }
        }
    }

    Ok(())
}

fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No results");
        return;
    }
    println!("{} result(s)", hits.len());
    for hit in hits {
        println!(
            "{:>4}  {:<14} {:<10} {}",
            hit.score, hit.resource.id, hit.resource.kind, hit.resource.title
        );
    }
}

fn print_resources(resources: &[Resource]) {
    if resources.is_empty() {
        println!("No results");
        return;
    }
    println!("{} result(s)", resources.len());
    for resource in resources {
        println!("{:<14} {:<10} {}", resource.id, resource.kind, resource.title);
    }
}

fn print_section(label: &str, resources: &[Resource]) {
    println!("── {} ({})", label, resources.len());
    for resource in resources {
        println!("   {:<14} {}", resource.id, resource.title);
    }
}

fn print_resource_detail(resource: &Resource) {
    println!("id:    {}", resource.id);
    println!("kind:  {}", resource.kind);
    println!("title: {}", resource.title);
    if let Some(book) = &resource.metadata.book {
        println!("book:  {}", book);
    }
    if let Some(level) = &resource.metadata.level {
        println!("level: {}", level);
    }
    if let Some(key) = &resource.metadata.key {
        println!("key:   {}", key);
    }
    if let Some(page) = resource.page {
        println!("page:  {}", page);
    }
    if let Some(url) = &resource.url {
        println!("url:   {}", url);
    }
    println!("mp3:   {}", if resource.metadata.has_mp3 { "yes" } else { "no" });
    let tags: Vec<&String> = resource.tag_labels().collect();
    if !tags.is_empty() {
        let tags: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        println!("tags:  {}", tags.join(", "));
    }
}

fn print_counts(label: &str, counts: &HashMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    println!("{}:", label);
    for (key, count) in entries {
        println!("  {:<24} {}", key, count);
    }
}
