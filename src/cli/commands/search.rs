use crate::clients::CatalogClient;
use crate::clients::yummy::YummyClient;
use crate::config::Config;
use crate::constants::limits::SEARCH_LIMIT;

pub async fn cmd_search_anime(config: &Config, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let client = YummyClient::new(&config.catalog)?;
    let result = client.search(query, SEARCH_LIMIT).await?;

    if result.matches.is_empty() {
        println!("No anime found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for item in &result.matches {
        let title = item["title"].as_str().unwrap_or("<untitled>");
        let slug = item["anime_url"].as_str().unwrap_or("?");
        println!("• {title}");
        println!("  Slug: {slug}");
        println!();
    }

    for timing in &result.timings {
        println!("{}: {:.1} ms", timing.operation_name, timing.duration_ms);
    }

    println!("To load an episode: yummy-player player-data <slug> 0");

    Ok(())
}
