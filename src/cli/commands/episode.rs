use std::sync::Arc;

use crate::clients::yummy::YummyClient;
use crate::config::Config;
use crate::domain::{EpisodeIndex, Slug};
use crate::services::{EpisodeResolver, PlayerDataAggregator};

fn build_resolver(config: &Config) -> anyhow::Result<Arc<EpisodeResolver>> {
    let catalog = Arc::new(YummyClient::new(&config.catalog)?);
    Ok(Arc::new(EpisodeResolver::new(catalog)))
}

pub async fn cmd_qualities(config: &Config, slug: &str, index: i64) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;

    let ladder = resolver
        .qualities(&Slug::new(slug), EpisodeIndex::new(index))
        .await?;

    if ladder.is_empty() {
        eprintln!("No playable qualities for {slug} episode index {index}");
    } else {
        let tiers: Vec<String> = ladder.available().iter().map(ToString::to_string).collect();
        eprintln!("Qualities loaded: {}", tiers.join(", "));
    }

    println!("{}", serde_json::to_string_pretty(&ladder)?);
    Ok(())
}

pub async fn cmd_player_data(config: &Config, slug: &str, index: i64) -> anyhow::Result<()> {
    let aggregator = PlayerDataAggregator::new(build_resolver(config)?);

    let payload = aggregator
        .aggregate(&Slug::new(slug), EpisodeIndex::new(index))
        .await?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
