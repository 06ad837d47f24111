//! Basic SDK usage example.
//!
//! This example lists categories, searches for a keyword and prints the
//! first matching topic with its replies.
//!
//! Run with: GS_CC_CLIENT_ID=... GS_CC_CLIENT_SECRET=... cargo run --example basic_usage

use gscc_sdk::{CommunityClient, CommunityResult, Paging, SearchQuery, TopicFilter};

#[tokio::main]
async fn main() -> CommunityResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let client = CommunityClient::from_env()?;
    println!("Using {} ({})", client.region(), client.base_url());

    // Categories
    println!("\nListing categories...");
    let categories = client.categories().list(&Paging::new().page_size(10)).await?;
    for category in categories["result"].as_array().into_iter().flatten() {
        println!("  {} ({})", category["title"], category["id"]);
    }

    // Search
    println!("\nSearching for 'SSO'...");
    let hits = client
        .search()
        .content(&SearchQuery::new("SSO").page_size(5))
        .await?;
    let first = hits["result"].get(0).cloned();

    if let Some(hit) = first {
        let content_type = hit["contentType"].as_str().unwrap_or("conversation");
        let id = hit["id"]
            .as_u64()
            .or_else(|| hit["id"].as_str().and_then(|s| s.parse().ok()))
            .unwrap_or_default();

        let topic = client.topics().get(content_type, id).await?;
        println!("\n{}", topic["title"]);

        let replies = client
            .topics()
            .replies(content_type, id, &Paging::new())
            .await?;
        println!("  {} replies", replies["result"].as_array().map_or(0, Vec::len));
    }

    // Most voted ideas
    println!("\nTop ideas...");
    let ideas = client
        .topics()
        .list_by_type("idea", &TopicFilter::new().sort("voteCount").page_size(5))
        .await?;
    for idea in ideas["result"].as_array().into_iter().flatten() {
        println!("  {} ({} votes)", idea["title"], idea["votes"]);
    }

    Ok(())
}
