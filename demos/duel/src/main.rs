//! Duel: a runnable Skirmish server with a built-in card catalog.
//!
//! Run with no arguments to serve the sample catalog on 0.0.0.0:8080,
//! or pass a path to a catalog JSON file.

use skirmish::prelude::*;

// ---------------------------------------------------------------------------
// Sample catalog
// ---------------------------------------------------------------------------

fn sample_catalog() -> Vec<CardTemplate> {
    let cards: [(&str, u32, u32, u32); 12] = [
        ("Grave Sentinel", 3, 5, 2),
        ("Ember Imp", 4, 2, 1),
        ("Tidecaller", 2, 6, 2),
        ("Rust Golem", 5, 7, 3),
        ("Thorn Sprite", 1, 3, 1),
        ("Pit Marauder", 6, 4, 3),
        ("Glass Archon", 7, 1, 2),
        ("Moor Hag", 3, 3, 1),
        ("Storm Herald", 5, 5, 3),
        ("Cinder Wolf", 4, 3, 2),
        ("Vault Warden", 2, 8, 3),
        ("Night Courier", 3, 2, 1),
    ];
    cards
        .iter()
        .enumerate()
        .map(|(i, (name, attack, defense, level))| CardTemplate {
            id: CardId(i as u64 + 1),
            name: (*name).to_string(),
            image: format!("{}.png", name.to_lowercase().replace(' ', "_")),
            attack: *attack,
            defense: *defense,
            level: *level,
            description: String::new(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Server bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let catalog = match std::env::args().nth(1) {
        Some(path) => skirmish::load_catalog(path).await?,
        None => sample_catalog(),
    };

    let server = SkirmishServer::builder()
        .bind("0.0.0.0:8080")
        .catalog(catalog)
        .build()
        .await?;
    server.run().await?;
    Ok(())
}
