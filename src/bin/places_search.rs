// src/bin/places_search.rs
// Terminal client for POST /api/v1/places_search
use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

#[derive(Serialize, Default, Debug, PartialEq)]
struct SearchPayload {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    states: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cities: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    amenities: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct PlaceSummary {
    id: String,
    name: String,
    city_id: String,
    #[serde(default)]
    max_guest: i32,
    #[serde(default)]
    price_by_night: i32,
}

/// Search places on a running hbnb-places API
#[derive(Parser, Debug)]
#[command(name = "places_search", version, about)]
struct Args {
    /// State ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    states: Vec<String>,

    /// City ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    cities: Vec<String>,

    /// Amenity ids a place must all have (comma-separated)
    #[arg(long, value_delimiter = ',')]
    amenities: Vec<String>,

    /// API host
    #[arg(long, env = "HBNB_API_HOST", default_value = "0.0.0.0")]
    host: String,

    /// API port
    #[arg(long, env = "HBNB_API_PORT", default_value_t = 5000)]
    port: u16,
}

fn non_empty(ids: Vec<String>) -> Vec<String> {
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

impl Args {
    fn payload(&self) -> SearchPayload {
        SearchPayload {
            states: non_empty(self.states.clone()),
            cities: non_empty(self.cities.clone()),
            amenities: non_empty(self.amenities.clone()),
        }
    }

    fn base_url(&self) -> String {
        format!("http://{}:{}/api/v1", self.host, self.port)
    }
}

async fn search(client: &Client, base_url: &str, payload: &SearchPayload) -> Result<Vec<PlaceSummary>> {
    let response = client
        .post(format!("{}/places_search", base_url))
        .json(payload)
        .send()
        .await
        .context("request failed")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        bail!("HTTP {} - {}", status, body);
    }

    response
        .json::<Vec<PlaceSummary>>()
        .await
        .context("failed to parse response JSON")
}

fn print_places(places: &[PlaceSummary], elapsed: Duration) {
    println!("\n{}📋 {} place(s){}", BOLD, places.len(), RESET);
    println!("──────────────────────────────────────────────────────────────────────────────");
    println!(
        "{:<38} {:<24} {:>6} {:>8}",
        "Id", "Name", "Guests", "Price"
    );
    println!("──────────────────────────────────────────────────────────────────────────────");

    for place in places {
        println!(
            "{:<38} {:<24} {:>6} {:>8}",
            place.id, place.name, place.max_guest, place.price_by_night
        );
        println!("{}  city {}{}", CYAN, place.city_id, RESET);
    }

    println!("──────────────────────────────────────────────────────────────────────────────");
    println!("{}✨ Done in {:.2}s{}", GREEN, elapsed.as_secs_f64(), RESET);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let payload = args.payload();
    let base_url = args.base_url();

    if payload == SearchPayload::default() {
        println!("{}⚠️  No filters given - listing every place{}", YELLOW, RESET);
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .context("failed to create HTTP client")?;

    println!("{}🔍 Searching {}...{}", CYAN, base_url, RESET);
    let started = Instant::now();
    let places = match search(&client, &base_url, &payload).await {
        Ok(places) => places,
        Err(e) => {
            println!("{}❌ {:#}{}", RED, e, RESET);
            return Err(e);
        }
    };
    print_places(&places, started.elapsed());

    Ok(())
}
