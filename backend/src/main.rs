//! Mandi Advisor - command line entry point
//!
//! Tells a farmer whether to sell a crop now or wait, and at which market.
//!
//! ## Usage
//!
//! ```bash
//! # Fallback data only, no network
//! mandi-advisor --farmer-id f-001 --crop Tomato --offline
//!
//! # Live weather, soil and routing at the farmer's current position
//! mandi-advisor --farmer-id f-001 --crop Onion --lat 28.61 --lon 77.21 \
//!     --road-quality unpaved --crop-maturity Late
//! ```

use clap::Parser;
use shared::{CropMaturity, RoadQuality};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mandi_advisor_backend::services::{Collaborators, RecommendationRequest, RecommendationService};
use mandi_advisor_backend::Config;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "mandi-advisor")]
#[command(about = "Sell-now-or-wait advice for a farmer's harvest")]
#[command(version)]
struct Args {
    /// Farmer identifier
    #[arg(long, env = "MANDI_FARMER_ID")]
    farmer_id: String,

    /// Crop id or name
    #[arg(long, default_value = "Tomato")]
    crop: String,

    /// Live GPS latitude
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Live GPS longitude
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// paved, mixed or unpaved
    #[arg(long)]
    road_quality: Option<String>,

    /// Early, Optimal or Late
    #[arg(long)]
    crop_maturity: Option<String>,

    /// Use fallback data only
    #[arg(long)]
    offline: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing; stdout carries the JSON result
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "mandi_advisor=debug,mandi_advisor_backend=debug,shared=info".into()
    });
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }

    let config = Config::load()?;

    tracing::info!("Starting Mandi Advisor");
    tracing::info!("Environment: {}", config.environment);

    let collaborators = if args.offline {
        tracing::info!("Offline mode: using fallback collaborators");
        Collaborators::offline()
    } else {
        Collaborators::online(&config)?
    };
    let service = RecommendationService::new(collaborators, config.http.timeout(), config.scoring);

    let road_quality = args
        .road_quality
        .as_deref()
        .unwrap_or(&config.defaults.road_quality);
    let crop_maturity = args
        .crop_maturity
        .as_deref()
        .unwrap_or(&config.defaults.crop_maturity);

    let request = RecommendationRequest {
        farmer_id: args.farmer_id,
        crop: args.crop,
        latitude: args.lat,
        longitude: args.lon,
        road_quality: RoadQuality::parse_or_default(road_quality),
        crop_maturity: CropMaturity::parse_or_default(crop_maturity),
    };

    let recommendation = service.recommend(&request).await?;
    println!("{}", serde_json::to_string_pretty(&recommendation)?);

    Ok(())
}
