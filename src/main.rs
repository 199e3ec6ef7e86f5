//! Cuponme command line
//!
//! Runs the discovery pipeline and the access-control checks from a shell.

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cuponme::{
    config::Settings,
    middleware::{navigation, FeatureTable, RouteDecision, RouteGuard},
    models::{CardPrice, EventCard, Plan, Role},
    services::{CategoryFilter, EventListing, FilterState, GeoService, PageItem, ServiceFactory},
    state::{SessionHolder, SessionStore},
    utils::{helpers::{format_clp, truncate_text}, logging},
};

const TITLE_WIDTH: usize = 40;

/// cuponme - event discovery and admin access checks
#[derive(Parser)]
#[command(name = "cuponme")]
#[command(about = "Browse events and check admin panel access", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a JSON file of event cards and print one page
    Browse {
        /// JSON array of event cards
        cards: PathBuf,

        /// Free-text search
        #[arg(long, short)]
        query: Option<String>,

        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        commune: Option<String>,

        /// Inclusive price ceiling
        #[arg(long)]
        max_price: Option<f64>,

        /// Category chip, e.g. `concert` or `all`
        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Skip region enrichment from the geo dataset
        #[arg(long)]
        no_geo: bool,
    },
    /// Print the admin navigation for a role and plan
    Panel {
        #[arg(long, default_value = "user")]
        role: String,

        #[arg(long, default_value = "free")]
        plan: String,
    },
    /// List the subscription plans published by the backend
    Plans,
    /// Evaluate the admin route guard for a request
    Guard {
        path: String,

        /// Raw `Cookie` header
        #[arg(long)]
        cookie: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new().context("loading configuration")?;
    settings.validate().context("validating configuration")?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    match cli.command {
        Commands::Browse {
            cards,
            query,
            region,
            commune,
            max_price,
            category,
            page,
            no_geo,
        } => {
            let mut filters = FilterState::with_ceiling(settings.listing.max_price);
            filters.query = query.unwrap_or_default();
            filters.region = region.unwrap_or_default();
            filters.commune = commune.unwrap_or_default();
            if let Some(ceiling) = max_price {
                filters.price_ceiling = ceiling;
            }
            if let Some(category) = category {
                filters.category = CategoryFilter::parse(&category)
                    .with_context(|| format!("unknown category: {}", category))?;
            }
            browse_command(&settings, cards, filters, page, no_geo).await
        }
        Commands::Panel { role, plan } => panel_command(&role, &plan),
        Commands::Plans => plans_command(&settings).await,
        Commands::Guard { path, cookie } => guard_command(&settings, &path, cookie.as_deref()),
    }
}

async fn browse_command(
    settings: &Settings,
    path: PathBuf,
    filters: FilterState,
    page: usize,
    no_geo: bool,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let cards: Vec<EventCard> = serde_json::from_str(&raw).context("parsing event cards")?;
    info!(cards = cards.len(), source = %path.display(), "Event cards loaded");

    let mut listing = EventListing::new(cards, &settings.listing);

    if !no_geo {
        let geo = GeoService::new(&settings.geo, &settings.api.user_agent)?;
        let cancel = CancellationToken::new();

        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, abandoning geo enrichment");
                on_interrupt.cancel();
            }
        });

        if let Some(index) = geo.load_index_cancellable(&cancel).await {
            listing.apply_geo(&index);
        }
    }

    listing.set_filters(filters);
    listing.goto(page);

    let view = listing.view();
    if view.filters_active {
        println!("{} results", view.total_results);
    }

    for card in &view.items {
        let price = match &card.price {
            Some(CardPrice::Amount(amount)) => format_clp(*amount, false),
            Some(CardPrice::Label(label)) => label.clone(),
            None => "-".to_string(),
        };
        println!(
            "{:>4}  {:<width$}  {} .. {}  {}, {}  {}",
            card.id,
            truncate_text(&card.title, TITLE_WIDTH),
            card.start,
            card.display_end(),
            card.commune,
            card.region,
            price,
            width = TITLE_WIDTH
        );
    }

    if let Some(links) = &view.page_list {
        let links: Vec<String> = links
            .iter()
            .map(|item| match item {
                PageItem::Page(n) if *n == view.page => format!("[{}]", n),
                other => other.to_string(),
            })
            .collect();
        println!("page {} of {}: {}", view.page, view.total_pages, links.join(" "));
    }

    Ok(())
}

fn panel_command(role: &str, plan: &str) -> Result<()> {
    let role: Role = role.parse()?;
    let plan: Plan = plan.parse()?;

    let user = cuponme::models::CurrentUser {
        id: "cli".to_string(),
        full_name: "cli".to_string(),
        email: String::new(),
        role,
        plan,
    };

    println!("{} · plan {}", role, plan);
    for entry in navigation(&user, &FeatureTable::panel()) {
        let marker = if entry.accessible { " " } else { "x" };
        println!("[{}] {}", marker, entry.label);
    }
    Ok(())
}

async fn plans_command(settings: &Settings) -> Result<()> {
    let session = SessionHolder::load(SessionStore::new(&settings.session)).await;
    let services = ServiceFactory::new(settings, session)?;

    let plans = services
        .api
        .list_plans()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    for plan in plans {
        let marker = if plan.highlight { "*" } else { " " };
        println!("{} {:<12} {:>14}  {}", marker, plan.name, plan.price_label(), plan.description);
    }
    Ok(())
}

fn guard_command(settings: &Settings, path: &str, cookie: Option<&str>) -> Result<()> {
    let guard = RouteGuard::new(&settings.access);
    match guard.check(path, cookie) {
        RouteDecision::Next => println!("allow {}", path),
        RouteDecision::Redirect(to) => println!("redirect {} -> {}", path, to),
    }
    Ok(())
}
