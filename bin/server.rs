// Homefront - Web Server
// REST API over the calculators and the listing inventory

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use homefront::{
    affordability, listings::PropertyType, mortgage, parse_currency, AffordabilityEstimate,
    AffordabilityInputs, DebtServicePolicy, Listing, ListingBook, ListingFilter, MlsConfig,
    MortgageInputs, MortgageQuote, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Shared application state
#[derive(Clone)]
struct AppState {
    book: Arc<ListingBook>,
    config: Arc<MlsConfig>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: None,
        }
    }

    fn invalid(errors: &[ValidationError]) -> Self {
        Self {
            success: false,
            data: None,
            errors: Some(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    fn not_found(message: String) -> Self {
        Self {
            success: false,
            data: None,
            errors: Some(vec![message]),
        }
    }
}

// ============================================================================
// Query parameters
// ============================================================================

/// Calculator inputs arrive as the formatted strings the page displays
/// ("500,000"), so they go through parse_currency like any other input field
#[derive(Deserialize)]
struct MortgageParams {
    home_price: String,
    down_payment: String,
    interest_rate: String,
    loan_term_years: u32,
}

impl MortgageParams {
    fn inputs(&self) -> MortgageInputs {
        MortgageInputs {
            home_price: parse_currency(&self.home_price),
            down_payment: parse_currency(&self.down_payment),
            interest_rate: parse_currency(&self.interest_rate),
            loan_term_years: self.loan_term_years,
        }
    }
}

#[derive(Deserialize)]
struct AffordabilityParams {
    annual_income: String,
    monthly_debts: String,
    down_payment: String,
    interest_rate: String,
    loan_term_years: u32,
    #[serde(default)]
    policy: Option<DebtServicePolicy>,
}

impl AffordabilityParams {
    fn inputs(&self) -> AffordabilityInputs {
        AffordabilityInputs {
            annual_income: parse_currency(&self.annual_income),
            monthly_debts: parse_currency(&self.monthly_debts),
            down_payment: parse_currency(&self.down_payment),
            interest_rate: parse_currency(&self.interest_rate),
            loan_term_years: self.loan_term_years,
        }
    }
}

#[derive(Deserialize)]
struct ListingParams {
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_beds: Option<u32>,
    min_baths: Option<f64>,
    property_type: Option<PropertyType>,
    /// Comma-separated feature list
    features: Option<String>,
    q: Option<String>,
}

impl ListingParams {
    fn filter(&self) -> ListingFilter {
        ListingFilter {
            min_price: self.min_price,
            max_price: self.max_price,
            min_beds: self.min_beds,
            min_baths: self.min_baths,
            min_area_sqft: None,
            max_area_sqft: None,
            property_types: self.property_type.map(|t| vec![t]).unwrap_or_default(),
            features: self
                .features
                .as_deref()
                .map(|f| {
                    f.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            query: self.q.clone(),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/mortgage - Monthly payment quote
async fn get_mortgage(Query(params): Query<MortgageParams>) -> impl IntoResponse {
    match mortgage::calculate(&params.inputs()) {
        Ok(quote) => (StatusCode::OK, Json(ApiResponse::ok(quote))).into_response(),
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<MortgageQuote>::invalid(&errors)),
        )
            .into_response(),
    }
}

/// GET /api/affordability - Maximum home price estimate
async fn get_affordability(Query(params): Query<AffordabilityParams>) -> impl IntoResponse {
    let policy = params.policy.unwrap_or(DebtServicePolicy::GdsAndTds);

    match affordability::calculate(&params.inputs(), policy) {
        Ok(estimate) => (StatusCode::OK, Json(ApiResponse::ok(estimate))).into_response(),
        Err(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<AffordabilityEstimate>::invalid(&errors)),
        )
            .into_response(),
    }
}

/// GET /api/listings - Filtered inventory
async fn get_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> impl IntoResponse {
    let matches: Vec<Listing> = state
        .book
        .filter(&params.filter())
        .into_iter()
        .cloned()
        .collect();

    (StatusCode::OK, Json(ApiResponse::ok(matches))).into_response()
}

/// GET /api/listings/:id - Single listing
async fn get_listing(State(state): State<AppState>, Path(id): Path<u32>) -> impl IntoResponse {
    match state.book.get(id) {
        Some(listing) => (StatusCode::OK, Json(ApiResponse::ok(listing.clone()))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Listing>::not_found(format!(
                "No listing with id {}",
                id
            ))),
        )
            .into_response(),
    }
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Homefront - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = MlsConfig::load_or_default("homefront.json").unwrap_or_default();

    let book = match config.listings_path {
        Some(ref path) if path.exists() => match ListingBook::from_file(path) {
            Ok(book) => {
                println!("✓ Loaded {} listings from {:?}", book.len(), path);
                book
            }
            Err(e) => {
                eprintln!("❌ Failed to load listings: {}", e);
                std::process::exit(1);
            }
        },
        _ => {
            println!("✓ Using sample inventory");
            ListingBook::sample()
        }
    };

    let state = AppState {
        book: Arc::new(book),
        config: Arc::new(config),
    };

    if !state.config.is_configured() {
        println!("  (MLS credentials not configured; live sync unavailable)");
    }

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/mortgage", get(get_mortgage))
        .route("/affordability", get(get_affordability))
        .route("/listings", get(get_listings))
        .route("/listings/:id", get(get_listing))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/listings");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
