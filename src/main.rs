use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::env;
use std::path::Path;

use homefront::{
    affordability, format_currency, format_currency_cents, listings::ListingBook,
    mortgage, parse_currency, schedule, AffordabilityInputs, DebtServicePolicy,
    ListingFilter, MlsConfig, MortgageInputs, ValidationError,
};

const CONFIG_PATH: &str = "homefront.json";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("mortgage") => run_mortgage(&args[2..]),
        Some("afford") => run_afford(&args[2..]),
        Some("schedule") => run_schedule(&args[2..]),
        Some("listings") => run_listings(&args[2..]),
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
        None => run_ui_mode(),
    }
}

fn print_usage() {
    println!("homefront {} - home buying toolkit", homefront::VERSION);
    println!();
    println!("Usage:");
    println!("  homefront                                      interactive UI");
    println!("  homefront mortgage <price> <down> <rate> <years>");
    println!("  homefront afford <income> <debts> <down> <rate> <years> [--gds-only|--gds-tds]");
    println!("  homefront schedule <price> <down> <rate> <years> [out.csv]");
    println!("  homefront listings [file.json]");
    println!();
    println!("Amounts accept formatted input: 500,000 and $500,000 both work.");
}

fn report_errors(errors: &[ValidationError]) -> ! {
    eprintln!("❌ Invalid inputs:");
    for err in errors {
        eprintln!("   {}", err);
    }
    std::process::exit(1);
}

fn parse_term(arg: &str) -> Result<u32> {
    arg.parse::<u32>()
        .map_err(|_| anyhow!("Loan term must be a whole number of years, got '{}'", arg))
}

fn run_mortgage(args: &[String]) -> Result<()> {
    if args.len() < 4 {
        return Err(anyhow!(
            "Usage: homefront mortgage <price> <down> <rate> <years>"
        ));
    }

    let inputs = MortgageInputs {
        home_price: parse_currency(&args[0]),
        down_payment: parse_currency(&args[1]),
        interest_rate: parse_currency(&args[2]),
        loan_term_years: parse_term(&args[3])?,
    };

    let quote = match mortgage::calculate(&inputs) {
        Ok(quote) => quote,
        Err(errors) => report_errors(&errors),
    };

    println!("🏠 Mortgage Payment Estimate");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Home Price:     {}", format_currency(inputs.home_price));
    println!(
        "  Down Payment:   {} ({:.1}%)",
        format_currency(inputs.down_payment),
        quote.down_payment_pct
    );
    println!("  Loan Amount:    {}", format_currency(quote.principal));
    println!("  Interest Rate:  {:.2}%", inputs.interest_rate);
    println!("  Loan Term:      {} years", inputs.loan_term_years);
    println!();
    println!(
        "  Monthly Payment: {} per month",
        format_currency_cents(quote.monthly_payment)
    );
    println!("  Total Paid:      {}", format_currency(quote.total_paid));
    println!(
        "  Total Interest:  {}",
        format_currency(quote.total_interest)
    );

    Ok(())
}

fn run_afford(args: &[String]) -> Result<()> {
    if args.len() < 5 {
        return Err(anyhow!(
            "Usage: homefront afford <income> <debts> <down> <rate> <years> [--gds-only|--gds-tds]"
        ));
    }

    let policy = match args.get(5).map(String::as_str) {
        Some("--gds-only") => DebtServicePolicy::GdsOnly,
        Some("--gds-tds") | None => DebtServicePolicy::GdsAndTds,
        Some(other) => return Err(anyhow!("Unknown policy flag: {}", other)),
    };

    let inputs = AffordabilityInputs {
        annual_income: parse_currency(&args[0]),
        monthly_debts: parse_currency(&args[1]),
        down_payment: parse_currency(&args[2]),
        interest_rate: parse_currency(&args[3]),
        loan_term_years: parse_term(&args[4])?,
    };

    let estimate = match affordability::calculate(&inputs, policy) {
        Ok(estimate) => estimate,
        Err(errors) => report_errors(&errors),
    };

    println!("🧮 Home Buying Power ({})", policy.name());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "  Annual Income:   {}",
        format_currency(inputs.annual_income)
    );
    println!(
        "  Monthly Debts:   {}",
        format_currency(inputs.monthly_debts)
    );
    println!("  Down Payment:    {}", format_currency(inputs.down_payment));
    println!("  Interest Rate:   {:.2}%", inputs.interest_rate);
    println!("  Loan Term:       {} years", inputs.loan_term_years);
    println!();
    println!(
        "  Monthly Budget:  {}",
        format_currency_cents(estimate.max_monthly_payment)
    );
    println!(
        "  Mortgage:        {}",
        format_currency(estimate.affordable_mortgage)
    );
    println!(
        "  Max Home Price:  {}",
        format_currency(estimate.max_price)
    );

    Ok(())
}

fn run_schedule(args: &[String]) -> Result<()> {
    if args.len() < 4 {
        return Err(anyhow!(
            "Usage: homefront schedule <price> <down> <rate> <years> [out.csv]"
        ));
    }

    let inputs = MortgageInputs {
        home_price: parse_currency(&args[0]),
        down_payment: parse_currency(&args[1]),
        interest_rate: parse_currency(&args[2]),
        loan_term_years: parse_term(&args[3])?,
    };

    // First payment lands on the first of next month
    let today = Local::now().date_naive();
    let first_payment = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .unwrap_or(today)
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(today);

    let rows = match schedule::build(&inputs, first_payment) {
        Ok(rows) => rows,
        Err(errors) => report_errors(&errors),
    };

    let out_path = args
        .get(4)
        .map(String::as_str)
        .unwrap_or("amortization.csv");

    schedule::write_csv_file(&rows, out_path)?;

    println!("📅 Amortization schedule written");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Payments:  {}", rows.len());
    println!("  First due: {}", rows[0].date);
    println!("  Last due:  {}", rows[rows.len() - 1].date);
    println!("  File:      {}", out_path);

    Ok(())
}

fn run_listings(args: &[String]) -> Result<()> {
    let book = match args.first() {
        Some(path) => ListingBook::from_file(path)?,
        None => load_book_from_config()?,
    };

    let matches = book.filter(&ListingFilter::default());

    println!("🏘️  Listings ({})", matches.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for listing in matches {
        let mut flags = String::new();
        if listing.is_featured {
            flags.push_str(" [FEATURED]");
        }
        if listing.is_new {
            flags.push_str(" [NEW]");
        }

        println!(
            "  {:<12} {}{}",
            format_currency(listing.price),
            listing.title,
            flags
        );
        println!(
            "               {} · {} bd · {:.1} ba · {} sqft",
            listing.address, listing.bedrooms, listing.bathrooms, listing.area_sqft
        );
    }

    Ok(())
}

fn load_book_from_config() -> Result<ListingBook> {
    let config = MlsConfig::load_or_default(CONFIG_PATH)?;

    match config.listings_path {
        Some(ref path) if Path::new(path).exists() => ListingBook::from_file(path),
        _ => Ok(ListingBook::sample()),
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let book = load_book_from_config()?;

    println!("🖥️  Loading Homefront UI...");
    println!("✓ {} listings loaded", book.len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = homefront::ui::App::new(book);
    homefront::ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the web UI: cargo run --bin homefront-server --features server");
    std::process::exit(1);
}
