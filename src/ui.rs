use crate::affordability::{self, AffordabilityInputs, DebtServicePolicy};
use crate::listings::{Listing, ListingBook, ListingFilter, PropertyType};
use crate::money::{format_currency, format_currency_cents};
use crate::mortgage::{self, MortgageInputs};
use crate::validate::ValidationError;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Listings,
    Mortgage,
    Affordability,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Listings => Page::Mortgage,
            Page::Mortgage => Page::Affordability,
            Page::Affordability => Page::Listings,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Listings => Page::Affordability,
            Page::Mortgage => Page::Listings,
            Page::Affordability => Page::Mortgage,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Listings => "Listings",
            Page::Mortgage => "Mortgage Calculator",
            Page::Affordability => "Affordability Calculator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MortgageField {
    HomePrice,
    DownPayment,
    InterestRate,
    LoanTerm,
}

impl MortgageField {
    const ALL: [MortgageField; 4] = [
        MortgageField::HomePrice,
        MortgageField::DownPayment,
        MortgageField::InterestRate,
        MortgageField::LoanTerm,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffordField {
    AnnualIncome,
    MonthlyDebts,
    DownPayment,
    InterestRate,
    LoanTerm,
}

impl AffordField {
    const ALL: [AffordField; 5] = [
        AffordField::AnnualIncome,
        AffordField::MonthlyDebts,
        AffordField::DownPayment,
        AffordField::InterestRate,
        AffordField::LoanTerm,
    ];
}

pub struct App {
    pub current_page: Page,

    // Mortgage page: down payment tracked as percent of price so changing
    // the price keeps the same percentage, the way the web slider behaves
    pub mortgage_price: f64,
    pub mortgage_down_pct: f64,
    pub mortgage_rate: f64,
    pub mortgage_term: u32,
    pub mortgage_field: usize,

    pub afford: AffordabilityInputs,
    pub afford_field: usize,
    pub policy: DebtServicePolicy,

    pub book: ListingBook,
    pub filter: ListingFilter,
    pub filtered: Vec<Listing>,
    pub state: TableState,
    pub show_detail: bool,
}

impl App {
    pub fn new(book: ListingBook) -> Self {
        let mut state = TableState::default();
        if !book.is_empty() {
            state.select(Some(0));
        }

        let filtered = book
            .filter(&ListingFilter::default())
            .into_iter()
            .cloned()
            .collect();

        Self {
            current_page: Page::Mortgage,
            mortgage_price: 500000.0,
            mortgage_down_pct: 20.0,
            mortgage_rate: 5.0,
            mortgage_term: 25,
            mortgage_field: 0,
            afford: AffordabilityInputs {
                annual_income: 100000.0,
                monthly_debts: 500.0,
                down_payment: 50000.0,
                interest_rate: 5.0,
                loan_term_years: 25,
            },
            afford_field: 0,
            policy: DebtServicePolicy::GdsAndTds,
            book,
            filter: ListingFilter::default(),
            filtered,
            state,
            show_detail: false,
        }
    }

    pub fn mortgage_inputs(&self) -> MortgageInputs {
        MortgageInputs {
            home_price: self.mortgage_price,
            down_payment: (self.mortgage_down_pct / 100.0 * self.mortgage_price).round(),
            interest_rate: self.mortgage_rate,
            loan_term_years: self.mortgage_term,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn select_next_field(&mut self) {
        match self.current_page {
            Page::Mortgage => {
                self.mortgage_field = (self.mortgage_field + 1) % MortgageField::ALL.len();
            }
            Page::Affordability => {
                self.afford_field = (self.afford_field + 1) % AffordField::ALL.len();
            }
            Page::Listings => {}
        }
    }

    pub fn select_previous_field(&mut self) {
        match self.current_page {
            Page::Mortgage => {
                self.mortgage_field =
                    (self.mortgage_field + MortgageField::ALL.len() - 1) % MortgageField::ALL.len();
            }
            Page::Affordability => {
                self.afford_field =
                    (self.afford_field + AffordField::ALL.len() - 1) % AffordField::ALL.len();
            }
            Page::Listings => {}
        }
    }

    /// Step the selected input up or down, clamped to the slider bounds
    /// (rate 0-10 step 0.1, term 5-30 step 5, down payment 5-50%)
    pub fn adjust_field(&mut self, up: bool) {
        let sign = if up { 1.0 } else { -1.0 };

        match self.current_page {
            Page::Mortgage => match MortgageField::ALL[self.mortgage_field] {
                MortgageField::HomePrice => {
                    self.mortgage_price = (self.mortgage_price + sign * 10000.0).max(0.0);
                }
                MortgageField::DownPayment => {
                    self.mortgage_down_pct =
                        (self.mortgage_down_pct + sign * 1.0).clamp(5.0, 50.0);
                }
                MortgageField::InterestRate => {
                    // One decimal of precision, like the slider
                    let stepped = self.mortgage_rate + sign * 0.1;
                    self.mortgage_rate = ((stepped * 10.0).round() / 10.0).clamp(0.0, 10.0);
                }
                MortgageField::LoanTerm => {
                    let stepped = self.mortgage_term as i64 + if up { 5 } else { -5 };
                    self.mortgage_term = stepped.clamp(5, 30) as u32;
                }
            },
            Page::Affordability => match AffordField::ALL[self.afford_field] {
                AffordField::AnnualIncome => {
                    self.afford.annual_income =
                        (self.afford.annual_income + sign * 5000.0).max(0.0);
                }
                AffordField::MonthlyDebts => {
                    self.afford.monthly_debts =
                        (self.afford.monthly_debts + sign * 100.0).max(0.0);
                }
                AffordField::DownPayment => {
                    self.afford.down_payment =
                        (self.afford.down_payment + sign * 5000.0).max(0.0);
                }
                AffordField::InterestRate => {
                    let stepped = self.afford.interest_rate + sign * 0.1;
                    self.afford.interest_rate = ((stepped * 10.0).round() / 10.0).clamp(0.0, 10.0);
                }
                AffordField::LoanTerm => {
                    let stepped = self.afford.loan_term_years as i64 + if up { 5 } else { -5 };
                    self.afford.loan_term_years = stepped.clamp(5, 30) as u32;
                }
            },
            Page::Listings => {}
        }
    }

    pub fn toggle_policy(&mut self) {
        self.policy = match self.policy {
            DebtServicePolicy::GdsOnly => DebtServicePolicy::GdsAndTds,
            DebtServicePolicy::GdsAndTds => DebtServicePolicy::GdsOnly,
        };
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.state.selected().and_then(|i| self.filtered.get(i))
    }

    pub fn refresh_filter(&mut self) {
        self.filtered = self
            .book
            .filter(&self.filter)
            .into_iter()
            .cloned()
            .collect();

        if self.filtered.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn cycle_min_beds(&mut self) {
        self.filter.min_beds = match self.filter.min_beds {
            None => Some(1),
            Some(n) if n < 4 => Some(n + 1),
            Some(_) => None,
        };
        self.refresh_filter();
    }

    pub fn cycle_property_type(&mut self) {
        let next = match self.filter.property_types.first() {
            None => Some(PropertyType::House),
            Some(current) => {
                let idx = PropertyType::ALL
                    .iter()
                    .position(|t| t == current)
                    .unwrap_or(0);
                if idx + 1 < PropertyType::ALL.len() {
                    Some(PropertyType::ALL[idx + 1])
                } else {
                    None
                }
            }
        };

        self.filter.property_types = next.map(|t| vec![t]).unwrap_or_default();
        self.refresh_filter();
    }

    pub fn clear_filter(&mut self) {
        self.filter = ListingFilter::default();
        self.refresh_filter();
    }

    pub fn next_listing(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous_listing(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => app.next_page(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Enter if app.current_page == Page::Listings => app.toggle_detail(),
                KeyCode::Char('p') if app.current_page == Page::Affordability => {
                    app.toggle_policy()
                }
                KeyCode::Char('b') if app.current_page == Page::Listings => app.cycle_min_beds(),
                KeyCode::Char('t') if app.current_page == Page::Listings => {
                    app.cycle_property_type()
                }
                KeyCode::Char('c') if app.current_page == Page::Listings => app.clear_filter(),
                KeyCode::Down | KeyCode::Char('j') => {
                    if app.current_page == Page::Listings {
                        app.next_listing();
                    } else {
                        app.select_next_field();
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if app.current_page == Page::Listings {
                        app.previous_listing();
                    } else {
                        app.select_previous_field();
                    }
                }
                KeyCode::Right | KeyCode::Char('l') => app.adjust_field(true),
                KeyCode::Left | KeyCode::Char('h') => app.adjust_field(false),
                KeyCode::Home if app.current_page == Page::Listings => {
                    app.state.select(Some(0))
                }
                KeyCode::End if app.current_page == Page::Listings => {
                    if !app.filtered.is_empty() {
                        app.state.select(Some(app.filtered.len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Listings => {
            if app.show_detail {
                let content_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(chunks[1]);

                render_listings(f, content_chunks[0], app);
                render_listing_detail(f, content_chunks[1], app);
            } else {
                render_listings(f, chunks[1], app);
            }
        }
        Page::Mortgage => render_mortgage(f, chunks[1], app),
        Page::Affordability => render_affordability(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Listings, Page::Mortgage, Page::Affordability];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} listings", app.book.len()),
        Style::default().fg(Color::White),
    ));

    if app.filter.active_count() > 0 {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("{} filters", app.filter.active_count()),
            Style::default().fg(Color::Green),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn field_rows<'a>(fields: Vec<(String, String)>, selected: usize) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    for (i, (label, value)) in fields.into_iter().enumerate() {
        let marker = if i == selected { "→ " } else { "  " };
        let style = if i == selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<22}", marker, label), style),
            Span::styled(value, style),
        ]));
        lines.push(Line::from(""));
    }

    lines
}

fn render_mortgage(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let inputs = app.mortgage_inputs();

    let fields = vec![
        ("Home Price".to_string(), format_currency(inputs.home_price)),
        (
            format!("Down Payment ({:.1}%)", app.mortgage_down_pct),
            format_currency(inputs.down_payment),
        ),
        (
            "Interest Rate".to_string(),
            format!("{:.1}%", inputs.interest_rate),
        ),
        (
            "Loan Term".to_string(),
            format!("{} years", inputs.loan_term_years),
        ),
    ];

    let inputs_panel = Paragraph::new(field_rows(fields, app.mortgage_field)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Loan Inputs ")
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(inputs_panel, chunks[0]);

    let mut lines = vec![Line::from("")];
    match mortgage::calculate(&inputs) {
        Ok(quote) => {
            lines.push(Line::from(Span::styled(
                format!("   {}", format_currency_cents(quote.monthly_payment)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "   per month",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            lines.push(summary_line("Loan Amount", format_currency(quote.principal)));
            lines.push(summary_line(
                "Down Payment",
                format_currency(inputs.down_payment),
            ));
            lines.push(summary_line(
                "Interest Rate",
                format!("{:.1}%", inputs.interest_rate),
            ));
            lines.push(summary_line(
                "Loan Term",
                format!("{} years", inputs.loan_term_years),
            ));
            lines.push(summary_line(
                "Total Interest",
                format_currency(quote.total_interest),
            ));
            lines.push(summary_line("Total Paid", format_currency(quote.total_paid)));
        }
        Err(errors) => render_errors(&mut lines, &errors),
    }

    let result = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Monthly Payment Estimate ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(result, chunks[1]);
}

fn render_affordability(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let inputs = app.afford;

    let fields = vec![
        (
            "Annual Income".to_string(),
            format_currency(inputs.annual_income),
        ),
        (
            "Monthly Debts".to_string(),
            format_currency(inputs.monthly_debts),
        ),
        (
            "Down Payment".to_string(),
            format_currency(inputs.down_payment),
        ),
        (
            "Interest Rate".to_string(),
            format!("{:.1}%", inputs.interest_rate),
        ),
        (
            "Loan Term".to_string(),
            format!("{} years", inputs.loan_term_years),
        ),
    ];

    let inputs_panel = Paragraph::new(field_rows(fields, app.afford_field)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Finances — policy: {} ", app.policy.name()))
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(inputs_panel, chunks[0]);

    let mut lines = vec![Line::from("")];
    match affordability::calculate(&inputs, app.policy) {
        Ok(estimate) => {
            lines.push(Line::from(Span::styled(
                format!("   {}", format_currency(estimate.max_price)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "   maximum home price",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            lines.push(summary_line(
                "Monthly Budget",
                format_currency_cents(estimate.max_monthly_payment),
            ));
            lines.push(summary_line(
                "Mortgage",
                format_currency(estimate.affordable_mortgage),
            ));
            lines.push(summary_line(
                "Down Payment",
                format_currency(inputs.down_payment),
            ));
            lines.push(summary_line("Policy", estimate.policy.name().to_string()));
        }
        Err(errors) => render_errors(&mut lines, &errors),
    }

    let result = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Home Buying Power ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(result, chunks[1]);
}

fn summary_line<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("   {:<16}", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_errors(lines: &mut Vec<Line<'_>>, errors: &[ValidationError]) {
    lines.push(Line::from(Span::styled(
        "   Check your inputs:",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    for err in errors {
        lines.push(Line::from(Span::styled(
            format!("   • {}", err),
            Style::default().fg(Color::Red),
        )));
    }
}

fn render_listings(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Title", "Address", "Price", "Beds", "Baths", "Sqft", "Type"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered.iter().map(|listing| {
        let flag = if listing.is_featured {
            Color::Yellow
        } else if listing.is_new {
            Color::Green
        } else {
            Color::White
        };

        let cells = vec![
            Cell::from(truncate(&listing.title, 26)).style(Style::default().fg(flag)),
            Cell::from(truncate(&listing.address, 34)),
            Cell::from(format_currency(listing.price)).style(Style::default().fg(Color::Cyan)),
            Cell::from(listing.bedrooms.to_string()),
            Cell::from(format!("{:.1}", listing.bathrooms)),
            Cell::from(listing.area_sqft.to_string()),
            Cell::from(listing.property_type.as_str()),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Length(36),
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Properties ({}) ", app.filtered.len())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_listing_detail(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from("")];

    if let Some(listing) = app.selected_listing() {
        lines.push(Line::from(Span::styled(
            format!("  {}", listing.title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {}", listing.address)));
        lines.push(Line::from(""));
        lines.push(summary_line("Price", format_currency(listing.price)));
        lines.push(summary_line("Bedrooms", listing.bedrooms.to_string()));
        lines.push(summary_line(
            "Bathrooms",
            format!("{:.1}", listing.bathrooms),
        ));
        lines.push(summary_line("Area", format!("{} sqft", listing.area_sqft)));
        lines.push(summary_line(
            "Type",
            listing.property_type.as_str().to_string(),
        ));

        if let Some(ref mls) = listing.mls_number {
            lines.push(summary_line("MLS #", mls.clone()));
        }

        if !listing.features.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "   Features",
                Style::default().fg(Color::DarkGray),
            )));
            for feature in &listing.features {
                lines.push(Line::from(format!("   • {}", feature)));
            }
        }
    } else {
        lines.push(Line::from("  No listing selected"));
    }

    let detail = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Details ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(detail, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    match app.current_page {
        Page::Listings => {
            let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
            status_spans.push(Span::styled(
                format!(" Row: {}/{} ", selected, app.filtered.len()),
                Style::default().fg(Color::Cyan),
            ));
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Details | "));
            status_spans.push(Span::styled("b", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Beds | "));
            status_spans.push(Span::styled("t", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Type | "));
            status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Clear | "));
        }
        Page::Mortgage => {
            status_spans.push(Span::styled(
                " ↑/↓ Field  ←/→ Adjust ",
                Style::default().fg(Color::Cyan),
            ));
            status_spans.push(Span::raw("| "));
        }
        Page::Affordability => {
            status_spans.push(Span::styled(
                " ↑/↓ Field  ←/→ Adjust ",
                Style::default().fg(Color::Cyan),
            ));
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled("p", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Policy | "));
        }
    }

    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Listings.next(), Page::Mortgage);
        assert_eq!(Page::Mortgage.next(), Page::Affordability);
        assert_eq!(Page::Affordability.next(), Page::Listings);
        assert_eq!(Page::Listings.previous(), Page::Affordability);
    }

    #[test]
    fn test_adjust_rate_respects_bounds() {
        let mut app = App::new(ListingBook::sample());
        app.current_page = Page::Mortgage;
        app.mortgage_field = 2; // interest rate
        app.mortgage_rate = 0.0;

        app.adjust_field(false);
        assert_eq!(app.mortgage_rate, 0.0);

        app.mortgage_rate = 10.0;
        app.adjust_field(true);
        assert_eq!(app.mortgage_rate, 10.0);
    }

    #[test]
    fn test_adjust_term_steps_by_five() {
        let mut app = App::new(ListingBook::sample());
        app.current_page = Page::Mortgage;
        app.mortgage_field = 3; // loan term
        app.mortgage_term = 25;

        app.adjust_field(true);
        assert_eq!(app.mortgage_term, 30);
        app.adjust_field(true);
        assert_eq!(app.mortgage_term, 30);
        app.adjust_field(false);
        assert_eq!(app.mortgage_term, 25);
    }

    #[test]
    fn test_price_change_keeps_down_payment_percentage() {
        let mut app = App::new(ListingBook::sample());
        app.current_page = Page::Mortgage;
        app.mortgage_field = 0; // home price

        let pct_before = app.mortgage_down_pct;
        app.adjust_field(true);
        assert_eq!(app.mortgage_down_pct, pct_before);

        let inputs = app.mortgage_inputs();
        assert_eq!(
            inputs.down_payment,
            (pct_before / 100.0 * inputs.home_price).round()
        );
    }

    #[test]
    fn test_beds_filter_cycles_back_to_none() {
        let mut app = App::new(ListingBook::sample());
        for expected in [Some(1), Some(2), Some(3), Some(4), None] {
            app.cycle_min_beds();
            assert_eq!(app.filter.min_beds, expected);
        }
        assert_eq!(app.filtered.len(), app.book.len());
    }

    #[test]
    fn test_policy_toggle() {
        let mut app = App::new(ListingBook::sample());
        assert_eq!(app.policy, DebtServicePolicy::GdsAndTds);
        app.toggle_policy();
        assert_eq!(app.policy, DebtServicePolicy::GdsOnly);
    }
}
