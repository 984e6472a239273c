use crate::{
    config::{PlannerConfig, PreferenceLimits},
    core::{PlanState, TripPlanner, TripSession},
    report::{
        export::{expense_rows, to_rows, write_csv, write_expense_csv},
        format::{category_label, format_currency},
        packing::{packing_list, seasonal_advice_for},
        BudgetOverview,
    },
    services::StaticBackend,
    types::preferences::{
        Companions, FoodPreference, Interest, TravelPreferences, TravelStyle,
    },
};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{fs::File, io::BufWriter, time::Duration};
use tracing::{info, warn};

/// CLI entry point for the trip planner
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();

    let prefs = preferences_from(&matches)?;
    let problems = PreferenceLimits::default().check(&prefs);
    if !problems.is_empty() {
        bail!("{}", problems.join("\n"));
    }

    let planner = planner_from(&matches)?;
    info!(
        destination = prefs.destination(),
        days = prefs.duration(),
        budget = prefs.budget(),
        "planning trip"
    );

    let mut session = TripSession::new();
    let mut state = session.plan(&planner, prefs).await;
    if let Some(multiplier) = matches.get_one::<f64>("budget-multiplier") {
        state = session.regenerate(&planner, *multiplier).await?;
    }

    if let Some(notice) = state.outcome.notice() {
        warn!("{}", notice);
    }

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&state.outcome.itinerary)?);
    } else {
        print_report(&state);
    }

    if matches.get_flag("packing-list") {
        print_packing(&state.preferences);
    }

    if let Some(path) = matches.get_one::<String>("csv") {
        let file = File::create(path).with_context(|| format!("creating {path}"))?;
        write_csv(&to_rows(&state.outcome.itinerary), BufWriter::new(file))?;
        info!("Itinerary written to {}", path);
    }

    if let Some(path) = matches.get_one::<String>("expenses") {
        let file = File::create(path).with_context(|| format!("creating {path}"))?;
        write_expense_csv(&expense_rows(&state.outcome.itinerary), BufWriter::new(file))?;
        info!("Expense breakdown written to {}", path);
    }

    Ok(())
}

fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan a trip itinerary with an LLM, falling back to a standard template")
        .arg(
            Arg::new("destination")
                .help("Where you are going, e.g. \"Paris, France\"")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("AMOUNT")
                .help("Total trip budget")
                .value_parser(value_parser!(f64))
                .default_value("2000"),
        )
        .arg(
            Arg::new("duration")
                .short('d')
                .long("duration")
                .value_name("DAYS")
                .help("Trip length in days")
                .value_parser(value_parser!(u32))
                .default_value("7"),
        )
        .arg(
            Arg::new("start-date")
                .short('s')
                .long("start-date")
                .value_name("YYYY-MM-DD")
                .help("First day of the trip (defaults to today)"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .value_name("STYLE")
                .help("budget, mid-range or luxury")
                .default_value("mid-range"),
        )
        .arg(
            Arg::new("food")
                .long("food")
                .value_name("PREFERENCE")
                .help("Dietary preference, e.g. vegetarian")
                .default_value("no restrictions"),
        )
        .arg(
            Arg::new("priority")
                .short('p')
                .long("priority")
                .value_name("INTEREST")
                .help("Interest to prioritise; repeat or comma-separate")
                .action(ArgAction::Append)
                .value_delimiter(','),
        )
        .arg(
            Arg::new("companions")
                .long("companions")
                .value_name("GROUP")
                .help("solo, couple, family or group")
                .default_value("solo"),
        )
        .arg(
            Arg::new("flexible")
                .long("flexible")
                .help("Budget can stretch if needed")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("budget-multiplier")
                .long("budget-multiplier")
                .value_name("FACTOR")
                .help("Regenerate with the budget scaled by FACTOR (0.5 to 2.0)")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model to use (or set TRIP_PLANNER_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL env vars)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("AI request timeout in seconds (or set TRIP_PLANNER_TIMEOUT_SECS)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Skip the AI service and use the standard template")
                .action(ArgAction::SetTrue)
                .conflicts_with("response-file"),
        )
        .arg(
            Arg::new("response-file")
                .long("response-file")
                .value_name("PATH")
                .help("Use a saved AI response instead of calling the service"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the itinerary as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .value_name("PATH")
                .help("Write the itinerary rows to a CSV file"),
        )
        .arg(
            Arg::new("expenses")
                .long("expenses")
                .value_name("PATH")
                .help("Write the expense breakdown to a CSV file"),
        )
        .arg(
            Arg::new("packing-list")
                .long("packing-list")
                .help("Print a packing list and seasonal advice")
                .action(ArgAction::SetTrue),
        )
}

fn preferences_from(matches: &ArgMatches) -> anyhow::Result<TravelPreferences> {
    let start_date = match matches.get_one::<String>("start-date") {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid start date `{raw}`"))?,
        None => chrono::Local::now().date_naive(),
    };

    let priorities = match matches.get_many::<String>("priority") {
        Some(values) => values
            .map(|value| value.parse::<Interest>())
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![Interest::LocalCulture],
    };

    let destination = matches
        .get_one::<String>("destination")
        .context("destination is required")?;

    let prefs = TravelPreferences::builder(destination.as_str(), start_date)
        .budget(*matches.get_one::<f64>("budget").context("budget is required")?)
        .duration(*matches.get_one::<u32>("duration").context("duration is required")?)
        .travel_style(string_arg(matches, "style")?.parse::<TravelStyle>()?)
        .food_preference(string_arg(matches, "food")?.parse::<FoodPreference>()?)
        .companions(string_arg(matches, "companions")?.parse::<Companions>()?)
        .priorities(priorities)
        .flexible_budget(matches.get_flag("flexible"))
        .build()?;

    Ok(prefs)
}

fn string_arg<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

fn planner_from(matches: &ArgMatches) -> anyhow::Result<TripPlanner> {
    let mut config = PlannerConfig::from_env()?;
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*seconds);
    }

    if matches.get_flag("offline") {
        return Ok(TripPlanner::new(StaticBackend::offline()).with_timeout(config.timeout));
    }

    if let Some(path) = matches.get_one::<String>("response-file") {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        return Ok(TripPlanner::new(StaticBackend::respond(text)).with_timeout(config.timeout));
    }

    if let Some(key) = matches.get_one::<String>("api-key") {
        config.api_key = Some(key.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }

    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);

    TripPlanner::from_config(&config)
        .context("API key is required. Set OPENAI_API_KEY, pass --api-key, or use --offline")
}

fn print_report(state: &PlanState) {
    let itinerary = &state.outcome.itinerary;
    let currency = itinerary.summary.currency.as_str();
    let overview = BudgetOverview::derive(itinerary, &state.preferences);

    println!("{}", state.outcome.summary());
    println!();
    println!("--- Budget ---");
    println!("Planned:        {}", format_currency(overview.planned_budget, currency));
    println!("Estimated:      {}", format_currency(overview.total_estimated_cost, currency));
    println!("Daily average:  {}", format_currency(overview.daily_average, currency));
    if overview.variance.is_over_budget {
        println!(
            "Over budget by  {}",
            format_currency(-overview.variance.variance, currency)
        );
    } else {
        println!(
            "Savings:        {} ({:.1}%)",
            format_currency(overview.variance.savings, currency),
            overview.variance.efficiency_percent
        );
    }
    for share in &overview.categories {
        println!(
            "  {:<16} {:>12} {:>6.1}%",
            category_label(share.category),
            format_currency(share.amount, currency),
            share.percent
        );
    }
}

fn print_packing(prefs: &TravelPreferences) {
    println!();
    println!("--- Packing list ---");
    for section in packing_list(prefs).sections {
        println!("{}: {}", section.name, section.items.join(", "));
    }

    let advice = seasonal_advice_for(prefs.start_date());
    println!();
    println!("--- Seasonal advice ---");
    println!("Clothing:   {}", advice.clothing);
    println!("Activities: {}", advice.activities);
    println!("Health:     {}", advice.health);
}
