use anyhow::{bail, Context, Result};
use browse::{load_catalog, BrowseConfig, BrowseSession, CourseSource, JsonFileSource, SeedSource};
use catalog::{Catalog, Level};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use discovery::{DurationBucket, FilterPipeline, FilterState, Page, Pagination, PriceTier, SortBy};
use rand::Rng;
use search::{QueryMatcher, SearchPanel};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// coursectl - browse, filter and search a course catalog
#[derive(Parser)]
#[command(name = "coursectl")]
#[command(about = "Course discovery: filter, sort, page and search a course catalog", long_about = None)]
struct Cli {
    /// JSON file of course rows; the bundled seed catalog is used when omitted
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List courses, the way the Courses view shows them
    Courses {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show (1-indexed)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Override the page size (COURSES_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<NonZeroUsize>,
    },

    /// Search courses by title, description or instructor
    Search {
        /// Free-text query
        query: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show (1-indexed)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Override the page size (SEARCH_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<NonZeroUsize>,
    },

    /// Type a query into the search box and show the suggestion panel
    Suggest {
        query: String,

        /// Override the suggestions per group (SUGGESTION_LIMIT)
        #[arg(long)]
        limit: Option<NonZeroUsize>,

        /// Override the debounce in milliseconds (SEARCH_DEBOUNCE_MS)
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Run random filter states through the pipeline and report latency
    Benchmark {
        /// Number of pipeline runs
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of runs in flight at once
        #[arg(long, default_value = "8")]
        concurrent: usize,
    },
}

/// Filter dimensions shared by `courses` and `search`.
#[derive(Args)]
struct FilterArgs {
    /// Minimum rating, inclusive (0 disables)
    #[arg(long, default_value = "0")]
    min_rating: f64,

    /// Duration bucket: 0-1h, 1-3h, 3-6h, 6-17h, 17h+ (repeatable)
    #[arg(long)]
    duration: Vec<DurationBucket>,

    /// Level: all-levels, beginner, intermediate, expert (repeatable)
    #[arg(long)]
    level: Vec<Level>,

    /// Category name (repeatable)
    #[arg(long)]
    category: Vec<String>,

    /// Price tier: free, paid (repeatable)
    #[arg(long)]
    price: Vec<PriceTier>,

    /// Language (repeatable)
    #[arg(long)]
    language: Vec<String>,

    /// Sort order: newest, highest-rated
    #[arg(long, default_value = "newest")]
    sort: SortBy,
}

impl FilterArgs {
    fn to_state(&self) -> FilterState {
        let mut state = FilterState::new()
            .with_rating(self.min_rating)
            .with_sort(self.sort);
        for bucket in &self.duration {
            state = state.with_duration(*bucket);
        }
        for level in &self.level {
            state = state.with_level(*level);
        }
        for category in &self.category {
            state = state.with_category(category.as_str());
        }
        for tier in &self.price {
            state = state.with_price(*tier);
        }
        for language in &self.language {
            state = state.with_language(language.as_str());
        }
        state
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = BrowseConfig::from_env().context("Failed to read configuration")?;

    let start = Instant::now();
    let source: Box<dyn CourseSource> = match &cli.catalog {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(SeedSource),
    };
    let catalog = load_catalog(source.as_ref()).await;
    println!(
        "{} Loaded {} courses in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Courses {
            filters,
            page,
            page_size,
        } => {
            let config = match page_size {
                Some(size) => config.with_courses_page_size(size),
                None => config,
            };
            let mut session = BrowseSession::courses(catalog, &config);
            session.set_filters(filters.to_state());
            handle_page(&mut session, page, "Courses")
        }
        Commands::Search {
            query,
            filters,
            page,
            page_size,
        } => {
            let config = match page_size {
                Some(size) => config.with_search_page_size(size),
                None => config,
            };
            let heading = format!("Search results for '{}'", query);
            let mut session = BrowseSession::search(catalog, query, &config);
            session.set_filters(filters.to_state());
            handle_page(&mut session, page, &heading)
        }
        Commands::Suggest {
            query,
            limit,
            debounce_ms,
        } => {
            let mut config = config;
            if let Some(limit) = limit {
                config = config.with_suggestion_limit(limit);
            }
            if let Some(ms) = debounce_ms {
                if ms == 0 {
                    bail!("--debounce-ms must be greater than zero");
                }
                config = config.with_debounce(Duration::from_millis(ms));
            }
            handle_suggest(catalog, &config, &query).await
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(catalog, &config, requests, concurrent).await,
    }
}

/// Handle the 'courses' and 'search' commands
fn handle_page(session: &mut BrowseSession, page: usize, heading: &str) -> Result<()> {
    if page != 1 && !session.go_to_page(page) {
        bail!(
            "Page {} is out of range (1-{})",
            page,
            session.current_page().total_pages
        );
    }
    print_page(&session.current_page(), session.page_size(), heading);
    Ok(())
}

/// Handle the 'suggest' command
///
/// Feeds the query into the search box one keystroke at a time, waits out
/// the debounce and prints whatever the panel shows.
async fn handle_suggest(catalog: Arc<Catalog>, config: &BrowseConfig, query: &str) -> Result<()> {
    let matcher = Arc::new(QueryMatcher::new(catalog, config.suggestion_limit.get()));
    let panel = SearchPanel::new(matcher, config.debounce);

    let mut typed = String::new();
    for ch in query.chars() {
        typed.push(ch);
        panel.input(&typed);
    }
    tokio::time::sleep(config.debounce + Duration::from_millis(50)).await;

    let snapshot = panel.snapshot();
    if !snapshot.open || snapshot.suggestions.is_empty() {
        println!("{}", format!("No suggestions for '{}'", query).yellow());
        return Ok(());
    }

    let suggestions = &snapshot.suggestions;
    println!("{}", format!("Suggestions for '{}':", query).bold().blue());
    if !suggestions.courses.is_empty() {
        println!("{}", "Courses".bold());
        for course in &suggestions.courses {
            println!("  {} {} ({})", "•".green(), course.title, course.id);
        }
    }
    if !suggestions.instructors.is_empty() {
        println!("{}", "Instructors".bold());
        for instructor in &suggestions.instructors {
            println!("  {} {}", "•".cyan(), instructor.name);
        }
    }
    if !suggestions.categories.is_empty() {
        println!("{}", "Categories".bold());
        for category in &suggestions.categories {
            println!("  {} {}", "•".magenta(), category);
        }
    }

    if let Some(navigation) = panel.submit() {
        println!("Press Enter to open: /search?q={}", navigation.query);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    catalog: Arc<Catalog>,
    config: &BrowseConfig,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("--requests and --concurrent must be greater than zero");
    }

    // Random states up front: the thread-local rng must stay on this thread
    let states: Vec<FilterState> = {
        let mut rng = rand::rng();
        let categories: Vec<String> = catalog.categories().map(str::to_string).collect();
        (0..requests)
            .map(|_| random_state(&mut rng, &categories))
            .collect()
    };

    let pipeline = Arc::new(FilterPipeline::standard());
    let semaphore = Arc::new(Semaphore::new(concurrent));
    let page_size = config.courses_page_size;
    let wall_clock = Instant::now();

    let mut handles = Vec::with_capacity(requests);
    for state in states {
        let permit = semaphore.clone().acquire_owned().await?;
        let catalog = catalog.clone();
        let pipeline = pipeline.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            let page = pipeline.run(
                catalog.courses().iter().collect(),
                &state,
                &Pagination::new(page_size),
            );
            (start.elapsed(), page.total_items)
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    let mut matched = 0usize;
    for handle in handles {
        let (elapsed, total_items) = handle.await.context("Benchmark task panicked")?;
        timings.push(elapsed);
        matched += total_items;
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let busy: Duration = timings.iter().sum();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Catalog size: {} courses", catalog.len());
    println!("Runs: {} ({} in flight)", requests, concurrent);
    println!("Average matches per run: {:.1}", matched as f64 / requests as f64);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", busy / requests as u32);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} runs/second",
        requests as f64 / total_time.as_secs_f64()
    );
    Ok(())
}

fn random_state(rng: &mut impl Rng, categories: &[String]) -> FilterState {
    let mut state = FilterState::new().with_rating(rng.random_range(0..=9) as f64 * 0.5);

    for bucket in DurationBucket::ALL {
        if rng.random_bool(0.3) {
            state = state.with_duration(bucket);
        }
    }
    for level in Level::ALL {
        if rng.random_bool(0.25) {
            state = state.with_level(level);
        }
    }
    if !categories.is_empty() && rng.random_bool(0.5) {
        state = state.with_category(categories[rng.random_range(0..categories.len())].as_str());
    }
    if rng.random_bool(0.3) {
        state = state.with_price(if rng.random_bool(0.5) { PriceTier::Free } else { PriceTier::Paid });
    }
    if rng.random_bool(0.5) {
        state = state.with_sort(SortBy::HighestRated);
    }
    state
}

/// Helper function to format and print a page of courses
fn print_page(page: &Page<'_>, page_size: NonZeroUsize, heading: &str) {
    println!("{}", format!("{}:", heading).bold().blue());
    if page.is_empty() {
        println!("{}", "No courses match the selected filters".yellow());
        return;
    }

    let offset = (page.page - 1) * page_size.get();
    for (i, course) in page.items.iter().enumerate() {
        let price = if course.is_free() {
            "Free".green().to_string()
        } else {
            format!("${:.2}", course.price)
        };
        println!(
            "{}. {} [{}] {} - {:.1}★ {}h {} - {}",
            (offset + i + 1).to_string().green(),
            course.title.bold(),
            course.category,
            course.level,
            course.rating,
            course.duration_hours,
            price,
            course.instructor.name
        );
    }
    println!(
        "Page {} of {} ({} courses)",
        page.page, page.total_pages, page.total_items
    );
}
