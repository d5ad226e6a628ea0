// ============================================================================
// game-catalog - terminal front end for the game catalog
// ============================================================================
// Usage:
//   game-catalog list [QUERY] [--category C] [--platform P] [--sort KEY]
//   game-catalog show <SLUG>               Show a game and record the view
//   game-catalog favorite <ID>             Toggle a favorite
//   game-catalog favorites                 List favorites
//   game-catalog recent                    List recently viewed games
//   game-catalog clear-recent              Forget recently viewed games
//   game-catalog compare <ID>...           Compare up to three games
//   game-catalog recommend [--limit N]     Suggestions from favorite categories
//   game-catalog export                    Dump stored state as JSON
// ============================================================================

use std::path::PathBuf;

use anyhow::Result;
use catalog_core::{
    CatalogConfig, CatalogSession, Category, CompareToggle, ComparisonTable, DetailPage,
    FilterCriteria, Game, Intent, Outcome, SortKey, FAVORITES_KEY, RECENTLY_VIEWED_KEY,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Game catalog browser
#[derive(Parser)]
#[command(name = "game-catalog", version, about = "Search, favorite and compare games")]
struct Cli {
    /// Path to the storage database (default: ~/.game-catalog/catalog.redb)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Catalog JSON file to use instead of the bundled games
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Keep favorites and history in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List games matching a search and filters
    List {
        /// Case-insensitive text matched against title, description, developer
        query: Option<String>,

        /// Restrict to a category (repeatable): action-rpg, action-adventure
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Minimum rating (0-10)
        #[arg(long, default_value = "0", value_parser = parse_min_rating)]
        min_rating: f64,

        /// Require one of these platforms (repeatable)
        #[arg(long = "platform")]
        platforms: Vec<String>,

        /// Sort order: rating, title, releaseDate, developer
        #[arg(long, default_value = "rating")]
        sort: String,

        /// Only show favorites
        #[arg(long)]
        favorites_only: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a game's detail page and record it as recently viewed
    Show { slug: String },

    /// Toggle a game in the favorites list
    Favorite { id: String },

    /// List favorite games
    Favorites,

    /// List recently viewed games, newest first
    Recent,

    /// Forget recently viewed games
    ClearRecent,

    /// Compare up to three games side by side
    Compare {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Suggest games from the categories of your favorites
    Recommend {
        #[arg(long, default_value = "3")]
        limit: usize,
    },

    /// Export stored favorites and history as JSON
    Export,
}

fn parse_category(s: &str) -> Result<Category> {
    Category::from_str(s).ok_or_else(|| {
        let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        anyhow::anyhow!("Unknown category '{}'. Valid values: {}", s, valid.join(", "))
    })
}

fn parse_min_rating(s: &str) -> Result<f64, String> {
    let rating: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(0.0..=10.0).contains(&rating) {
        return Err(format!("rating must be between 0 and 10, got {}", s));
    }
    Ok(rating)
}

fn parse_sort(s: &str) -> Result<SortKey> {
    SortKey::from_str(s).ok_or_else(|| {
        let valid: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
        anyhow::anyhow!("Unknown sort '{}'. Valid values: {}", s, valid.join(", "))
    })
}

fn init_logging(config: &CatalogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directives()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = CatalogConfig::from_env();
    if cli.db_path.is_some() {
        config.db_path = cli.db_path.clone();
    }
    if cli.data.is_some() {
        config.data_path = cli.data.clone();
    }
    config.ephemeral = cli.ephemeral;

    init_logging(&config);
    if let Err(e) = dotenv {
        debug!("No .env loaded: {}", e);
    }

    let catalog = config.load_catalog()?;
    let store = config.open_store()?;
    let mut session = CatalogSession::new(catalog, store);
    session.dispatch(Intent::Hydrated);

    match cli.command {
        Commands::List {
            query,
            categories,
            min_rating,
            platforms,
            sort,
            favorites_only,
            json,
        } => {
            let filters = FilterCriteria {
                categories: categories
                    .iter()
                    .map(|c| parse_category(c))
                    .collect::<Result<_>>()?,
                min_rating,
                platforms,
                release_year: String::new(),
            };
            session.dispatch(Intent::SetQuery(query.unwrap_or_default()));
            session.dispatch(Intent::SetFilters(filters));
            session.dispatch(Intent::SetSort(parse_sort(&sort)?));
            session.dispatch(Intent::SetFavoritesOnly(favorites_only));
            cmd_list(&session, json)
        }
        Commands::Show { slug } => cmd_show(&mut session, slug),
        Commands::Favorite { id } => cmd_favorite(&mut session, id),
        Commands::Favorites => {
            session.dispatch(Intent::SetFavoritesOnly(true));
            cmd_list(&session, false)
        }
        Commands::Recent => cmd_recent(&session),
        Commands::ClearRecent => {
            match session.dispatch(Intent::ClearRecentlyViewed) {
                Outcome::Updated => println!("Recently viewed games cleared."),
                _ => println!("No recently viewed games to clear."),
            }
            Ok(())
        }
        Commands::Compare { ids } => cmd_compare(&mut session, ids),
        Commands::Recommend { limit } => cmd_recommend(&session, limit),
        Commands::Export => {
            let mut export = serde_json::Map::new();
            export.insert("exported_at".into(), Utc::now().to_rfc3339().into());
            export.insert(
                FAVORITES_KEY.into(),
                serde_json::to_value(session.favorites().ids())?,
            );
            export.insert(
                RECENTLY_VIEWED_KEY.into(),
                serde_json::to_value(session.recently_viewed())?,
            );
            println!("{}", serde_json::to_string_pretty(&export)?);
            Ok(())
        }
    }
}

fn print_games(session: &CatalogSession, games: &[&Game]) {
    println!(
        "{:<4}  {:<3}  {:<30}  {:<7}  {:<26}  {}",
        "ID", "FAV", "TITLE", "RATING", "DEVELOPER", "RELEASED"
    );
    println!("{}", "-".repeat(96));

    for game in games {
        let title: String = game.title.chars().take(30).collect();
        let developer: String = game.developer.chars().take(26).collect();
        println!(
            "{:<4}  {:<3}  {:<30}  {:<7}  {:<26}  {}",
            game.id,
            if session.is_favorite(&game.id) { "*" } else { "" },
            title,
            format!("{}/10", game.rating),
            developer,
            game.release_date
        );
    }
}

fn cmd_list(session: &CatalogSession, json: bool) -> Result<()> {
    let games = session.visible();

    if json {
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    if games.is_empty() {
        println!("No games found.");
        return Ok(());
    }

    print_games(session, &games);

    let query = session.query();
    println!(
        "\n{} of {} games, sorted by {}",
        games.len(),
        session.catalog().len(),
        query.sort.label()
    );
    if query.filters.has_active_filters() {
        println!("{} active filters", query.filters.active_filter_count());
    }
    Ok(())
}

fn cmd_show(session: &mut CatalogSession, slug: String) -> Result<()> {
    if session.dispatch(Intent::ViewGame(slug)) == Outcome::NotHydrated {
        warn!("Recently viewed list unavailable");
    }

    match session.current_detail() {
        Some(DetailPage::Found(detail)) => {
            println!("=== {} ===", detail.title);
            println!("{}\n", detail.image);
            for section in &detail.sections {
                println!("{}:", section.label);
                println!("  {}\n", section.value);
            }
            for stat in &detail.stats {
                println!("{:<13} {}", format!("{}:", stat.label), stat.value);
            }
            if !detail.expansions.is_empty() {
                println!("{:<13} {}", "Expansions:", detail.expansions.join(", "));
            }
            if session.is_favorite(&detail.id) {
                println!("\n* In your favorites");
            }
        }
        Some(DetailPage::NotFound { slug, back_href }) => {
            println!("Game not found: {}", slug);
            println!("Back to games: {}", back_href);
        }
        None => {}
    }
    Ok(())
}

fn cmd_favorite(session: &mut CatalogSession, id: String) -> Result<()> {
    match session.dispatch(Intent::ToggleFavorite(id)) {
        Outcome::Favorite { id, favorite } => {
            let title = session
                .catalog()
                .get(&id)
                .map(|g| g.title.as_str())
                .unwrap_or("?");
            if favorite {
                println!("Added {} to favorites", title);
            } else {
                println!("Removed {} from favorites", title);
            }
            Ok(())
        }
        Outcome::UnknownGame(id) => anyhow::bail!("No game with id '{}'", id),
        other => anyhow::bail!("Favorite not updated: {:?}", other),
    }
}

fn cmd_recent(session: &CatalogSession) -> Result<()> {
    let recent = session.recently_viewed();
    if recent.is_empty() {
        println!("No recently viewed games.");
        return Ok(());
    }
    let games: Vec<&Game> = recent.iter().collect();
    print_games(session, &games);
    Ok(())
}

fn cmd_compare(session: &mut CatalogSession, ids: Vec<String>) -> Result<()> {
    for id in ids {
        match session.dispatch(Intent::ToggleCompare(id)) {
            Outcome::Compare {
                id,
                change: CompareToggle::AtCapacity,
            } => warn!("Already comparing three games, skipping {}", id),
            Outcome::Compare {
                change: CompareToggle::Removed,
                id,
            } => debug!("{} listed twice, removed from comparison", id),
            Outcome::UnknownGame(id) => warn!("No game with id '{}'", id),
            _ => {}
        }
    }
    session.dispatch(Intent::OpenComparison);

    let table = session.comparison_table();
    if table.is_empty() {
        println!("{}", ComparisonTable::EMPTY_MESSAGE);
        println!("Add games to compare their features");
        return Ok(());
    }

    print!("{:<22}", "FEATURE");
    for title in &table.titles {
        let title: String = title.chars().take(28).collect();
        print!("  {:<28}", title);
    }
    println!();
    println!("{}", "-".repeat(22 + 30 * table.titles.len()));

    for row in &table.rows {
        print!("{:<22}", row.label);
        for value in &row.values {
            let value: String = value.chars().take(28).collect();
            print!("  {:<28}", value);
        }
        println!();
    }
    Ok(())
}

fn cmd_recommend(session: &CatalogSession, limit: usize) -> Result<()> {
    if session.favorites().is_empty() {
        println!("Favorite a few games to get recommendations.");
        return Ok(());
    }
    let picks = session.recommendations(limit);
    if picks.is_empty() {
        println!("No recommendations yet.");
        return Ok(());
    }
    print_games(session, &picks);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("action-rpg").unwrap(), Category::ActionRpg);
        let err = parse_category("racing").unwrap_err().to_string();
        assert!(err.contains("action-adventure"));
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("releaseDate").unwrap(), SortKey::ReleaseDate);
        assert!(parse_sort("newest").is_err());
    }

    #[test]
    fn test_min_rating_must_be_in_range() {
        assert_eq!(parse_min_rating("8.5").unwrap(), 8.5);
        assert_eq!(parse_min_rating("0").unwrap(), 0.0);
        assert_eq!(parse_min_rating("10").unwrap(), 10.0);
        assert!(parse_min_rating("-1").is_err());
        assert!(parse_min_rating("10.5").is_err());
        assert!(parse_min_rating("NaN").is_err());
        assert!(parse_min_rating("high").is_err());

        let rejected =
            Cli::try_parse_from(["game-catalog", "list", "--min-rating", "NaN"]);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_cli_parses_repeated_filters() {
        let cli = Cli::parse_from([
            "game-catalog",
            "list",
            "ring",
            "--category",
            "action-rpg",
            "--platform",
            "PC",
            "--platform",
            "Xbox One",
            "--sort",
            "title",
        ]);
        match cli.command {
            Commands::List {
                query,
                categories,
                platforms,
                sort,
                ..
            } => {
                assert_eq!(query.as_deref(), Some("ring"));
                assert_eq!(categories, vec!["action-rpg"]);
                assert_eq!(platforms, vec!["PC", "Xbox One"]);
                assert_eq!(sort, "title");
            }
            _ => panic!("expected list"),
        }
    }
}
