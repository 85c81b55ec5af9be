//! assocrec CLI: association-rule movie recommendations from rating CSVs.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use assocrec::config::RecommenderConfig;
use assocrec::data::{
    build_catalog_transactions, parse_rating, read_ratings, Catalog, Rating, UserProfile,
    MAX_RATING, MIN_RATING,
};
use assocrec::mining::{ItemId, Itemset, UserId};
use assocrec::recommend::Recommendation;
use assocrec::RuleModel;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Search hits shown for an ambiguous title.
const SEARCH_LIMIT: usize = 5;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "assocrec")]
#[command(about = "Movie recommendations from association rules mined over user likes")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Ratings CSV (userId,movieId,rating[,timestamp])
    #[arg(long, default_value = "ratings.csv")]
    ratings: PathBuf,

    /// Movies CSV (movieId,title[,genres])
    #[arg(long, default_value = "movies.csv")]
    movies: PathBuf,
}

#[derive(Args)]
struct ThresholdArgs {
    /// TOML file with min_support, min_confidence and top_n
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum itemset support, overrides the config file
    #[arg(long)]
    min_support: Option<f64>,

    /// Minimum rule confidence, overrides the config file
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Recommendations per list, overrides the config file
    #[arg(long)]
    top_n: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Mine association rules and print the strongest ones
    Rules {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Number of rules to print
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Write every rule as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recommend movies from a user's likes
    Recommend {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Use the ratings of this user from the ratings file
        #[arg(long, conflicts_with = "like", required_unless_present = "like")]
        user: Option<UserId>,

        /// Rate a movie as TITLE=RATING or ID=RATING (repeatable, in order)
        #[arg(long, value_name = "MOVIE=RATING")]
        like: Vec<String>,
    },

    /// Find movies by title
    Search {
        /// Movies CSV (movieId,title[,genres])
        #[arg(long, default_value = "movies.csv")]
        movies: PathBuf,

        /// Part of the title, case-insensitive
        query: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Rules {
            data,
            thresholds,
            limit,
            output,
        } => cmd_rules(&data, &thresholds, limit, output.as_deref()),
        Commands::Recommend {
            data,
            thresholds,
            user,
            like,
        } => cmd_recommend(&data, &thresholds, user, &like),
        Commands::Search { movies, query } => cmd_search(&movies, &query),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(thresholds: &ThresholdArgs) -> CliResult<RecommenderConfig> {
    let mut config = match &thresholds.config {
        Some(path) => RecommenderConfig::read_toml_file(path)?,
        None => RecommenderConfig::default(),
    };
    if let Some(min_support) = thresholds.min_support {
        config = config.with_min_support(min_support);
    }
    if let Some(min_confidence) = thresholds.min_confidence {
        config = config.with_min_confidence(min_confidence);
    }
    if let Some(top_n) = thresholds.top_n {
        config = config.with_top_n(top_n);
    }
    config.validate()?;
    Ok(config)
}

fn build_model(
    data: &DataArgs,
    thresholds: &ThresholdArgs,
) -> CliResult<(Catalog, Vec<Rating>, RuleModel)> {
    let config = load_config(thresholds)?;
    let catalog = Catalog::read(&data.movies)?;
    let ratings = read_ratings(&data.ratings)?;
    let transactions = build_catalog_transactions(&ratings, &catalog);

    let start = Instant::now();
    let model = RuleModel::build(&transactions, config)?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "mining finished"
    );
    Ok((catalog, ratings, model))
}

fn cmd_rules(
    data: &DataArgs,
    thresholds: &ThresholdArgs,
    limit: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    let (catalog, _, model) = build_model(data, thresholds)?;
    let config = model.config();

    println!("Association Rules");
    println!("=================");
    println!("Min support:      {:.3}", config.min_support);
    println!("Min confidence:   {:.3}", config.min_confidence);
    println!("Frequent itemsets: {}", model.support_table().len());
    println!("Rules:            {}", model.rules().len());
    println!();

    for rule in model.rules().iter().take(limit) {
        println!(
            " - {} => {} (conf: {:.2}, sup: {:.2}, lift: {:.2})",
            titles(&catalog, &rule.antecedent),
            titles(&catalog, &rule.consequent),
            rule.confidence,
            rule.support,
            rule.lift
        );
    }

    if let Some(path) = output {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, model.rules())?;
        println!();
        println!("Rules saved:      {}", path.display());
    }

    Ok(())
}

fn cmd_recommend(
    data: &DataArgs,
    thresholds: &ThresholdArgs,
    user: Option<UserId>,
    likes: &[String],
) -> CliResult<()> {
    let (catalog, ratings, model) = build_model(data, thresholds)?;

    let profile = match user {
        Some(user) => profile_from_ratings(&ratings, user)?,
        None => profile_from_likes(&catalog, likes)?,
    };

    for (item, rating) in profile.ratings() {
        println!("  Rated: {} -> {rating}", title(&catalog, item));
    }

    println!();
    println!("=== Recommendations based on your history ===");
    let by_history = model.recommend_by_history(&profile.liked())?;
    if by_history.is_empty() {
        println!("No recommendations could be made from your history.");
    } else {
        print_recommendations(&catalog, &by_history);
    }

    if let Some(last) = profile.last_liked() {
        let last_title = title(&catalog, last);
        println!();
        println!("=== Recommendations based on the last movie you liked ('{last_title}') ===");
        let by_last = model.recommend_by_last_liked(last)?;
        if by_last.is_empty() {
            println!("No recommendations found based only on '{last_title}'.");
        } else {
            print_recommendations(&catalog, &by_last);
        }
    }

    Ok(())
}

fn cmd_search(movies: &Path, query: &str) -> CliResult<()> {
    let catalog = Catalog::read(movies)?;
    let hits = catalog.search(query, SEARCH_LIMIT);
    if hits.is_empty() {
        println!("No movie found matching '{query}'.");
    }
    for movie in hits {
        println!("  [{}] {}", movie.id, movie.title);
    }
    Ok(())
}

/// A dataset user's ratings in file order, first rating per movie.
///
/// Rows outside the rating scale are skipped.
fn profile_from_ratings(ratings: &[Rating], user: UserId) -> CliResult<UserProfile> {
    let mut profile = UserProfile::new();
    for rating in ratings.iter().filter(|r| r.user_id == user) {
        if profile.rating(rating.item_id).is_some() {
            continue;
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating.rating) {
            warn!(
                user,
                movie = rating.item_id,
                rating = rating.rating,
                "rating outside {MIN_RATING}..={MAX_RATING}, skipped"
            );
            continue;
        }
        profile.rate(rating.item_id, rating.rating)?;
    }
    if profile.is_empty() {
        return Err(format!("user {user} has no ratings").into());
    }
    if profile.liked().is_empty() {
        info!(user, "user has no liked movies");
    }
    Ok(profile)
}

fn profile_from_likes(catalog: &Catalog, likes: &[String]) -> CliResult<UserProfile> {
    let mut profile = UserProfile::new();
    for spec in likes {
        let (movie, rating) = split_like(spec)?;
        let item = resolve_movie(catalog, movie)?;
        profile.rate(item, parse_rating(rating)?)?;
    }
    Ok(profile)
}

/// Split `MOVIE=RATING` at the last `=`.
fn split_like(spec: &str) -> CliResult<(&str, &str)> {
    match spec.rsplit_once('=') {
        Some((movie, rating)) if !movie.trim().is_empty() => Ok((movie.trim(), rating)),
        _ => Err(format!("expected MOVIE=RATING, got '{spec}'").into()),
    }
}

/// Resolve a movie id or a title fragment matching exactly one movie.
fn resolve_movie(catalog: &Catalog, movie: &str) -> CliResult<ItemId> {
    if let Ok(id) = movie.parse::<ItemId>() {
        if catalog.contains(id) {
            return Ok(id);
        }
    }

    let hits = catalog.search(movie, SEARCH_LIMIT);
    match hits.as_slice() {
        [] => Err(format!("no movie found matching '{movie}'").into()),
        [only] => Ok(only.id),
        many => {
            if let Some(exact) = many.iter().find(|m| m.title.eq_ignore_ascii_case(movie)) {
                return Ok(exact.id);
            }
            let options: Vec<String> = many
                .iter()
                .map(|m| format!("[{}] {}", m.id, m.title))
                .collect();
            Err(format!(
                "'{movie}' is ambiguous, use an id: {}",
                options.join(", ")
            )
            .into())
        }
    }
}

fn print_recommendations(catalog: &Catalog, recs: &[Recommendation]) {
    for rec in recs {
        println!(
            " - {} (conf: {:.2}, sup: {:.2}, lift: {:.2})",
            title(catalog, rec.item),
            rec.confidence,
            rec.support,
            rec.lift
        );
    }
}

fn title(catalog: &Catalog, item: ItemId) -> String {
    catalog
        .title(item)
        .map_or_else(|| format!("#{item}"), str::to_string)
}

fn titles(catalog: &Catalog, itemset: &Itemset) -> String {
    let names: Vec<String> = itemset.items().iter().map(|&item| title(catalog, item)).collect();
    format!("{{{}}}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assocrec::data::Movie;

    fn catalog() -> Catalog {
        Catalog::from_movies(vec![
            Movie::new(1, "Toy Story (1995)"),
            Movie::new(2, "Toy Story 2 (1999)"),
            Movie::new(3, "Heat (1995)"),
        ])
    }

    #[test]
    fn test_split_like() {
        assert_eq!(split_like("Heat=4,5").unwrap(), ("Heat", "4,5"));
        assert_eq!(split_like("a=b=3").unwrap(), ("a=b", "3"));
        assert!(split_like("Heat").is_err());
        assert!(split_like("=4").is_err());
    }

    #[test]
    fn test_resolve_movie() {
        let catalog = catalog();
        assert_eq!(resolve_movie(&catalog, "3").unwrap(), 3);
        assert_eq!(resolve_movie(&catalog, "heat").unwrap(), 3);
        assert_eq!(resolve_movie(&catalog, "toy story (1995)").unwrap(), 1);
        assert!(resolve_movie(&catalog, "toy story").is_err());
        assert!(resolve_movie(&catalog, "Matrix").is_err());
    }

    #[test]
    fn test_profile_from_likes() {
        let likes = vec!["heat=5".to_string(), "2=2,5".to_string()];
        let profile = profile_from_likes(&catalog(), &likes).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.last_liked(), Some(3));
        assert!(profile_from_likes(&catalog(), &["heat=9".to_string()]).is_err());
    }

    #[test]
    fn test_profile_from_ratings_first_row_wins() {
        let ratings = vec![
            Rating::new(7, 1, 4.0),
            Rating::new(7, 1, 1.0),
            Rating::new(8, 2, 5.0),
        ];
        let profile = profile_from_ratings(&ratings, 7).unwrap();
        assert_eq!(profile.rating(1), Some(4.0));
        assert!(profile_from_ratings(&ratings, 9).is_err());
    }

    #[test]
    fn test_profile_from_ratings_skips_out_of_range() {
        let ratings = vec![
            Rating::new(7, 1, 9.0),
            Rating::new(7, 2, -1.0),
            Rating::new(7, 3, 4.5),
        ];
        let profile = profile_from_ratings(&ratings, 7).unwrap();
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.rating(1), None);
        assert_eq!(profile.last_liked(), Some(3));

        let only_bad = vec![Rating::new(7, 1, 9.0)];
        assert!(profile_from_ratings(&only_bad, 7).is_err());
    }

    #[test]
    fn test_cli_parses_recommend() {
        let cli = Cli::try_parse_from([
            "assocrec",
            "recommend",
            "--like",
            "Heat=5",
            "--like",
            "1=4",
            "--min-support",
            "0.05",
        ])
        .unwrap();
        match cli.command {
            Commands::Recommend {
                like, thresholds, user, ..
            } => {
                assert_eq!(like.len(), 2);
                assert_eq!(thresholds.min_support, Some(0.05));
                assert!(user.is_none());
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_cli_recommend_requires_user_or_like() {
        assert!(Cli::try_parse_from(["assocrec", "recommend"]).is_err());
        assert!(Cli::try_parse_from(["assocrec", "recommend", "--user", "1", "--like", "a=1"]).is_err());
    }

    #[test]
    fn test_load_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(&path, "min_support = 0.1\ntop_n = 3\n").unwrap();
        let args = ThresholdArgs {
            config: Some(path),
            min_support: None,
            min_confidence: Some(0.6),
            top_n: None,
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.min_support, 0.1);
        assert_eq!(config.min_confidence, 0.6);
        assert_eq!(config.top_n, 3);

        // an invalid file value is fine when a flag replaces it
        let zero_path = dir.path().join("zero.toml");
        std::fs::write(&zero_path, "top_n = 0\n").unwrap();
        let overridden = ThresholdArgs {
            config: Some(zero_path.clone()),
            min_support: None,
            min_confidence: None,
            top_n: Some(3),
        };
        assert_eq!(load_config(&overridden).unwrap().top_n, 3);
        let kept = ThresholdArgs {
            config: Some(zero_path),
            min_support: None,
            min_confidence: None,
            top_n: None,
        };
        assert!(load_config(&kept).is_err());

        let bad = ThresholdArgs {
            config: None,
            min_support: Some(2.0),
            min_confidence: None,
            top_n: None,
        };
        assert!(load_config(&bad).is_err());
    }
}
