//! recipe-finder: rank, group and inspect recipe search results.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use recipe_cli::output::{self, format_count, format_duration, Status};
use recipe_core::adapters::parse_mealdb_response;
use recipe_core::config::{Config, CONFIG_ENV_VAR};
use recipe_core::error::exit_codes;
use recipe_core::store::{ensure_not_empty, InMemoryRecipeStore, RecipeFilter, RecipeStore, StoredRecipe};
use recipe_core::validation::validate_catalog;
use recipe_search::{Recipe, RecipeMatcher};
use recipe_telemetry::{metrics, TelemetryConfig, Timer};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(about = "Rank recipes against a free-text query")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print collected counters and timings as JSON on stderr when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct CatalogArgs {
    /// Recipe catalog (JSON array); defaults to general.catalog_path
    #[arg(long, short)]
    recipes: Option<PathBuf>,

    /// TheMealDB response files to merge into the catalog
    #[arg(long)]
    mealdb: Vec<PathBuf>,

    /// Only recipes of this cuisine
    #[arg(long)]
    cuisine: Option<String>,

    /// Only recipes of this difficulty
    #[arg(long)]
    difficulty: Option<String>,

    /// Include unapproved and private recipes
    #[arg(long)]
    all: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes against a query
    Search {
        /// Free-text query
        query: String,
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Minimum score to keep (defaults to the configured threshold)
        #[arg(long)]
        min_score: Option<u32>,
        /// Maximum results to print (0 for all)
        #[arg(long, short)]
        limit: Option<usize>,
        /// Print results grouped by match quality
        #[arg(long)]
        group: bool,
        /// Show matched keywords under each result
        #[arg(long, short)]
        keywords: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest titles close to a (misspelled) query
    Suggest {
        /// Free-text query
        query: String,
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summary statistics for a query
    Stats {
        /// Free-text query
        query: String,
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Minimum score to keep (defaults to the configured threshold)
        #[arg(long)]
        min_score: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the keywords extracted from a query
    Keywords {
        /// Free-text query
        query: String,
    },
    /// Convert a TheMealDB response into recipe records
    Normalize {
        /// TheMealDB JSON file
        path: PathBuf,
    },
    /// Check a recipe catalog for problems
    Validate {
        /// Recipe catalog (JSON array); defaults to general.catalog_path
        #[arg(long, short)]
        recipes: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn wants_json(&self) -> bool {
        match self {
            Commands::Search { json, .. }
            | Commands::Suggest { json, .. }
            | Commands::Stats { json, .. }
            | Commands::Validate { json, .. } => *json,
            Commands::Keywords { .. } | Commands::Normalize { .. } => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let show_metrics = cli.metrics;
    let json = cli.command.wants_json();

    let outcome = run(cli);

    if show_metrics {
        eprintln!("{}", metrics().export_json());
    }

    if let Err(err) = outcome {
        let core_err = err.downcast_ref::<recipe_core::Error>();
        let code = core_err
            .map(recipe_core::Error::exit_code)
            .unwrap_or(exit_codes::FAILURE);

        match core_err {
            Some(core_err) if json => match serde_json::to_string(&core_err.to_report()) {
                Ok(report) => eprintln!("{}", report),
                Err(_) => Status::error(&format!("{:#}", err)),
            },
            _ => Status::error(&format!("{:#}", err)),
        }
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let log_level = match cli.verbose {
        0 => config.schema.general.log_level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    recipe_telemetry::init_with_config(TelemetryConfig {
        log_level,
        json: cli.log_json,
        ..TelemetryConfig::default()
    })?;

    let matcher =
        RecipeMatcher::new(config.schema.search.clone()).map_err(recipe_core::Error::from)?;

    match cli.command {
        Commands::Search {
            query,
            catalog,
            min_score,
            limit,
            group,
            keywords,
            json,
        } => {
            let (recipes, titles) = load_candidates(&catalog, &config)?;
            let min_score = min_score.unwrap_or(matcher.config().thresholds.min_score);

            let timer = Timer::start("search_ms");
            let mut results = matcher.search_with_min_score(&recipes, &query, min_score);
            let elapsed = timer.stop();
            metrics().increment("searches");
            metrics().increment_by("candidates_scored", recipes.len() as u64);

            let limit = limit.unwrap_or(config.schema.general.default_limit);
            if limit > 0 {
                results.truncate(limit);
            }

            if group {
                let groups = matcher.group(&results);
                if json {
                    println!("{}", serde_json::to_string_pretty(&groups)?);
                    return Ok(());
                }
                for (label, bucket) in [
                    ("Exact matches", &groups.exact_matches),
                    ("Partial matches", &groups.partial_matches),
                    ("Ingredient matches", &groups.ingredient_matches),
                    ("Similar recipes", &groups.similar_recipes),
                ] {
                    if !bucket.is_empty() {
                        Status::subheader(&format!("{} ({})", label, bucket.len()));
                        output::print_results(bucket, keywords);
                    }
                }
            } else if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            } else {
                output::print_results(&results, keywords);
            }

            if results.is_empty() {
                Status::warning(&format!("No recipes match \"{}\"", query));
                print_suggestions(&matcher, &query, &titles);
            } else {
                Status::info(&format!(
                    "{} from {} in {}",
                    format_count(results.len(), "result", "results"),
                    format_count(recipes.len(), "candidate", "candidates"),
                    format_duration(elapsed)
                ));
            }
        }

        Commands::Suggest { query, catalog, json } => {
            let (_, titles) = load_candidates(&catalog, &config)?;
            let suggestions = matcher.suggestions(&query, &titles);

            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else if suggestions.is_empty() {
                Status::info("No suggestions");
            } else {
                print_suggestions(&matcher, &query, &titles);
            }
        }

        Commands::Stats {
            query,
            catalog,
            min_score,
            json,
        } => {
            let (recipes, _) = load_candidates(&catalog, &config)?;
            let min_score = min_score.unwrap_or(matcher.config().thresholds.min_score);
            let results = matcher.search_with_min_score(&recipes, &query, min_score);
            let stats = matcher.stats(&results);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                output::print_stats(&stats);
            }
        }

        Commands::Keywords { query } => {
            let keywords = matcher.tokenizer().extract_keywords(&query);
            if keywords.is_empty() {
                Status::warning("No significant keywords; only whole-phrase title matching applies");
            } else {
                println!("{}", keywords.join(" "));
            }
        }

        Commands::Normalize { path } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let recipes = parse_mealdb_response(&content)?;
            println!("{}", serde_json::to_string_pretty(&recipes)?);
        }

        Commands::Validate { recipes, json } => {
            let path = catalog_path(recipes.as_deref(), &config)?;
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let records: Vec<StoredRecipe> = serde_json::from_str(&content)
                .map_err(recipe_core::Error::from)?;
            let catalog: Vec<Recipe> = records.into_iter().map(|r| r.recipe).collect();
            let result = validate_catalog(&catalog);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for warning in result.warnings() {
                    Status::warning(&warning.to_string());
                }
                for error in result.errors() {
                    Status::error(&error.to_string());
                }
                if result.is_valid() {
                    Status::success(&format!(
                        "{} valid",
                        format_count(catalog.len(), "recipe", "recipes")
                    ));
                }
            }

            result.to_result()?;
        }
    }

    Ok(())
}

fn catalog_path(explicit: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.schema.general.catalog_path.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            recipe_core::Error::config("No recipe catalog given")
                .with_suggestion("Pass --recipes or set general.catalog_path in recipe-finder.toml")
                .into()
        })
}

/// Candidates for ranking plus the visible titles for suggestions.
fn load_candidates(args: &CatalogArgs, config: &Config) -> anyhow::Result<(Vec<Recipe>, Vec<String>)> {
    let mut store = match catalog_path(args.recipes.as_deref(), config) {
        Ok(path) => InMemoryRecipeStore::load(path)?,
        Err(_) if !args.mealdb.is_empty() => InMemoryRecipeStore::new(),
        Err(err) => return Err(err),
    };

    for path in &args.mealdb {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        store.extend_recipes(parse_mealdb_response(&content)?)?;
    }

    let mut filter = RecipeFilter::default();
    if args.all {
        filter = filter.include_unapproved();
    }
    if let Some(cuisine) = &args.cuisine {
        filter = filter.with_cuisine(cuisine.clone());
    }
    if let Some(difficulty) = &args.difficulty {
        filter = filter.with_difficulty(difficulty.clone());
    }

    let recipes = store.query(&filter)?;
    ensure_not_empty(&recipes, &filter)?;
    tracing::debug!(%filter, candidates = recipes.len(), "Candidates selected");

    let titles = recipes.iter().map(|r| r.title.clone()).collect();
    Ok((recipes, titles))
}

fn print_suggestions(matcher: &RecipeMatcher, query: &str, titles: &[String]) {
    let suggestions = matcher.suggestions(query, titles);
    if !suggestions.is_empty() {
        Status::info(&format!("Did you mean: {}?", suggestions.join(", ")));
    }
}
