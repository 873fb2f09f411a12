use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use jr_common::advisory::{JournalAnalysisPayload, MatchAnalysisPayload};
use jr_common::catalog::JournalCatalog;
use jr_common::commentary::{Commentary, build_commentary};
use jr_common::comparison::{DimensionDiff, compare_profiles, dimension_diffs};
use jr_common::config::EngineConfig;
use jr_common::keywords::YearRange;
use jr_common::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use jr_common::matching::{KeywordHits, RecommendationCandidate, RecommendationRanker};
use jr_common::radar::{DIMENSION_COUNT, RadarChart, RadarProfile};
use jr_common::survey::{LikertAnswers, SurveyError, SurveyResponse, decode_token, encode_token};
use jr_common::{JournalRow, MetricSet};
use serde::Serialize;

const APP_NAME: &str = "jr-cli";

#[derive(Debug, Parser)]
#[command(
    name = "jr-cli",
    about = "Recommend journals for an author profile and inspect journal metrics"
)]
struct Cli {
    /// JSON file with an array of journal-year metric rows
    #[arg(long, global = true, env = "JR_JOURNALS_FILE")]
    journals: Option<PathBuf>,

    /// Year whose journal keywords are matched (falls back to earlier years).
    /// Defaults to `JR_TARGET_YEAR`, then the current year
    #[arg(long, global = true)]
    target_year: Option<i32>,

    /// First year of per-year keyword data (default `JR_KEYWORD_YEAR_START`)
    #[arg(long, global = true)]
    year_start: Option<i32>,

    /// Last year of per-year keyword data (default `JR_KEYWORD_YEAR_END`)
    #[arg(long, global = true)]
    year_end: Option<i32>,

    /// Maximum number of recommendations (default `JR_MAX_RECOMMENDATIONS`)
    #[arg(long, global = true)]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank journals for a survey
    Recommend(SurveySource),
    /// Author vs. one journal: match facts for the advisory generator
    Match {
        journal: String,
        #[command(flatten)]
        survey: SurveySource,
    },
    /// Metrics, radar, commentary and keywords of one journal
    Journal { journal: String },
    /// Names of every journal in the catalog
    Journals,
    /// Side-by-side radar comparison of two journals
    Compare { journal_a: String, journal_b: String },
    /// Build a survey token from Likert answers (1-5)
    Survey(SurveyAnswers),
}

#[derive(Debug, Args)]
struct SurveySource {
    /// Survey token as produced by the `survey` command
    #[arg(long, env = "JR_SURVEY_TOKEN", conflicts_with = "survey_file")]
    survey_token: Option<String>,

    /// JSON file with a survey response
    #[arg(long = "survey")]
    survey_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SurveyAnswers {
    /// Research keywords, separated by `;`, `,`, `|`, `/` or new lines
    #[arg(long)]
    keywords: String,
    #[arg(long)]
    novelty: i32,
    #[arg(long)]
    disruption: i32,
    #[arg(long)]
    interdisciplinary: i32,
    #[arg(long)]
    theme_concentration: i32,
    #[arg(long)]
    topic: i32,
    #[arg(long)]
    hot_response: i32,
}

impl SurveyAnswers {
    fn likert(&self) -> LikertAnswers {
        LikertAnswers {
            novelty: self.novelty,
            disruption: self.disruption,
            interdisciplinary: self.interdisciplinary,
            theme_concentration: self.theme_concentration,
            topic: self.topic,
            hot_response: self.hot_response,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("survey error: {0}")]
    Survey(#[from] SurveyError),
    #[error("unknown journal: {0}")]
    UnknownJournal(String),
    #[error("no journal data: pass --journals or set JR_JOURNALS_FILE")]
    MissingJournals,
    #[error("no survey: pass --survey-token or --survey")]
    MissingSurvey,
}

#[derive(Debug, Serialize)]
struct RecommendOutput {
    target_year: i32,
    author_radar: RadarChart,
    author_commentary: Commentary,
    recommendations: Vec<RecommendationCandidate>,
    keyword_hits: Vec<KeywordHits>,
}

#[derive(Debug, Serialize)]
struct JournalOutput {
    #[serde(flatten)]
    analysis: JournalAnalysisPayload,
    years: Vec<JournalYear>,
}

#[derive(Debug, Serialize)]
struct JournalYear {
    year: Option<i32>,
    #[serde(flatten)]
    metrics: MetricSet,
}

#[derive(Debug, Serialize)]
struct CompareSide {
    journal: String,
    year: Option<i32>,
    radar: RadarChart,
    commentary: Commentary,
}

#[derive(Debug, Serialize)]
struct CompareOutput {
    a: CompareSide,
    b: CompareSide,
    lines: Vec<String>,
    dimension_diffs: [DimensionDiff; DIMENSION_COUNT],
}

/// Flags override the environment; the environment is read leniently by
/// [`EngineConfig::from_env`] so bad values fall back to defaults.
fn engine_config(cli: &Cli) -> EngineConfig {
    apply_overrides(cli, EngineConfig::from_env())
}

fn apply_overrides(cli: &Cli, base: EngineConfig) -> EngineConfig {
    EngineConfig {
        target_year: cli.target_year.unwrap_or(base.target_year),
        year_range: YearRange::new(
            cli.year_start.unwrap_or(base.year_range.start()),
            cli.year_end.unwrap_or(base.year_range.end()),
        ),
        max_recommendations: cli
            .limit
            .filter(|n| *n > 0)
            .unwrap_or(base.max_recommendations),
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_catalog(path: Option<&Path>) -> Result<JournalCatalog, CliError> {
    let path = path.ok_or(CliError::MissingJournals)?;
    let rows: Vec<JournalRow> = serde_json::from_str(&read_file(path)?)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded journal rows");
    Ok(JournalCatalog::new(rows))
}

fn load_survey(source: &SurveySource) -> Result<SurveyResponse, CliError> {
    if let Some(token) = source.survey_token.as_deref() {
        return Ok(decode_token(token)?);
    }
    let path = source.survey_file.as_deref().ok_or(CliError::MissingSurvey)?;
    Ok(serde_json::from_str(&read_file(path)?)?)
}

fn latest_row<'a>(catalog: &'a JournalCatalog, journal: &str) -> Result<&'a JournalRow, CliError> {
    catalog
        .latest_for(journal)
        .ok_or_else(|| CliError::UnknownJournal(journal.trim().to_string()))
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn recommend(
    config: &EngineConfig,
    catalog: &JournalCatalog,
    survey: &SurveyResponse,
) -> RecommendOutput {
    let author_profile = survey.radar_profile();
    let ranker = RecommendationRanker::new(config.ranking_config());
    let outcome = ranker.rank_with_hits(
        &author_profile,
        &survey.keyword_set(),
        &catalog.candidates(config.year_range),
    );

    RecommendOutput {
        target_year: outcome.target_year,
        author_radar: author_profile.chart(),
        author_commentary: build_commentary(&survey.scores),
        recommendations: outcome.recommendations,
        keyword_hits: outcome.keyword_hits,
    }
}

fn journal_detail(
    config: &EngineConfig,
    catalog: &JournalCatalog,
    journal: &str,
) -> Result<JournalOutput, CliError> {
    let row = latest_row(catalog, journal)?;
    let years = catalog
        .rows_for(journal)
        .into_iter()
        .map(|r| JournalYear {
            year: r.year,
            metrics: r.metrics,
        })
        .collect();

    Ok(JournalOutput {
        analysis: JournalAnalysisPayload::build(row, config.year_range),
        years,
    })
}

fn compare(
    catalog: &JournalCatalog,
    journal_a: &str,
    journal_b: &str,
) -> Result<CompareOutput, CliError> {
    let row_a = latest_row(catalog, journal_a)?;
    let row_b = latest_row(catalog, journal_b)?;
    let profile_a = RadarProfile::build(&row_a.metrics);
    let profile_b = RadarProfile::build(&row_b.metrics);

    let side = |row: &JournalRow, profile: &RadarProfile| CompareSide {
        journal: row.journal.trim().to_string(),
        year: row.year,
        radar: profile.chart(),
        commentary: build_commentary(&row.metrics),
    };

    Ok(CompareOutput {
        lines: compare_profiles(
            row_a.journal.trim(),
            &profile_a,
            row_b.journal.trim(),
            &profile_b,
        )
        .iter()
        .map(ToString::to_string)
        .collect(),
        dimension_diffs: dimension_diffs(&profile_a, &profile_b),
        a: side(row_a, &profile_a),
        b: side(row_b, &profile_b),
    })
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let config = engine_config(&cli);
    let journals = cli.journals.as_deref();

    match &cli.command {
        Command::Recommend(source) => {
            let survey = load_survey(source)?;
            let catalog = load_catalog(journals)?;
            let output = recommend(&config, &catalog, &survey);
            tracing::info!(
                target_year = output.target_year,
                journals = catalog.journal_names().len(),
                recommendations = output.recommendations.len(),
                "recommendations computed"
            );
            write_json(out, &output)
        }
        Command::Match { journal, survey } => {
            let survey = load_survey(survey)?;
            let catalog = load_catalog(journals)?;
            let row = latest_row(&catalog, journal)?;
            let payload =
                MatchAnalysisPayload::build(&survey, row, config.target_year, config.year_range);
            write_json(out, &payload)
        }
        Command::Journal { journal } => {
            let catalog = load_catalog(journals)?;
            write_json(out, &journal_detail(&config, &catalog, journal)?)
        }
        Command::Journals => {
            let catalog = load_catalog(journals)?;
            write_json(out, &catalog.journal_names())
        }
        Command::Compare {
            journal_a,
            journal_b,
        } => {
            let catalog = load_catalog(journals)?;
            write_json(out, &compare(&catalog, journal_a, journal_b)?)
        }
        Command::Survey(answers) => {
            let survey = SurveyResponse::from_answers(
                &answers.keywords,
                &answers.likert(),
                Utc::now().naive_utc(),
            )?;
            writeln!(out, "{}", encode_token(&survey)?)?;
            Ok(())
        }
    }
}

fn main() {
    let _ = dotenv();
    init_tracing_subscriber(APP_NAME);
    install_tracing_panic_hook(APP_NAME);

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run(cli, &mut out) {
        tracing::error!(error = %err, "{APP_NAME} failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use jr_common::config::{MAX_RECOMMENDATIONS_ENV, TARGET_YEAR_ENV, YEAR_START_ENV};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn journals_file(dir: &TempDir) -> PathBuf {
        let rows = json!([
            {
                "journal": "Graph Letters",
                "year": 2024,
                "category": "CS",
                "paper_count": 210,
                "disruption": 40, "novelty": 60, "interdisciplinary": 50,
                "theme_concentration": 50, "topic": 50, "hot_response": 50,
                "top_keywords": {"2024": "graph learning; retrieval"}
            },
            {
                "journal": "Graph Letters",
                "year": 2022,
                "disruption": 10, "novelty": 10,
                "top_keywords": {"2022": "old topic"}
            },
            {
                "journal": "Chem Review",
                "year": 2024,
                "disruption": "5", "novelty": "5", "interdisciplinary": 0,
                "theme_concentration": 90, "topic": 5, "hot_response": 0,
                "top_keywords": {"2024": ["catalysis"]}
            }
        ]);
        let path = dir.path().join("journals.json");
        std::fs::write(&path, rows.to_string()).unwrap();
        path
    }

    fn survey_token() -> String {
        let survey = SurveyResponse::from_answers(
            "graph learning; vision",
            &LikertAnswers {
                novelty: 3,
                disruption: 3,
                interdisciplinary: 3,
                theme_concentration: 3,
                topic: 3,
                hot_response: 3,
            },
            Utc::now().naive_utc(),
        )
        .unwrap();
        encode_token(&survey).unwrap()
    }

    fn run_args(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn run_json(args: &[&str]) -> Value {
        serde_json::from_str(&run_args(args).unwrap()).unwrap()
    }

    #[test]
    fn unparsable_env_values_fall_back_to_defaults() {
        let cli = Cli::try_parse_from(["jr-cli", "journals"]).unwrap();
        let base = EngineConfig::from_lookup(|key| match key {
            TARGET_YEAR_ENV => Some("next".into()),
            YEAR_START_ENV => Some("soon".into()),
            MAX_RECOMMENDATIONS_ENV => Some("-4".into()),
            _ => None,
        });

        let config = apply_overrides(&cli, base);

        assert_eq!(config.target_year, Utc::now().year());
        assert_eq!(config.year_range, YearRange::DEFAULT);
        assert_eq!(config.max_recommendations, 10);
    }

    #[test]
    fn flags_override_env_config() {
        let cli = Cli::try_parse_from([
            "jr-cli",
            "--target-year",
            "2022",
            "--year-end",
            "2023",
            "--limit",
            "0",
            "journals",
        ])
        .unwrap();
        let base = EngineConfig::from_lookup(|key| (key == TARGET_YEAR_ENV).then(|| "2030".into()));

        let config = apply_overrides(&cli, base);

        assert_eq!(config.target_year, 2022);
        assert_eq!(config.year_range, YearRange::new(2021, 2023));
        assert_eq!(config.max_recommendations, 10);
    }

    #[test]
    fn recommend_ranks_keyword_match_first() {
        let dir = TempDir::new().unwrap();
        let journals = journals_file(&dir);
        let token = survey_token();

        let output = run_json(&[
            "jr-cli",
            "--journals",
            journals.to_str().unwrap(),
            "--target-year",
            "2025",
            "recommend",
            "--survey-token",
            &token,
        ]);

        assert_eq!(output["target_year"], 2025);
        let recs = output["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0]["journal_id"], "Graph Letters");
        assert_eq!(recs[0]["matched_keywords"], json!(["graph learning"]));
        assert_eq!(output["keyword_hits"][0]["journals"], json!(["Graph Letters"]));
        assert_eq!(output["keyword_hits"][1]["journals"], json!([]));
    }

    #[test]
    fn limit_flag_truncates() {
        let dir = TempDir::new().unwrap();
        let journals = journals_file(&dir);
        let token = survey_token();

        let output = run_json(&[
            "jr-cli",
            "--journals",
            journals.to_str().unwrap(),
            "--limit",
            "1",
            "recommend",
            "--survey-token",
            &token,
        ]);

        assert_eq!(output["recommendations"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn survey_file_is_accepted() {
        let dir = TempDir::new().unwrap();
        let journals = journals_file(&dir);
        let survey_path = dir.path().join("survey.json");
        std::fs::write(
            &survey_path,
            json!({"keywords": ["catalysis"], "scores": {"theme_concentration": 90}}).to_string(),
        )
        .unwrap();

        let output = run_json(&[
            "jr-cli",
            "--journals",
            journals.to_str().unwrap(),
            "recommend",
            "--survey",
            survey_path.to_str().unwrap(),
        ]);

        assert_eq!(output["recommendations"][0]["journal_id"], "Chem Review");
    }

    #[test]
    fn journal_detail_lists_years_newest_first() {
        let dir = TempDir::new().unwrap();
        let journals = journals_file(&dir);

        let output = run_json(&[
            "jr-cli",
            "--journals",
            journals.to_str().unwrap(),
            "journal",
            "Graph Letters",
        ]);

        assert_eq!(output["journal"], "Graph Letters");
        assert_eq!(output["latest_year"], 2024);
        assert_eq!(output["years"][0]["year"], 2024);
        assert_eq!(output["years"][1]["year"], 2022);
        assert_eq!(output["radar"]["values"][0], 100.0);
    }

    #[test]
    fn compare_renders_lines() {
        let dir = TempDir::new().unwrap();
        let journals = journals_file(&dir);

        let output = run_json(&[
            "jr-cli",
            "--journals",
            journals.to_str().unwrap(),
            "compare",
            "Graph Letters",
            "Chem Review",
        ]);

        assert_eq!(
            output["lines"][0],
            "Content frontier: Graph Letters is higher (difference 90.00)."
        );
        assert_eq!(output["dimension_diffs"][0]["match_pct"], 55);
    }

    #[test]
    fn match_command_builds_advisory_payload() {
        let dir = TempDir::new().unwrap();
        let journals = journals_file(&dir);
        let token = survey_token();

        let output = run_json(&[
            "jr-cli",
            "--journals",
            journals.to_str().unwrap(),
            "--target-year",
            "2024",
            "match",
            "Graph Letters",
            "--survey-token",
            &token,
        ]);

        assert_eq!(output["match"]["matched_keywords"], json!(["graph learning"]));
        assert_eq!(output["journal"]["name"], "Graph Letters");
    }

    #[test]
    fn survey_command_prints_decodable_token() {
        let text = run_args(&[
            "jr-cli",
            "survey",
            "--keywords",
            "nlp, vision",
            "--novelty",
            "5",
            "--disruption",
            "1",
            "--interdisciplinary",
            "3",
            "--theme-concentration",
            "3",
            "--topic",
            "3",
            "--hot-response",
            "3",
        ])
        .unwrap();

        let survey = decode_token(text.trim()).unwrap();
        assert_eq!(survey.keywords, vec!["nlp", "vision"]);
        assert_eq!(survey.scores.novelty, Some(100.0));
    }

    #[test]
    fn unknown_journal_is_an_error() {
        let dir = TempDir::new().unwrap();
        let journals = journals_file(&dir);

        let err = run_args(&[
            "jr-cli",
            "--journals",
            journals.to_str().unwrap(),
            "journal",
            "Nope",
        ])
        .unwrap_err();

        assert!(matches!(err, CliError::UnknownJournal(name) if name == "Nope"));
    }

    #[test]
    fn missing_inputs_are_reported() {
        let err = run_args(&["jr-cli", "journals"]).unwrap_err();
        assert!(matches!(err, CliError::MissingJournals));

        let dir = TempDir::new().unwrap();
        let journals = journals_file(&dir);
        let err = run_args(&["jr-cli", "--journals", journals.to_str().unwrap(), "recommend"])
            .unwrap_err();
        assert!(matches!(err, CliError::MissingSurvey));
    }
}
