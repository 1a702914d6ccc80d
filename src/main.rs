//! CLI for news clickbait and sentiment analysis
//!
//! Usage:
//! ```bash
//! cargo run -- --help
//! cargo run -- analyze --topic bitcoin
//! cargo run -- demo
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use newshound::{
    clickbait_sentiment_independence, compare_lengths, correlate_sentiment_and_length, defaults,
    export_csv, filter_by_topic, load_config, AnnotatedRecord, AppConfig, ClickbaitClassifier,
    ClickbaitLabel, LexiconModel, NewsApiClient, Pipeline, RawArticle, RecordBuilder,
    SentimentClassifier, SentimentLabel, SortOrder,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "newshound")]
#[command(version)]
#[command(about = "News clickbait detection and sentiment analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search news for a topic and analyze the results
    Analyze {
        /// Topic to search for (prompted when omitted)
        #[arg(short, long)]
        topic: Option<String>,

        /// Number of articles to request
        #[arg(short, long)]
        page_size: Option<usize>,

        /// Sort order: publishedAt, relevancy or popularity
        #[arg(short, long)]
        sort: Option<String>,

        /// CSV output path
        #[arg(short, long, default_value = "data/combined_analysis.csv")]
        output: PathBuf,

        /// Config file (TOML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip the interactive article selection prompt
        #[arg(long)]
        no_interactive: bool,
    },

    /// Analyze built-in sample articles (no API key required)
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Analyze {
            topic,
            page_size,
            sort,
            output,
            config,
            no_interactive,
        } => run_analyze(topic, page_size, sort, output, config, no_interactive).await,
        Commands::Demo => run_demo(),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run_analyze(
    topic: Option<String>,
    page_size: Option<usize>,
    sort: Option<String>,
    output: PathBuf,
    config_path: Option<PathBuf>,
    no_interactive: bool,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    // Both ambient requirements fail here, at startup, with a clear
    // message: the provider key and the sentiment model.
    let api_key = config
        .news
        .resolve_api_key()
        .context("news provider API key is required")?;
    let model = LexiconModel::load().context("failed to load sentiment model")?;

    let sort = match sort {
        Some(s) => SortOrder::from_str(&s)?,
        None => config.news.sort_by,
    };
    let page_size = page_size.unwrap_or(config.news.page_size);

    let pipeline = Pipeline::new(
        ClickbaitClassifier::from_phrases(&config.analysis.clickbait_phrases),
        SentimentClassifier::new(Box::new(model)),
    );

    let topic = match topic {
        Some(t) => t,
        None => prompt_line(&format!("{}", "Enter a topic to search for: ".yellow()))?,
    };
    let topic = topic.trim().to_lowercase();
    if topic.is_empty() {
        bail!("empty search topic");
    }

    println!(
        "{}",
        format!("Searching articles for topic: '{}' ...", topic).cyan()
    );
    let client = NewsApiClient::new(api_key);
    let articles = client.fetch_articles(&topic, page_size, sort).await?;
    if articles.is_empty() {
        println!(
            "{}",
            format!("No articles found for topic: '{}'.", topic).red()
        );
        return Ok(());
    }

    let records = RecordBuilder::new()
        .build_all(&articles)
        .context("provider returned a malformed article")?;
    let records = filter_by_topic(records, &topic);
    if records.is_empty() {
        println!(
            "{}",
            format!("No articles actually contain '{}'.", topic).red()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Analyzing {} articles...", records.len()).green()
    );
    let annotated = pipeline.run_records(records)?;

    print_article_table(&annotated, &topic);

    if !no_interactive {
        let choice = prompt_article_choice(annotated.len())?;
        print_article_detail(&annotated[choice - 1], &topic);
    }

    export_csv(&annotated, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "{}",
        format!("Results saved to: {}", output.display()).yellow()
    );

    print_statistics(&annotated);
    Ok(())
}

fn run_demo() -> Result<()> {
    println!(
        "{}",
        "Demo mode: analyzing sample articles (no API key required)".cyan()
    );

    let model = LexiconModel::load().context("failed to load sentiment model")?;
    let pipeline = Pipeline::new(
        ClickbaitClassifier::new(),
        SentimentClassifier::new(Box::new(model)),
    );

    let annotated = pipeline.run(&sample_articles())?;
    print_article_table(&annotated, "");
    print_statistics(&annotated);
    Ok(())
}

/// Sample articles for the offline demo
fn sample_articles() -> Vec<RawArticle> {
    vec![
        RawArticle::new(
            "ClickbaitNews",
            "You Won't Believe What This Celebrity Did Next!",
        )
        .with_description("A wonderful and amazing comeback, fans celebrate a great success."),
        RawArticle::new(
            "Financial Times",
            "Federal Reserve Announces New Interest Rate Policy",
        )
        .with_description("Officials warn of recession risk and fear a decline in growth."),
        RawArticle::new(
            "Nature Journal",
            "Scientists Discover New Species in Amazon Rainforest",
        )
        .with_description(
            "Researchers celebrate a breakthrough discovery that offers hope for conservation progress.",
        ),
        RawArticle::new(
            "MoneyHacks",
            "This Simple Trick Will Double Your Income Instantly!",
        )
        .with_description("A can't-miss plan promising overnight success."),
        RawArticle::new(
            "Environmental Science",
            "Climate Report Shows Alarming Temperature Trends",
        )
        .with_description("The data reveals an alarming risk of crisis and loss across regions."),
    ]
}

fn print_article_table(records: &[AnnotatedRecord], topic: &str) {
    println!("\n{}", "--- Article List ---".cyan());
    for (index, record) in records.iter().enumerate() {
        println!(
            "{} {}",
            format!("[{}]", index + 1).yellow(),
            highlight_keyword(&record.record.title, topic)
        );
        println!(
            "    {} | {} ({:.2}) | {} words",
            clickbait_colored(record.clickbait),
            sentiment_colored(record.sentiment),
            record.sentiment_score,
            record.word_count
        );
    }
}

fn print_article_detail(record: &AnnotatedRecord, topic: &str) {
    println!("\n{}", "Analyzing selected article".magenta());
    println!(
        "{} {}",
        "Title:".yellow(),
        highlight_keyword(&record.record.title, topic)
    );
    println!("{} {}", "Source:".yellow(), record.record.source);
    if let Some(published) = record.record.published_datetime() {
        println!("{} {}", "Published:".yellow(), published.to_rfc3339());
    }
    println!(
        "\n{}\n{}",
        "Text:".blue(),
        highlight_keyword(&record.record.text, topic)
    );
    println!(
        "\n{} {}",
        "CLICKBAIT RESULT:".bold(),
        clickbait_colored(record.clickbait).bold()
    );
    println!(
        "{} {} (score: {:.2})",
        "SENTIMENT RESULT:".bold(),
        sentiment_colored(record.sentiment).bold(),
        record.sentiment_score
    );
    println!("{} {}", "WORD COUNT:".bold(), record.word_count);
}

fn print_statistics(records: &[AnnotatedRecord]) {
    println!("\n{}", "--- Statistical Analysis ---".cyan());

    println!("\n{}", "Sentiment score vs. word count:".cyan());
    match correlate_sentiment_and_length(records) {
        Ok(pair) => {
            println!(
                "{}",
                format!(
                    "Pearson correlation: r = {:.2}, p-value = {:.4}",
                    pair.pearson.coefficient, pair.pearson.p_value
                )
                .yellow()
            );
            println!(
                "{}",
                format!(
                    "Spearman correlation: r = {:.2}, p-value = {:.4}",
                    pair.spearman.coefficient, pair.spearman.p_value
                )
                .yellow()
            );
        }
        Err(err) => println!("{}", format!("Correlation skipped: {err}").yellow()),
    }

    println!("\n{}", "Clickbait vs. sentiment (chi-square test):".cyan());
    match clickbait_sentiment_independence(records) {
        Ok(result) => {
            println!(
                "{}",
                format!(
                    "Chi2 = {:.2}, p-value = {:.4}, dof = {}{}",
                    result.statistic,
                    result.p_value,
                    result.degrees_of_freedom,
                    significance_marker(result.p_value)
                )
                .yellow()
            );
            println!("{}", "Expected frequencies (clickbait x sentiment):".yellow());
            for (row_label, row) in ["Clickbait", "NotClickbait"].iter().zip(result.expected.iter())
            {
                println!(
                    "{}",
                    format!("  {:<14} {:>8.2} {:>8.2}", row_label, row[0], row[1]).yellow()
                );
            }
        }
        Err(err) => println!("{}", format!("Chi-square skipped: {err}").yellow()),
    }

    println!(
        "\n{}",
        "Word counts, clickbait vs. non-clickbait (t-test):".cyan()
    );
    let (clickbait, rest): (Vec<AnnotatedRecord>, Vec<AnnotatedRecord>) = records
        .iter()
        .cloned()
        .partition(|r| r.clickbait == ClickbaitLabel::Clickbait);
    match compare_lengths(&clickbait, &rest) {
        Ok(result) => println!(
            "{}",
            format!(
                "t = {:.2}, p-value = {:.4}{}",
                result.statistic,
                result.p_value,
                significance_marker(result.p_value)
            )
            .yellow()
        ),
        Err(err) => println!("{}", format!("T-test skipped: {err}").yellow()),
    }
}

fn significance_marker(p_value: f64) -> &'static str {
    if p_value < defaults::SIGNIFICANCE_LEVEL {
        " (significant)"
    } else {
        ""
    }
}

fn clickbait_colored(label: ClickbaitLabel) -> colored::ColoredString {
    match label {
        ClickbaitLabel::Clickbait => label.as_str().red(),
        ClickbaitLabel::NotClickbait => label.as_str().green(),
    }
}

fn sentiment_colored(label: SentimentLabel) -> colored::ColoredString {
    match label {
        SentimentLabel::Positive => label.as_str().green(),
        SentimentLabel::Negative => label.as_str().red(),
    }
}

/// Highlight keyword occurrences in red, case-insensitively, preserving
/// the original casing of the text.
fn highlight_keyword(text: &str, keyword: &str) -> String {
    if keyword.is_empty() {
        return text.to_string();
    }
    let lower_text = text.to_lowercase();
    let lower_keyword = keyword.to_lowercase();
    // Byte offsets found in the lowercased text only map back onto the
    // original when lowercasing kept the byte length unchanged.
    if lower_text.len() != text.len() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut from = 0;
    while let Some(pos) = lower_text[from..].find(&lower_keyword) {
        let start = from + pos;
        let end = start + lower_keyword.len();
        let (prefix, matched) = match (text.get(last..start), text.get(start..end)) {
            (Some(p), Some(m)) => (p, m),
            _ => return text.to_string(),
        };
        out.push_str(prefix);
        out.push_str(&matched.red().bold().to_string());
        last = end;
        from = end;
    }
    match text.get(last..) {
        Some(rest) => out.push_str(rest),
        None => return text.to_string(),
    }
    out
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        bail!("stdin closed before input was provided");
    }
    Ok(line.trim().to_string())
}

fn prompt_article_choice(max: usize) -> Result<usize> {
    loop {
        let line = prompt_line(&format!(
            "\nEnter the number of the article to inspect (1-{max}): "
        ))?;
        match line.parse::<usize>() {
            Ok(choice) if (1..=max).contains(&choice) => return Ok(choice),
            _ => println!("{}", format!("Invalid number, try again (1-{max}).").red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newshound::SentimentLabel;

    #[test]
    fn test_highlight_keyword_preserves_text_without_colors() {
        colored::control::set_override(false);
        assert_eq!(
            highlight_keyword("Apple iPhone news", "iphone"),
            "Apple iPhone news"
        );
        assert_eq!(highlight_keyword("no match here", "zzz"), "no match here");
        assert_eq!(highlight_keyword("", "x"), "");
        assert_eq!(highlight_keyword("anything", ""), "anything");
        colored::control::unset_override();
    }

    #[test]
    fn test_sample_articles_analyze_cleanly() {
        let model = LexiconModel::load().unwrap();
        let pipeline = Pipeline::new(
            ClickbaitClassifier::new(),
            SentimentClassifier::new(Box::new(model)),
        );
        let annotated = pipeline.run(&sample_articles()).unwrap();
        assert_eq!(annotated.len(), 5);

        let clickbait = annotated
            .iter()
            .filter(|r| r.clickbait == ClickbaitLabel::Clickbait)
            .count();
        assert_eq!(clickbait, 2);
        assert!(annotated
            .iter()
            .any(|r| r.sentiment == SentimentLabel::Negative));
    }

    #[test]
    fn test_significance_marker() {
        assert_eq!(significance_marker(0.01), " (significant)");
        assert_eq!(significance_marker(0.5), "");
    }
}
