mod echo;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use page_zen_core::{CleanedArticle, Extractor, ExtractorConfig, SocialMetadata, fetch_file, fetch_stdin};
use url::Url;

use echo::{
    format_size, print_article_details, print_banner, print_error, print_info, print_step, print_success,
    print_timing, print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base used for file and stdin input when --base-url is not given
const DEFAULT_BASE_URL: &str = "http://localhost/";

/// Clean articles and read link-preview metadata from web pages
#[derive(Parser, Debug)]
#[command(name = "page-zen")]
#[command(version)]
#[command(about = "Clean articles and read link-preview metadata from web pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the readable article, its metadata, and optionally Markdown
    Extract(ExtractArgs),
    /// Read only Open Graph / Twitter Card metadata
    Opengraph(InputArgs),
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Base URL for resolving relative links in file or stdin input
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print progress and details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output the Markdown rendering instead of plain text
    #[arg(long)]
    markdown: bool,

    /// Output the full article as JSON
    #[arg(long)]
    json: bool,
}

/// Where the HTML comes from
enum Source {
    Url(String),
    Html { html: String, base: Url },
}

impl InputArgs {
    fn extractor(&self) -> anyhow::Result<Extractor> {
        let mut builder = ExtractorConfig::builder().timeout(self.timeout).debug_html_path(None);
        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        Extractor::with_config(builder.build()).context("Failed to create HTTP client")
    }

    fn is_url(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }

    fn read_source(&self, total_steps: usize) -> anyhow::Result<Source> {
        if self.is_url() {
            if self.verbose {
                print_step(1, total_steps, &format!("Fetching {}", self.input.bright_white().underline()));
            }
            return Ok(Source::Url(self.input.clone()));
        }

        let html = if self.input == "-" {
            if self.verbose {
                print_step(1, total_steps, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")?
        } else {
            if self.verbose {
                print_step(1, total_steps, &format!("Reading from file {}", self.input.bright_white()));
            }
            fetch_file(&self.input).with_context(|| format!("Failed to read file: {}", self.input))?
        };

        if self.verbose {
            eprintln!("  {} {}", "Size:".dimmed(), format_size(html.len()).bright_white());
        }

        let base = match &self.base_url {
            Some(raw) => Url::parse(raw).with_context(|| format!("Invalid --base-url: {}", raw))?,
            None => {
                if self.verbose {
                    print_warning(&format!("No --base-url given, resolving links against {}", DEFAULT_BASE_URL));
                }
                Url::parse(DEFAULT_BASE_URL)?
            }
        };

        Ok(Source::Html { html, base })
    }

    fn write_output(&self, output: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
                print_success(&format!("Output written to {}", path.display().bright_white()));
            }
            None => {
                println!("{}", output);
            }
        }
        Ok(())
    }
}

async fn run_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let input = &args.input;
    let extractor = input.extractor()?;
    let started = Instant::now();

    let source = input.read_source(3)?;

    if input.verbose {
        print_step(2, 3, "Cleaning article");
    }

    let article = match source {
        Source::Url(url) => extractor.extract_article(&url).await,
        Source::Html { html, base } => extractor.clean_html(&html, base.as_str(), &base),
    }
    .context("Failed to extract article")?;

    if input.verbose {
        print_timing("Extraction", started.elapsed());
        print_article_details(&article);
        print_step(3, 3, "Writing output");
    }

    input.write_output(&render_article(article, args.markdown, args.json)?)
}

fn render_article(mut article: CleanedArticle, markdown: bool, json: bool) -> anyhow::Result<String> {
    if json {
        if !markdown {
            article.markdown = None;
        }
        return serde_json::to_string_pretty(&article).context("Failed to serialize article");
    }

    if markdown {
        return Ok(article.markdown.unwrap_or_default());
    }

    Ok(format!("{}\n\n{}", article.title, article.content))
}

async fn run_opengraph(args: InputArgs) -> anyhow::Result<()> {
    let extractor = args.extractor()?;
    let started = Instant::now();

    let source = args.read_source(2)?;
    let metadata: SocialMetadata = match source {
        Source::Url(url) => extractor
            .extract_metadata(&url)
            .await
            .context("Failed to extract metadata")?,
        Source::Html { html, base } => extractor.metadata_from_html(&html, base.as_str(), &base),
    };

    if args.verbose {
        print_timing("Metadata", started.elapsed());
        print_step(2, 2, "Writing output");
    }

    let output = serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;
    args.write_output(&output)
}

fn verbose(command: &Command) -> bool {
    match command {
        Command::Extract(args) => args.input.verbose,
        Command::Opengraph(args) => args.verbose,
        Command::Completions { .. } => false,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if verbose(&cli.command) {
        print_banner();
        print_info("Verbose output enabled");
        eprintln!();
    }

    let result = match cli.command {
        Command::Extract(args) => run_extract(args).await,
        Command::Opengraph(args) => run_opengraph(args).await,
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "page-zen", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
