mod echo;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use vitrina_core::{
    Extractor, ExtractorConfig, FetchConfig, JsonConfig, Page, ProductSelectors, ProfileLoader, ProfileLoaderBuilder,
    ProfileParser, SiteProfile, TextConfig, convert_to_json, convert_to_text, fetch_file, fetch_page, fetch_stdin,
    parse_product_url,
};

use crate::echo::{
    format_size, print_banner, print_detail, print_step, print_success, print_timing_summary, print_warning,
};

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the extracted product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Extract name, price, description and images from a product page
#[derive(Parser, Debug)]
#[command(name = "vitrina")]
#[command(author = "Vitrina Contributors")]
#[command(version)]
#[command(about = "Extract product details from e-commerce pages", long_about = None)]
struct Args {
    /// Product URL, saved HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Wrap the description at this many columns (0 = no wrapping)
    #[arg(long, default_value = "0", value_name = "COLS")]
    width: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Site profile file overriding the built-in selectors
    #[arg(long, value_name = "FILE")]
    site_config: Option<PathBuf>,

    /// Directory of per-domain site profiles
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Show progress and timings on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn is_url(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }
}

/// Picks the selector table: explicit file, then per-domain lookup, then built-in.
fn resolve_profile(args: &Args) -> anyhow::Result<SiteProfile> {
    if let Some(path) = &args.site_config {
        return ProfileParser::parse_file(path).with_context(|| format!("Failed to load site profile {}", path.display()));
    }

    if !args.is_url() {
        return Ok(SiteProfile::new());
    }

    let mut loader = match &args.config_dir {
        Some(dir) => ProfileLoaderBuilder::new().custom_dir(dir).build(),
        None => ProfileLoader::default(),
    };

    let profile = loader.load_for_url(&args.input).context("Failed to look up site profile")?;

    if profile.is_empty()
        && let Ok(url) = parse_product_url(&args.input)
        && let Some(host) = url.host_str()
        && !host.contains("mercadolibre")
    {
        print_warning(&format!("No site profile for {}, using the built-in MercadoLibre selectors", host));
    }

    Ok(profile)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();
    let mut timings = Vec::new();

    if args.verbose {
        print_banner();
    }

    let profile = resolve_profile(&args)?;
    let selectors = ProductSelectors::compile(&profile).context("Invalid site profile")?;

    let step_start = Instant::now();
    let page: Page = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else if args.is_url() {
        if args.verbose {
            print_step(
                1,
                3,
                &format!("Fetching {}", args.input.bright_white().underline()),
            );
        }

        let fetch = FetchConfig {
            timeout: args.timeout,
            user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
            headers: profile.header_pairs(),
        };

        fetch_page(&args.input, &fetch).await.context("Failed to fetch product page")?
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };
    timings.push(("Fetch", step_start.elapsed()));

    if args.verbose {
        print_detail("Size", &format_size(page.html.len()));
        eprintln!();
        print_step(2, 3, "Extracting product fields");
    }

    let step_start = Instant::now();
    let config = ExtractorConfig::builder().selectors(selectors).build();
    let extractor = Extractor::new(page, &config);
    let product = extractor.all_attributes();
    timings.push(("Extract", step_start.elapsed()));

    if args.verbose {
        if let Some(title) = extractor.document().title() {
            print_detail("Title", title.trim());
        }
        print_detail("Images", &product.images.len().to_string());
        eprintln!();
        print_step(3, 3, "Writing output");
    }

    let source = Some(extractor.url());
    let output = match args.format {
        OutputFormat::Text => {
            let config = TextConfig { line_width: args.width, include_source: args.verbose };
            convert_to_text(&product, source, &config)
        }
        OutputFormat::Json => {
            let config = JsonConfig { pretty: args.pretty, include_source: true };
            convert_to_json(&product, source, &config).context("Failed to serialize product")?
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
            if args.format == OutputFormat::Json {
                println!();
            }
        }
    }

    if args.verbose {
        eprintln!();
        print_timing_summary(total_start.elapsed(), &timings);
    }

    Ok(())
}
