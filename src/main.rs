use chrono::NaiveDate;
use clap::{command, Parser};
use colored::Colorize;

use clubsite::config::{self, Overrides};
use clubsite::page::{self, Output};
use clubsite::Bootstrap;

/// Fill a static club site's pages with events, news, rosters and the committee
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The configuration file (defaults to clubsite.toml if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Fetch data from the deployed site at this URL
    #[arg(long, conflicts_with = "site_dir")]
    base_url: Option<String>,

    /// Fetch data from this local build of the site
    #[arg(long)]
    site_dir: Option<String>,

    /// Where the HTML pages live, if not in the site directory
    #[arg(long)]
    pages_dir: Option<String>,

    /// Only render this page file
    #[arg(short, long)]
    page: Option<String>,

    /// Render as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print the rendered pages instead of writing them
    #[arg(long)]
    dry_run: bool,
}

fn run(args: Args) -> Result<(), String> {
    let mut configuration = config::get_configuration(args.config)?;
    configuration.apply(Overrides {
        base_url: args.base_url,
        site_dir: args.site_dir,
        pages_dir: args.pages_dir,
    });

    let bootstrap = Bootstrap::from_configuration(&configuration, args.today)?;
    let pages_dir = configuration.pages_dir()?;
    let output = if args.dry_run {
        Output::DryRun
    } else {
        Output::InPlace
    };

    page::run(
        &bootstrap,
        &configuration.pages,
        &pages_dir,
        args.page.as_deref(),
        output,
    )
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        println!("{}", e.bold().red());
        std::process::exit(1);
    }
}
