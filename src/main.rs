use std::path::PathBuf;
use std::process::ExitCode;

use cfglayer::colors::{stderr_is_terminal, stdout_is_terminal};
use cfglayer::{collect_sources, run, should_use_colors, Colors, OutputContext, OutputFormat, Query};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cfglayer")]
#[command(version, about = "Resolve layered INI-style tool configuration")]
struct Cli {
    /// Config files in merge order (later files win); discovered from the
    /// current directory when omitted
    files: Vec<PathBuf>,

    /// Print one option value
    #[arg(long, num_args = 2, value_names = ["SECTION", "KEY"], conflicts_with_all = ["sections", "rules"])]
    get: Option<Vec<String>>,

    /// Value to print when the --get option is absent
    #[arg(long, value_name = "VALUE", requires = "get")]
    default: Option<String>,

    /// List section names
    #[arg(long, conflicts_with = "rules")]
    sections: bool,

    /// Print the enabled rules of a linter section
    #[arg(long, value_name = "SECTION", requires = "known_rules")]
    rules: Option<String>,

    /// Comma-separated names of every rule the linter knows
    #[arg(long, value_name = "RULES", value_delimiter = ',')]
    known_rules: Vec<String>,

    /// Only dump this section
    #[arg(short, long, value_name = "NAME")]
    section: Option<String>,

    /// Output format for dumps
    #[arg(short, long, value_enum, default_value_t = Format::Ini)]
    format: Format,

    /// Annotate each option with the file and line it came from
    #[arg(long)]
    origins: bool,

    /// Skip listed files that do not exist instead of failing
    #[arg(long)]
    allow_missing: bool,

    /// Force colored output
    #[arg(long)]
    color: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ini,
    Toml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let use_colors = should_use_colors(cli.color, cli.no_color, stdout_is_terminal());
    let format = match cli.format {
        Format::Ini => OutputFormat::Ini,
        Format::Toml => OutputFormat::Toml,
    };
    let ctx = OutputContext::new(format, use_colors, cli.origins);

    let start_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let sources = collect_sources(&cli.files, cli.allow_missing, &start_dir);
    let query = build_query(&cli);

    match run(sources, &query, &ctx) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let colors = Colors::new(should_use_colors(
                cli.color,
                cli.no_color,
                stderr_is_terminal(),
            ));
            eprintln!("{}Error:{} {e}", colors.error, colors.reset());
            ExitCode::from(1)
        }
    }
}

fn build_query(cli: &Cli) -> Query {
    if let Some([section, key]) = cli.get.as_deref() {
        return Query::Get {
            section: section.clone(),
            key: key.clone(),
            default: cli.default.clone(),
        };
    }
    if cli.sections {
        return Query::Sections;
    }
    if let Some(section) = &cli.rules {
        return Query::Rules {
            section: section.clone(),
            known: cli.known_rules.clone(),
        };
    }
    Query::Dump {
        section: cli.section.clone(),
    }
}

/// Log to stderr. Defaults to warnings (or `RUST_LOG`); each `-v` raises the level.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
