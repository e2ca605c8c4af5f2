use std::path::PathBuf;
use std::process::ExitCode;

use arbor::{ArborError, DocumentBuilder, SourceFormat, parse_selector};
use clap::Parser;

/// Query an XML or JSON file with a CSS3-style selector.
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// XML or JSON document to query
    file: PathBuf,

    /// Selector, e.g. "catalog > book[lang|=en] title"
    selector: String,

    /// Document format
    #[arg(short, long, value_enum, default_value_t = SourceFormat::Auto)]
    format: SourceFormat,

    /// Match the first step against the root's direct children only
    #[arg(long)]
    children: bool,

    /// Print the concatenated text of the matches instead of one line per node
    #[arg(long, conflicts_with = "count")]
    data: bool,

    /// Print the number of matches
    #[arg(long)]
    count: bool,

    /// Keep whitespace-only XML text nodes
    #[arg(long)]
    keep_whitespace: bool,
}

fn run(cli: &Cli) -> Result<(), ArborError> {
    // Reject bad selectors before touching the file.
    let selector = parse_selector(&cli.selector)?;

    let source = DocumentBuilder::new()
        .with_format(cli.format)
        .with_whitespace(cli.keep_whitespace)
        .from_file(&cli.file)?;
    let document = source.parse()?;
    let root = document.root();

    let matches = if cli.children {
        root.select_children(&selector)?
    } else {
        root.select(&selector)?
    };
    log::info!("{} match(es) for '{}'", matches.len(), selector);

    if cli.count {
        println!("{}", matches.len());
    } else if cli.data {
        println!("{}", matches.data().unwrap_or_default());
    } else {
        for node in &matches {
            println!("{node}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("arbor: {e}");
            ExitCode::FAILURE
        }
    }
}
