//! `markdownify` command-line interface.
//!
//! Reads HTML from files or stdin and writes Markdown to stdout, a file, or
//! one `.md` file per input in an output directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use markdownify::{ConversionError, ConversionOptions, DEFAULT_MAX_DEPTH, ParserMode, convert_reader};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

const MAX_DEPTH_LIMIT: usize = 4096;

/// Convert HTML to Markdown
#[derive(Parser, Debug)]
#[command(
    name = "markdownify",
    version,
    about = "Convert HTML to Markdown",
    long_about = "markdownify - fast HTML to Markdown conversion tuned for chat transcripts.\n\n\
                  Reads HTML from the given files, or from stdin when no file (or '-') is given."
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input HTML files ('-' or none reads stdin)
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Write Markdown to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write one .md file per input into DIR
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Parsing front end
    #[arg(long, value_enum, default_value_t = ParserArg::Html5ever)]
    parser: ParserArg,

    /// Keep runs of spaces and tabs in text
    #[arg(long)]
    preserve_whitespace: bool,

    /// Use the chat transcript preset
    #[arg(long)]
    transcript: bool,

    /// Leave "Copy code" labels and inline tags in code blocks
    #[arg(long)]
    no_code_cleanup: bool,

    /// Clean <pre> blocks in the raw HTML before parsing
    #[arg(long)]
    preclean_code: bool,

    /// Maximum element nesting depth to render (1-4096)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    max_depth: usize,

    /// Input encoding label used when the input has no byte order mark
    #[arg(long, value_name = "LABEL")]
    encoding: Option<String>,

    /// Log debug output to stderr
    #[arg(long)]
    debug: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    generate_completion: Option<Shell>,

    /// Print a man page and exit
    #[arg(long)]
    generate_man: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParserArg {
    /// html5ever tree builder
    Html5ever,
    /// tl tokenizer
    Fast,
}

impl From<ParserArg> for ParserMode {
    fn from(arg: ParserArg) -> Self {
        match arg {
            ParserArg::Html5ever => Self::Html5ever,
            ParserArg::Fast => Self::Fast,
        }
    }
}

fn parse_max_depth(value: &str) -> Result<usize, String> {
    let depth: usize = value
        .parse()
        .map_err(|_| format!("max depth must be a number, got '{value}'"))?;
    if (1..=MAX_DEPTH_LIMIT).contains(&depth) {
        Ok(depth)
    } else {
        Err(format!("max depth must be between 1 and {MAX_DEPTH_LIMIT}"))
    }
}

/// Input source resolved from the positional arguments.
enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn from_args(inputs: &[PathBuf]) -> Vec<Self> {
        if inputs.is_empty() {
            return vec![Self::Stdin];
        }
        inputs
            .iter()
            .map(|path| {
                if path.as_os_str() == "-" {
                    Self::Stdin
                } else {
                    Self::File(path.clone())
                }
            })
            .collect()
    }

    fn describe(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::File(path) => format!("file '{}'", path.display()),
        }
    }

    fn convert(&self, options: &ConversionOptions) -> Result<String, String> {
        let result = match self {
            Self::Stdin => convert_reader(io::stdin().lock(), options),
            Self::File(path) => fs::File::open(path)
                .map_err(ConversionError::from)
                .and_then(|file| convert_reader(file, options)),
        };
        result.map_err(|e| match e {
            ConversionError::Io(io_err) => format!("Error reading {}: {io_err}", self.describe()),
            other => other.to_string(),
        })
    }
}

fn main() {
    if let Err(message) = run() {
        eprintln!("Error: {message}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        let mut command = Cli::command();
        generate(shell, &mut command, "markdownify", &mut io::stdout());
        return Ok(());
    }

    if cli.generate_man {
        let man = clap_mangen::Man::new(Cli::command());
        man.render(&mut io::stdout())
            .map_err(|e| format!("Failed to render man page: {e}"))?;
        return Ok(());
    }

    init_logging(cli.debug)?;

    let options = build_options(&cli);
    let sources = Source::from_args(&cli.inputs);

    if let Some(dir) = &cli.output_dir {
        return convert_into_dir(&sources, dir, &options);
    }

    if cli.output.is_some() && sources.len() > 1 {
        return Err("--output accepts a single input; use --output-dir for several".to_string());
    }

    let mut markdown = String::new();
    for source in &sources {
        markdown.push_str(&source.convert(&options)?);
    }

    match &cli.output {
        Some(path) => fs::write(path, &markdown).map_err(|e| format!("Error writing file '{}': {e}", path.display())),
        None => io::stdout()
            .lock()
            .write_all(markdown.as_bytes())
            .map_err(|e| format!("Error writing to stdout: {e}")),
    }
}

fn init_logging(debug: bool) -> Result<(), String> {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Warn };
    let config = ConfigBuilder::new()
        .add_filter_ignore_str("html5ever")
        .add_filter_ignore_str("markup5ever")
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .map_err(|e| format!("Failed to initialize logging: {e}"))
}

fn build_options(cli: &Cli) -> ConversionOptions {
    let mut options = if cli.transcript {
        ConversionOptions::transcript()
    } else {
        ConversionOptions::default()
    };
    options.parser = cli.parser.into();
    if cli.preserve_whitespace {
        options.clean_whitespaces = false;
    }
    if cli.no_code_cleanup {
        options.cleanup_code_fences = false;
    }
    if cli.preclean_code {
        options.preclean_code_markup = true;
    }
    options.encoding.clone_from(&cli.encoding);
    options.max_depth = cli.max_depth;
    options
}

fn convert_into_dir(sources: &[Source], dir: &Path, options: &ConversionOptions) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Error creating directory '{}': {e}", dir.display()))?;

    for source in sources {
        let Source::File(path) = source else {
            return Err("--output-dir needs file inputs, not stdin".to_string());
        };
        let markdown = source.convert(options)?;
        let stem = path.file_stem().unwrap_or(path.as_os_str()).to_string_lossy();
        let target = dir.join(format!("{stem}.md"));
        log::debug!("{} -> {}", path.display(), target.display());
        fs::write(&target, markdown).map_err(|e| format!("Error writing file '{}': {e}", target.display()))?;
    }
    Ok(())
}
