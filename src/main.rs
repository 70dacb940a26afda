use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use blockmat::record::{
    read_block, read_matrix, write_block, write_matrix, LineCursor, MatrixColumns, NumericStyle,
};

#[derive(Parser)]
#[command(name = "blockmat")]
#[command(version = "0.1.0")]
#[command(about = "Blocks database alignment and PSSM record tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and re-encode a blocks file
    Block(BlockArgs),

    /// Decode and re-encode a scoring-matrix file
    Matrix(MatrixArgs),
}

#[derive(Args)]
struct BlockArgs {
    /// Blocks file to read
    input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Numeric style for sequence weights
    #[arg(long, value_enum, default_value = "integer")]
    style: Style,
}

#[derive(Args)]
struct MatrixArgs {
    /// Matrix file to read
    input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Numeric style for the weight columns
    #[arg(long, value_enum, default_value = "integer")]
    style: Style,

    /// Emit only the A/C/G/T columns
    #[arg(long)]
    nucleotide: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Integer,
    Float,
}

impl From<Style> for NumericStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Integer => NumericStyle::Integer,
            Style::Float => NumericStyle::Float,
        }
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn run_block(args: BlockArgs) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let mut cursor = LineCursor::new(BufReader::new(file));
    let mut out = open_output(args.output.as_ref())?;
    let mut count = 0usize;
    while let Some(decoded) = read_block(&mut cursor)? {
        for diagnostic in &decoded.diagnostics {
            eprintln!("{}: {}", args.input.display(), diagnostic);
        }
        write_block(&mut out, &decoded.record, args.style.into())?;
        count += 1;
    }
    eprintln!("{count} block(s) re-encoded");
    Ok(())
}

fn run_matrix(args: MatrixArgs) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let mut cursor = LineCursor::new(BufReader::new(file));
    let mut out = open_output(args.output.as_ref())?;
    let columns = if args.nucleotide {
        MatrixColumns::Nucleotide
    } else {
        MatrixColumns::Full
    };
    let mut count = 0usize;
    while let Some(decoded) = read_matrix(&mut cursor)? {
        for diagnostic in &decoded.diagnostics {
            eprintln!("{}: {}", args.input.display(), diagnostic);
        }
        write_matrix(&mut out, &decoded.record, args.style.into(), columns)?;
        count += 1;
    }
    eprintln!("{count} matrix record(s) re-encoded");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Block(args) => run_block(args)?,
        Commands::Matrix(args) => run_matrix(args)?,
    }
    Ok(())
}
