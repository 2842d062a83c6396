use std::io::{self, BufWriter, Read, Write};
use std::ops::ControlFlow;

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use log::info;
use subrip::Subtitle;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Validate and normalise SRT subtitles")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the subtitles will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, the subtitles will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Write a backup of the original input to the specified file."
    )]
    backup: Option<String>,
    #[arg(
        short,
        long,
        help = "Only validate the input and print the number of subtitles found."
    )]
    check: bool,
    #[arg(
        short = 'n',
        long,
        value_name = "COUNT",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Stop after the given number of subtitles."
    )]
    limit: Option<u64>,
    #[arg(
        short,
        long,
        help = "Renumber the subtitles sequentially, starting at 1."
    )]
    renumber: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let data = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    if let Some(backup_path) = &cli.backup {
        std::fs::write(backup_path, &data)
            .context(format!("Failed to write backup file: '{}'", backup_path))?;
    }

    let mut writer: Option<Box<dyn Write>> = if cli.check {
        None
    } else if cli.output == "-" {
        Some(Box::new(BufWriter::new(io::stdout().lock())))
    } else {
        let file = std::fs::File::create(&cli.output)
            .context(format!("Failed to create output file: '{}'", cli.output))?;
        Some(Box::new(BufWriter::new(file)))
    };

    let mut count: usize = 0;
    subrip::parse(data.as_bytes(), |sub| -> Result<ControlFlow<()>, subrip::Error> {
        count += 1;
        let sub = if cli.renumber {
            Subtitle::new(count, sub.start(), sub.end(), sub.into_text())
        } else {
            sub
        };
        if let Some(writer) = writer.as_mut() {
            subrip::encode(&sub, writer)?;
        }
        if cli.limit.map_or(false, |limit| count as u64 >= limit) {
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    })
    .context(format!("Failed to parse SRT file: '{}'", cli.input))?;

    if count == 0 {
        return Err(anyhow!("You appear to have supplied an empty file."));
    }
    info!("Processed {} subtitles", count);

    match writer.as_mut() {
        Some(writer) => writer.flush().context("Failed to write to output file.")?,
        None => println!("{} subtitles OK", count),
    }
    Ok(())
}
