use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::graph_dump::{GraphDump, write_graph_dump};
use crate::visualize;

#[derive(Parser, Debug)]
#[command(name = "jgv", version, about = "JSON structure visualizer (graph build + layered layout)")]
pub struct Args {
    /// Input file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the graph dump. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Pretty-print the dump
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Fail on the first parse error instead of attempting a repair pass
    #[arg(long = "no-repair")]
    pub no_repair: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if args.no_repair {
        config.repair = false;
    }

    let input = read_input(args.input.as_deref())?;
    let layout = visualize(&input, &config)?;
    let dump = GraphDump::from_layout(&layout, &config.theme);

    match &args.output {
        Some(path) => write_graph_dump(path, &dump, args.pretty)?,
        None => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&dump)?
            } else {
                serde_json::to_string(&dump)?
            };
            let mut out = io::stdout().lock();
            out.write_all(json.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
