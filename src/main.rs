use clap::Parser;
use ls8_emulator::emulator;
use std::error::Error;
use std::path::PathBuf;

/// LS-8 emulator: runs a program of newline separated 8 digit binary bytes.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Program file to execute
    #[arg(value_name = "PROGRAM")]
    program: PathBuf,

    /// Log the machine state before every instruction
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Minimum level of log messages written to stderr
    #[arg(long, value_name = "LEVEL", default_value_t = log::LevelFilter::Warn)]
    log_level: log::LevelFilter,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.trace {
        log::LevelFilter::Trace
    } else {
        args.log_level
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .map_err(Box::<dyn Error>::from)?;

    let mut emu = emulator::from_program(&args.program).map_err(Box::<dyn Error>::from)?;
    emu.execute().map_err(Box::<dyn Error>::from)
}
