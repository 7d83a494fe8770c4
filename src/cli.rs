//! Command-line arguments.

use std::path::PathBuf;

pub const HELP: &str = "\
flappy3d - Flappy bird in a 3D terminal scene

Usage: flappy3d [options]

Options:
  --config <path>   Read configuration from <path>
  --model <path>    Load the bird model from a JSON file
  --seed <n>        Seed the obstacle generator
  --mute            Start with sound disabled
  --reset-scores    Delete the saved best score and exit
  --dump-config     Print the effective configuration as JSON and exit
  --version, -v     Show version information
  --help, -h        Show this help message

Controls:
  Space / Up / Enter / left click   Flap (restart after a crash)
  P                                 Pause
  M                                 Toggle sound
  Q / Esc                           Quit";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub config_path: Option<PathBuf>,
    pub model_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub mute: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Options),
    DumpConfig(Options),
    ResetScores,
    Version,
    Help,
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut dump_config = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--reset-scores" => return Ok(Command::ResetScores),
            "--dump-config" => dump_config = true,
            "--mute" => options.mute = true,
            "--config" => options.config_path = Some(PathBuf::from(value_for(&arg, &mut args)?)),
            "--model" => options.model_path = Some(PathBuf::from(value_for(&arg, &mut args)?)),
            "--seed" => {
                let raw = value_for(&arg, &mut args)?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed '{}': expected a non-negative integer", raw))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(if dump_config {
        Command::DumpConfig(options)
    } else {
        Command::Play(options)
    })
}

fn value_for(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("Missing value for {}", flag))
}
