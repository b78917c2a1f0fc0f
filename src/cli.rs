use crate::data::{DataPaths, CROSS_SECTIONAL_CSV, LONGITUDINAL_CSV};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (can be repeated: -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (can be repeated: -q for warn, -qq for error)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long,
        value_name = "FILE",
        help = "Path to the cross-sectional CSV",
        short = 'c',
        default_value = CROSS_SECTIONAL_CSV
    )]
    pub cross_sectional: PathBuf,
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to the longitudinal CSV",
        short = 'l',
        default_value = LONGITUDINAL_CSV
    )]
    pub longitudinal: PathBuf,
}

impl Cli {
    pub fn data_paths(&self) -> DataPaths {
        DataPaths {
            cross_sectional: self.cross_sectional.clone(),
            longitudinal: self.longitudinal.clone(),
        }
    }

    /// Log filter directive implied by the -v/-q counts.
    pub fn log_level(&self) -> &'static str {
        match self.verbose as i16 - self.quiet as i16 {
            i16::MIN..=-2 => "error",
            -1 => "warn",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
