use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

/// Verbosity of diagnostic logging. Independent of `--verbose`, which only
/// controls the nonmatching file listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ArgEnum)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}
impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about = "Compresses the files in the uncompressed directory and compares them to the files in the compressed directory.",
    long_about = "
    Every file under the uncompressed directory is compressed with `lzkn64 -c` into a
    temporary directory that mirrors its layout. Each freshly compressed file is then
    compared byte for byte with the file at the same relative path in the compressed
    directory. The temporary directory is always removed before exiting.

    Exits with 0 when every file matches and 1 otherwise."
)]
pub struct VerifyOpts {
    /// The directory containing the uncompressed files
    #[clap(long = "uncompressed_dir", default_value = "uncompressed")]
    pub uncompressed_dir: PathBuf,

    /// The directory containing the compressed files
    #[clap(long = "compressed_dir", default_value = "compressed")]
    pub compressed_dir: PathBuf,

    /// The temporary directory to store the compressed files in
    #[clap(long = "temp_dir", default_value = "recompressed")]
    pub temp_dir: PathBuf,

    /// The path to the lzkn64 executable
    #[clap(long = "lzkn64", default_value = "../build/lzkn64")]
    pub lzkn64: PathBuf,

    /// Prints the names of nonmatching files on failure
    #[clap(long)]
    pub verbose: bool,

    /// Also fail when the compressor exits with a nonzero status
    #[clap(long)]
    pub strict: bool,

    /// Diagnostic log level
    #[clap(short = 'l', long = "log-level", arg_enum, default_value = "warnings")]
    pub log_level: Verbosity,
}

impl VerifyOpts {
    pub fn new() -> Self {
        Self {
            uncompressed_dir: PathBuf::from("uncompressed"),
            compressed_dir: PathBuf::from("compressed"),
            temp_dir: PathBuf::from("recompressed"),
            lzkn64: PathBuf::from("../build/lzkn64"),
            verbose: false,
            strict: false,
            log_level: Verbosity::Warnings,
        }
    }
}

impl Default for VerifyOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the command line, set the log level and report the settings.
pub fn verify_opts_init() -> VerifyOpts {
    let opts = VerifyOpts::parse();

    // Set the log level
    log::set_max_level(opts.log_level.level_filter());

    info!("---- lzkn64 verify initialization start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Uncompressed files from {}", opts.uncompressed_dir.display());
    info!("Reference files from {}", opts.compressed_dir.display());
    info!("Scratch files in {}", opts.temp_dir.display());
    info!("Compressor is {}", opts.lzkn64.display());
    if opts.strict {
        warn!("Strict mode: a nonzero compressor exit status fails the run")
    };
    info!("---- lzkn64 verify initialization end ----");
    opts
}
