//! Console clipboard-history client entrypoint.

use clap::Parser;
use clipshelf_core::Config;

#[derive(Parser, Debug)]
#[command(name = "clipshelf", about = "Clipboard history console", version)]
struct Cli {
    /// Start with an empty history instead of the demo clips.
    #[arg(long)]
    no_seed: bool,

    /// Directory that `export-file` writes into.
    #[arg(long, env = "CLIPSHELF_EXPORT_DIR")]
    export_dir: Option<String>,

    /// Age in days past which `cleanup` removes unpinned clips.
    #[arg(long)]
    cleanup_days: Option<u32>,
}

impl Cli {
    fn into_config(self, mut config: Config) -> Config {
        if self.no_seed {
            config.demo_seed = false;
        }
        if let Some(export_dir) = self.export_dir {
            config.export_dir = export_dir;
        }
        if let Some(days) = self.cleanup_days {
            config.cleanup_days = days;
        }
        config
    }
}

fn main() {
    let config = Cli::parse().into_config(Config::from_env());
    let exit_code = run_and_report(|| clipshelf_client::run(config));
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run_and_report<F, E>(runner: F) -> i32
where
    F: FnOnce() -> Result<(), E>,
    E: std::fmt::Display,
{
    match runner() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("clipshelf error: {}", err);
            1
        }
    }
}
