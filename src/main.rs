use clap::Parser;
use log::LevelFilter;
use snafu::ErrorCompat;

mod args;
mod mcda;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if args.verbose {
        log_builder.filter_level(LevelFilter::Debug);
    }
    log_builder.init();

    let res = mcda::run_analysis(args.config, args.reference, args.out);
    if let Err(e) = res {
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
