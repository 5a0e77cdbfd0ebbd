use clap::Parser;

/// This is a multi-criteria decision ranking program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the analysis description in JSON format: criteria with
    /// their benefit/cost polarity, the importance order of the criteria, and the decision data
    /// (inline or as a reference to a CSV file).
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A reference file containing the expected summary of an analysis in JSON
    /// format. If provided, topsisrank will check that the computed ranking matches the
    /// reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written
    /// in JSON format to the given location. Setting this option overrides the path that may be
    /// specified in the configuration file.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
