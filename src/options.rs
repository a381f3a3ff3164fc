use std::path::PathBuf;

use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(about = "Prints the output type of every field in a GraphQL result")]
pub struct Options {
    /// Path of the config file
    #[structopt(long, parse(from_os_str), default_value = "typehint.toml")]
    pub config: PathBuf,

    /// Schema file, SDL or an introspection result ending in `.json`
    #[structopt(long, parse(from_os_str))]
    pub schema: Option<PathBuf>,

    /// Query file
    #[structopt(long, parse(from_os_str))]
    pub query: PathBuf,

    /// Only annotate the named operation
    #[structopt(long)]
    pub operation: Option<String>,

    /// Print the hover type at a dot separated result path instead of the whole map
    #[structopt(long)]
    pub path: Option<String>,

    /// Fail when a fragment cannot be resolved
    #[structopt(long)]
    pub strict: bool,
}
