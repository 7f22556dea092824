use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to entdump.log
    #[clap(long, default_value_t=false)]
    pub log: bool,

    /// Game directory holding the textures/*.wal files
    #[clap(long, value_parser, value_name = "DIR", default_value = "/quake2/baseq2")]
    pub game_dir: PathBuf,

    /// Map file to dump, or a wildcard pattern for texture inventories only
    #[clap(value_name = "FILE")]
    pub file: Option<String>,
}
