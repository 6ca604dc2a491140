mod args;
mod probe;
mod resolve;
mod sweep;

use anyhow::Result;
use clap::Parser;

use crate::args::{Arguments, Config};
use crate::probe::PingProbe;
use crate::resolve::SystemResolver;

fn main() -> Result<()> {
    let args = Arguments::parse();
    let config = Config::from_args(args);

    sweep::run(&config, &PingProbe, &SystemResolver)
}
