use clap::{ArgMatches, Command};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

pub mod config;
pub use config::BenchConfig;

mod hash;
pub use hash::HashCmd;

mod selftest;
pub use selftest::SelfTestCmd;

mod bench;
pub use bench::BenchCmd;
