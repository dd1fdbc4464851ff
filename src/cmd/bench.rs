use crate::bench::{report, Phase};
use crate::cmd::{BenchConfig, Cmd};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use crypto_hash::sha2::Mode;

#[derive(Default)]
pub struct BenchCmd;

impl BenchCmd {
    pub fn new() -> Self {
        Self
    }

    /// 命令行参数覆盖配置中的计时参数
    fn phases(m: &ArgMatches, config: &BenchConfig) -> (Phase, Phase) {
        let mut warmup = config.warmup;
        let mut measure = config.measure;

        if let Some(&ms) = m.get_one::<u64>("warmup-ms") {
            warmup.min_millis = ms;
        }
        if let Some(&ms) = m.get_one::<u64>("measure-ms") {
            measure.min_millis = ms;
        }
        if let Some(&n) = m.get_one::<usize>("min-runs") {
            measure.min_runs = n;
        }

        (warmup, measure)
    }
}

impl Cmd for BenchCmd {
    const NAME: &'static str = "bench";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("measure the mean time and SEM of running the self test vectors")
            .arg(
                Arg::new("mode")
                    .long("mode")
                    .short('m')
                    .action(ArgAction::Set)
                    .value_parser(|s: &str| s.parse::<Mode>())
                    .required(false)
                    .help("only run the vectors of the mode: 384 or 512"),
            )
            .arg(
                Arg::new("warmup-ms")
                    .long("warmup-ms")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(u64))
                    .required(false)
                    .help("minimum warm up milliseconds"),
            )
            .arg(
                Arg::new("measure-ms")
                    .long("measure-ms")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(u64))
                    .required(false)
                    .help("minimum measure milliseconds"),
            )
            .arg(
                Arg::new("min-runs")
                    .long("min-runs")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(usize))
                    .required(false)
                    .help("minimum measure runs"),
            )
            .arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .required(false)
                    .help("output the report in json"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (warmup, measure) = Self::phases(m, BenchConfig::config());
        let mode = m.get_one::<Mode>("mode").copied();

        let r = report(&warmup, &measure, mode);
        if m.get_flag("json") {
            println!("{}", serde_json::to_string_pretty(&r)?);
        } else {
            println!("{r}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::BenchCmd;
    use crate::bench::Phase;
    use crate::cmd::{BenchConfig, Cmd};
    use crypto_hash::sha2::Mode;

    #[test]
    fn args_override_config() {
        let config = BenchConfig::default();
        let m = BenchCmd::cmd()
            .try_get_matches_from(["bench", "--measure-ms", "10", "--min-runs", "3", "-m", "sha-384"])
            .unwrap();
        let (warmup, measure) = BenchCmd::phases(&m, &config);

        assert_eq!(warmup, config.warmup);
        assert_eq!(
            measure,
            Phase {
                min_millis: 10,
                min_runs: 3
            }
        );
        assert_eq!(m.get_one::<Mode>("mode"), Some(&Mode::SHA384));
    }

    #[test]
    fn invalid_mode() {
        assert!(BenchCmd::cmd()
            .try_get_matches_from(["bench", "--mode", "256"])
            .is_err());
    }

    #[test]
    fn run_quick() {
        let m = BenchCmd::cmd()
            .try_get_matches_from([
                "bench",
                "--warmup-ms",
                "0",
                "--measure-ms",
                "0",
                "--min-runs",
                "1",
                "--mode",
                "384",
                "--json",
            ])
            .unwrap();
        assert!(BenchCmd::new().run(&m).is_ok());
    }
}
