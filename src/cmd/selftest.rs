use crate::cmd::Cmd;
use crate::error::BenchError;
use clap::{Arg, ArgAction, ArgMatches, Command};
use crypto_hash::sha2::self_test_with;

#[derive(Default)]
pub struct SelfTestCmd;

impl SelfTestCmd {
    pub fn new() -> Self {
        Self
    }

    /// 每个用例的结果在`verbose`时以info级别记录
    fn report_level(verbose: bool) -> log::Level {
        if verbose {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }

    /// 自检并返回输出内容, `verbose`时包含每个用例的结果
    fn check(verbose: bool) -> Result<String, BenchError> {
        let mut out = String::new();
        let res = self_test_with(|mode, idx, passed| {
            let line = format!(
                "  {mode} test {idx}: {}",
                if passed { "passed" } else { "failed" }
            );
            log::log!(Self::report_level(verbose), "{}", line.trim());
            if verbose {
                out.push_str(&line);
                out.push('\n');
            }
        });

        match res {
            Ok(()) => Ok(out),
            Err(e) => {
                if verbose {
                    print!("{out}");
                }
                Err(BenchError::SelfTest(e.to_string()))
            }
        }
    }
}

impl Cmd for SelfTestCmd {
    const NAME: &'static str = "selftest";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("check SHA-384/SHA-512 against the FIPS 180-2 test vectors")
            .arg(
                Arg::new("verbose")
                    .long("verbose")
                    .short('v')
                    .action(ArgAction::SetTrue)
                    .required(false)
                    .help("print the result of each test vector"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let verbose = m.get_flag("verbose");
        let out = Self::check(verbose)?;
        if verbose {
            println!("{out}");
        } else {
            log::info!("self test passed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SelfTestCmd;
    use crate::cmd::Cmd;

    #[test]
    fn verbose_output() {
        let out = SelfTestCmd::check(true).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "  SHA-384 test 1: passed");
        assert_eq!(lines[5], "  SHA-512 test 3: passed");

        assert!(SelfTestCmd::check(false).unwrap().is_empty());
    }

    #[test]
    fn verbose_results_logged_at_info() {
        assert_eq!(SelfTestCmd::report_level(true), log::Level::Info);
        assert_eq!(SelfTestCmd::report_level(false), log::Level::Debug);
    }

    #[test]
    fn run() {
        let m = SelfTestCmd::cmd().try_get_matches_from(["selftest"]).unwrap();
        assert!(SelfTestCmd::new().run(&m).is_ok());
    }
}
