use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use shabench::cmd::{BenchCmd, BenchConfig, Cmd, HashCmd, SelfTestCmd};
use shabench::log_error;
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("SHABENCH_VERSION_INFO");
    let app = Command::new("shabench")
        .version(version)
        .about("SHA-384/SHA-512 hashing, self test and benchmark")
        .arg(
            Arg::new("pipe")
                .long("pipe")
                .short('p')
                .action(ArgAction::SetTrue)
                .required(false)
                .help("read the data to hash from stdin"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .action(ArgAction::Set)
                .value_parser(value_parser!(String))
                .required(false)
                .help("config file path, json or json5"),
        )
        .subcommand(HashCmd::cmd())
        .subcommand(SelfTestCmd::cmd())
        .subcommand(BenchCmd::cmd())
        .get_matches();

    BenchConfig::config_with_file(app.get_one::<String>("config").map(|s| s.as_str()));

    let Some((s, m)) = app.subcommand() else {
        println!("{} {}", env!("CARGO_PKG_NAME"), version);
        return ExitCode::SUCCESS;
    };

    let mut pdata = Vec::with_capacity(1024);
    if app.get_flag("pipe") {
        let res = std::io::stdin()
            .lock()
            .read_to_end(&mut pdata)
            .map_err(|e| anyhow::anyhow!("read pipe data failed, due to: {e}"));
        if log_error(res).is_none() {
            return ExitCode::FAILURE;
        }
    }

    let res = match s {
        HashCmd::NAME => HashCmd::new(pdata.as_slice()).run(m),
        SelfTestCmd::NAME => SelfTestCmd::new().run(m),
        BenchCmd::NAME => BenchCmd::new().run(m),
        name => Err(anyhow::anyhow!("unsupport for {}", name)),
    };

    #[cfg(feature = "sec-zeroize")]
    zeroize::Zeroize::zeroize(&mut pdata);

    match log_error(res) {
        Some(()) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    }
}
