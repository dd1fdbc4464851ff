use crate::cmd::{BenchConfig, Cmd};
use crate::error::BenchError;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use crypto_hash::sha2::{HashContext, Mode};
use crypto_hash::Output;
use rayon::prelude::*;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

fn common_cmd(name: &str) -> Command {
    Command::new(name.to_string())
        .arg(
            Arg::new("str")
                .value_name("STRING")
                .action(ArgAction::Set)
                .value_parser(value_parser!(String))
                .required(false)
                .help("hash string"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .required(false)
                .help("to specified the file path, each file is hashed separately if more than one"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("display prefix with `0x`"),
        )
}

fn hash_file(ctx: &mut HashContext, path: &Path, buf_size: usize) -> anyhow::Result<()> {
    if !path.exists() {
        return Err(BenchError::PathNotExist(path.display().to_string()).into());
    }
    if !path.is_file() {
        return Err(BenchError::NotAFile(path.display().to_string()).into());
    }

    let mut f = File::open(path)?;
    let mut buf = vec![0u8; buf_size.max(1)];
    loop {
        let n = match f.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        ctx.update(&buf[..n])?;
    }

    Ok(())
}

fn format_digest(d: &Output, prefix: bool) -> String {
    if prefix {
        format!("{:#x}", d)
    } else {
        format!("{:x}", d)
    }
}

/// 将管道数据, 字符串和文件依次写入同一个哈希上下文, 生成一个摘要.<br>
/// 指定多个文件时, 每个文件使用独立的上下文并行计算摘要, 管道数据和字符串(如有)单独输出一个摘要.<br>
///
/// 返回待输出的行和无法计算摘要的文件个数.
fn common_run(mode: Mode, pipe: &[u8], m: &ArgMatches) -> anyhow::Result<(Vec<String>, usize)> {
    let config = BenchConfig::config();
    let prefix = m.get_flag("prefix");
    let s = m.get_one::<String>("str");
    let files = m
        .get_many::<PathBuf>("file")
        .map(|x| x.collect::<Vec<_>>())
        .unwrap_or_default();

    if files.len() <= 1 {
        let mut h = HashContext::new(mode);
        h.update(pipe)?;

        if let Some(x) = s {
            h.update(x.as_bytes())?;
        }

        if let Some(f) = files.first() {
            hash_file(&mut h, f, config.io_buf_size)?;
        }

        return Ok((vec![format_digest(&h.finish(), prefix)], 0));
    }

    let mut lines = Vec::with_capacity(files.len() + 1);
    if !pipe.is_empty() || s.is_some() {
        let mut h = HashContext::new(mode);
        h.update(pipe)?;
        if let Some(x) = s {
            h.update(x.as_bytes())?;
        }
        lines.push(format!("{}  -", format_digest(&h.finish(), prefix)));
    }

    log::debug!("hash {} files with {} threads", files.len(), config.threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let digests = pool.install(|| {
        files
            .par_iter()
            .map(|f| -> anyhow::Result<Output> {
                let mut h = HashContext::new(mode);
                hash_file(&mut h, f, config.io_buf_size)?;
                Ok(h.finish())
            })
            .collect::<Vec<_>>()
    });

    let mut failed = 0usize;
    for (f, d) in files.iter().zip(digests) {
        match d {
            Ok(d) => lines.push(format!("{}  {}", format_digest(&d, prefix), f.display())),
            Err(e) => {
                log::error!("{}: {e}", f.display());
                failed += 1;
            }
        }
    }

    Ok((lines, failed))
}

macro_rules! impl_sha2_cmd {
    ($([$TYPE: ident, $MODE: expr, $NAME: literal]),+) => {
        $(
            #[derive(Default)]
            pub struct $TYPE {
                pipe: Vec<u8>,
            }

            impl $TYPE {
                pub fn new(pipe: &[u8]) -> Self {
                    Self {
                        pipe: pipe.to_vec(),
                    }
                }
            }

            #[cfg(feature = "sec-zeroize")]
            impl Drop for $TYPE {
                fn drop(&mut self) {
                    self.pipe.zeroize();
                }
            }

            impl Cmd for $TYPE {
                const NAME: &'static str = $NAME;

                fn cmd() -> Command {
                    common_cmd(Self::NAME).about($MODE.name())
                }

                fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
                    let (lines, failed) = common_run($MODE, self.pipe.as_slice(), m)?;
                    for line in lines {
                        println!("{line}");
                    }
                    anyhow::ensure!(failed == 0, "{failed} file(s) cannot be hashed");
                    Ok(())
                }
            }
        )+
    };
}

impl_sha2_cmd!(
    [SHA2_384Cmd, Mode::SHA384, "s2-384"],
    [SHA2_512Cmd, Mode::SHA512, "s2-512"]
);

#[derive(Default)]
pub struct HashCmd {
    pipe: Vec<u8>,
}

impl HashCmd {
    pub fn new(pipe: &[u8]) -> Self {
        Self {
            pipe: pipe.to_vec(),
        }
    }
}

#[cfg(feature = "sec-zeroize")]
impl Drop for HashCmd {
    fn drop(&mut self) {
        self.pipe.zeroize();
    }
}

impl Cmd for HashCmd {
    const NAME: &'static str = "h";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("hash command")
            .subcommand_required(true)
            .subcommand(SHA2_384Cmd::cmd())
            .subcommand(SHA2_512Cmd::cmd())
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        match m.subcommand() {
            Some((SHA2_384Cmd::NAME, m)) => SHA2_384Cmd::new(self.pipe.as_slice()).run(m),
            Some((SHA2_512Cmd::NAME, m)) => SHA2_512Cmd::new(self.pipe.as_slice()).run(m),
            Some((other, _m)) => anyhow::bail!("not support the {other} hash algorithm"),
            None => anyhow::bail!("need to specified the hash algorithm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{common_run, HashCmd};
    use crate::cmd::Cmd;
    use crypto_hash::sha2::Mode;
    use std::io::Write;

    fn matches(args: &[&str]) -> clap::ArgMatches {
        let m = HashCmd::cmd().try_get_matches_from(args).unwrap();
        let (_, sub) = m.subcommand().unwrap();
        sub.clone()
    }

    #[test]
    fn pipe_and_string_are_concatenated() {
        let m = matches(&["h", "s2-512", "bc"]);
        let (out, _) = common_run(Mode::SHA512, b"a", &m).unwrap();
        assert_eq!(out, vec![format!("{:x}", Mode::SHA512.digest(b"abc"))]);
    }

    #[test]
    fn prefix() {
        let m = matches(&["h", "s2-384", "abc", "--prefix"]);
        let (out, _) = common_run(Mode::SHA384, &[], &m).unwrap();
        assert_eq!(out, vec![format!("{:#x}", Mode::SHA384.digest(b"abc"))]);
        assert!(out[0].starts_with("0xcb00753f"));
    }

    #[test]
    fn single_file() {
        let data = vec![b'a'; 5000];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        let m = matches(&["h", "s2-512", "-f", file.path().to_str().unwrap()]);
        let (out, failed) = common_run(Mode::SHA512, &[], &m).unwrap();
        assert_eq!(failed, 0);

        assert_eq!(out, vec![format!("{:x}", Mode::SHA512.digest(&data))]);
    }

    #[test]
    fn missing_file() {
        let m = matches(&["h", "s2-512", "-f", "/nonexistent/shabench/file"]);
        let err = common_run(Mode::SHA512, &[], &m).unwrap_err();
        assert!(err.to_string().contains("not exist"));
    }

    #[test]
    fn multiple_files_are_hashed_separately() {
        let dir = tempfile::tempdir().unwrap();
        let (p1, p2) = (dir.path().join("multi1.bin"), dir.path().join("multi2.bin"));
        std::fs::write(&p1, b"abc").unwrap();
        std::fs::write(&p2, vec![0u8; 300]).unwrap();

        let m = matches(&[
            "h",
            "s2-384",
            "-f",
            p1.to_str().unwrap(),
            "-f",
            p2.to_str().unwrap(),
            "-f",
            "/nonexistent/shabench/file",
        ]);
        let (out, failed) = common_run(Mode::SHA384, &[], &m).unwrap();

        assert_eq!(failed, 1);
        assert_eq!(
            out,
            vec![
                format!("{:x}  {}", Mode::SHA384.digest(b"abc"), p1.display()),
                format!("{:x}  {}", Mode::SHA384.digest(&[0u8; 300]), p2.display()),
            ]
        );
    }

    #[test]
    fn subcommand_required() {
        assert!(HashCmd::cmd().try_get_matches_from(["h"]).is_err());
    }
}
