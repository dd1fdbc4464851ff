use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn exe_cmd(cmd: &mut Command) -> anyhow::Result<String> {
    let output = cmd.output()?;
    anyhow::ensure!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(String::from_utf8(output.stdout)?)
}

fn main() {
    // 不在git仓库中构建时只缺少提交信息, 不影响编译
    let git_commit_hash = exe_cmd(Command::new("git").args(["log", "-n", "1", "--pretty=format:%h"]))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|e| {
            println!("cargo:warning=cannot get the git commit: {}", e.to_string().trim());
            String::from("unknown")
        });

    println!(
        "cargo:rustc-env=SHABENCH_VERSION_INFO={}-{}-{}",
        env!("CARGO_PKG_VERSION"),
        git_commit_hash,
        DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S")
    );
    println!("cargo:rerun-if-changed=build.rs");
}
