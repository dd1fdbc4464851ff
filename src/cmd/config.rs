use std::path::PathBuf;
use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

use crate::bench::Phase;
use crate::error::BenchError;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct BenchConfig {
    // byte size
    pub io_buf_size: usize,

    // maximum creatable threads
    pub threads: usize,

    pub warmup: Phase,

    pub measure: Phase,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            io_buf_size: 8 * 1024,
            threads: (num_cpus::get() >> 1).max(1),
            warmup: Phase {
                min_millis: 100,
                min_runs: 2,
            },
            measure: Phase {
                min_millis: 2000,
                min_runs: 5,
            },
        }
    }
}

impl BenchConfig {
    pub fn config() -> &'static Self {
        Self::config_with_file(None)
    }

    /// 只有第一次调用时`f`才起作用. 加载失败会记录错误并使用默认配置.
    pub fn config_with_file(f: Option<&str>) -> &'static Self {
        static CONFIG: OnceLock<BenchConfig> = OnceLock::new();

        CONFIG.get_or_init(|| {
            let file = f.map(PathBuf::from).or_else(Self::default_file);
            match Self::load(file.as_deref().and_then(|p| p.to_str())) {
                Ok(c) => c,
                Err(e) => {
                    log::error!("{e}, use the default config");
                    Self::default()
                }
            }
        })
    }

    /// `~/.config/shabench/config`, 扩展名可以是`json`或`json5`
    pub fn default_file() -> Option<PathBuf> {
        let mut path = home::home_dir()?;
        path.push(".config");
        path.push("shabench");
        path.push("config");
        Some(path)
    }

    /// 依次叠加默认值, 配置文件`f`(不存在时忽略), 以及`SHABENCH__`前缀的环境变量.
    pub fn load(f: Option<&str>) -> Result<Self, BenchError> {
        let default_config =
            Config::try_from(&BenchConfig::default()).map_err(|e| BenchError::Config(e.to_string()))?;

        let mut config = Config::builder().add_source(default_config);

        if let Some(f) = f {
            config = config.add_source(config::File::with_name(f).required(false));
        }

        config = config.add_source(
            config::Environment::with_prefix("SHABENCH")
                .try_parsing(true)
                .separator("__"),
        );

        let mut bench_config: BenchConfig = config
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| BenchError::Config(e.to_string()))?;

        bench_config.threads = bench_config.threads.max(1);
        bench_config.io_buf_size = bench_config.io_buf_size.max(1);

        log::trace!("{:?}", bench_config);

        Ok(bench_config)
    }
}

#[cfg(test)]
mod tests {
    use super::BenchConfig;

    #[test]
    fn defaults() {
        let c = BenchConfig::default();
        assert_eq!(c.io_buf_size, 8 * 1024);
        assert!(c.threads >= 1);
        assert_eq!(c.warmup.min_millis, 100);
        assert_eq!(c.warmup.min_runs, 2);
        assert_eq!(c.measure.min_millis, 2000);
        assert_eq!(c.measure.min_runs, 5);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"io_buf_size": 0, "measure": {"min_millis": 10, "min_runs": 3}}"#,
        )
        .unwrap();

        let c = BenchConfig::load(path.to_str()).unwrap();

        assert_eq!(c.io_buf_size, 1);
        assert_eq!(c.measure.min_millis, 10);
        assert_eq!(c.measure.min_runs, 3);
        assert_eq!(c.warmup, BenchConfig::default().warmup);
    }

    #[test]
    fn missing_file_is_ignored() {
        let c = BenchConfig::load(Some("/nonexistent/shabench/config")).unwrap();
        assert_eq!(c.measure, BenchConfig::default().measure);
    }
}
