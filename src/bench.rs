use crypto_hash::sha2::{Mode, SelfTestCase, SELF_TEST_CASES};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::{Duration, Instant};

/// 一个计时阶段: 至少运行`min_millis`毫秒, 且至少采样`min_runs`次
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct Phase {
    pub min_millis: u64,
    pub min_runs: usize,
}

/// 平均值及其标准误差, 单位微秒
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct MeanAndSem {
    pub mean: f64,
    pub sem: f64,
}

impl MeanAndSem {
    /// `samples`为空时返回`None`; 只有一个样本时标准误差记为0.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let sem = if samples.len() < 2 {
            0.0
        } else {
            let sum_sqs = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>();
            (sum_sqs / (n * (n - 1.0))).sqrt()
        };

        Some(Self { mean, sem })
    }
}

impl Display for MeanAndSem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} us +- {} us", self.mean, self.sem))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    /// 参与计时的模式, `None`表示全部
    pub mode: Option<String>,
    pub runs: usize,
    pub result: MeanAndSem,
}

impl Display for BenchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.result))
    }
}

/// 参与计时的自检用例及其解码后的期望摘要, 在计时开始前准备好
pub fn bench_cases(mode: Option<Mode>) -> Vec<(SelfTestCase, Vec<u8>)> {
    SELF_TEST_CASES
        .iter()
        .filter(|c| mode.map_or(true, |m| m == c.mode))
        .map(|c| (*c, c.expected_bytes().unwrap_or_default()))
        .collect()
}

/// 计算一遍自检向量, 结果不符直接panic: 这说明哈希实现有误, 计时结果没有意义.
pub fn run_once(cases: &[(SelfTestCase, Vec<u8>)]) {
    for (case, expected) in cases {
        let actual = case.run();
        assert!(
            actual.as_ref() == expected.as_slice(),
            "{} self test failed: expected `{}`, got `{:x}`",
            case.mode,
            case.expected,
            actual
        );
    }
}

/// 重复执行`f`直到满足`phase`, 返回每次执行耗时(微秒)
pub fn run_benchmark<F: FnMut()>(phase: &Phase, mut f: F) -> Vec<f64> {
    let stop = Instant::now() + Duration::from_millis(phase.min_millis);
    let mut samples = Vec::with_capacity(phase.min_runs.max(16));

    loop {
        let start = Instant::now();
        f();
        let end = Instant::now();
        samples.push(end.duration_since(start).as_secs_f64() * 1_000_000.0);

        if end >= stop && samples.len() >= phase.min_runs {
            break;
        }
    }

    samples
}

/// 先预热(样本丢弃), 再正式计时
pub fn report(warmup: &Phase, measure: &Phase, mode: Option<Mode>) -> BenchReport {
    let cases = bench_cases(mode);

    log::debug!("warm up: {:?}", warmup);
    let n = run_benchmark(warmup, || run_once(&cases)).len();
    log::debug!("warm up finished after {n} runs");

    log::debug!("measure: {:?}", measure);
    let samples = run_benchmark(measure, || run_once(&cases));
    log::debug!("measure finished after {} runs", samples.len());

    // run_benchmark至少采样一次
    let result = MeanAndSem::from_samples(&samples).unwrap_or(MeanAndSem {
        mean: 0.0,
        sem: 0.0,
    });

    BenchReport {
        timestamp: chrono::Local::now().to_rfc3339(),
        mode: mode.map(|m| m.to_string()),
        runs: samples.len(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::{bench_cases, report, run_benchmark, run_once, MeanAndSem, Phase};
    use crypto_hash::sha2::Mode;

    #[test]
    fn mean_and_sem() {
        let r = MeanAndSem::from_samples(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_eq!(r.mean, 5.0);
        // sum_sqs = 20, n(n-1) = 12
        assert!((r.sem - (20.0f64 / 12.0).sqrt()).abs() < 1e-12);

        let r = MeanAndSem::from_samples(&[3.5]).unwrap();
        assert_eq!(r, MeanAndSem { mean: 3.5, sem: 0.0 });

        assert!(MeanAndSem::from_samples(&[]).is_none());
    }

    #[test]
    fn display() {
        let r = MeanAndSem { mean: 1.5, sem: 0.25 };
        assert_eq!(r.to_string(), "1.5 us +- 0.25 us");
    }

    #[test]
    fn honours_min_runs() {
        let mut calls = 0;
        let phase = Phase {
            min_millis: 0,
            min_runs: 7,
        };
        let samples = run_benchmark(&phase, || calls += 1);
        assert_eq!(samples.len(), 7);
        assert_eq!(calls, 7);
        assert!(samples.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn honours_min_time() {
        let phase = Phase {
            min_millis: 20,
            min_runs: 1,
        };
        let start = std::time::Instant::now();
        let samples = run_benchmark(&phase, || {
            std::thread::sleep(std::time::Duration::from_millis(2))
        });
        assert!(start.elapsed().as_millis() >= 20);
        assert!(samples.len() >= 2);
    }

    #[test]
    fn self_test_run_passes() {
        assert_eq!(bench_cases(None).len(), 6);
        run_once(&bench_cases(None));

        let cases = bench_cases(Some(Mode::SHA384));
        assert_eq!(cases.len(), 3);
        assert!(cases.iter().all(|(c, e)| c.mode == Mode::SHA384 && e.len() == 48));
        run_once(&cases);
    }

    #[test]
    #[should_panic(expected = "self test failed")]
    fn mismatching_digest_panics() {
        let mut cases = bench_cases(Some(Mode::SHA512));
        cases[0].1[0] ^= 1;
        run_once(&cases);
    }

    #[test]
    fn report_counts_measured_runs() {
        let quick = Phase {
            min_millis: 0,
            min_runs: 2,
        };
        let r = report(&quick, &quick, Some(Mode::SHA512));
        assert_eq!(r.runs, 2);
        assert_eq!(r.mode.as_deref(), Some("SHA-512"));
        assert!(r.result.mean > 0.0);

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["runs"], 2);
        assert!(json["result"]["sem"].is_number());
    }
}
