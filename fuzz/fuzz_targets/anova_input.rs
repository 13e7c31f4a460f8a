#![no_main]

use anova_eval::anova::AnovaEvaluator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the group count, the rest are split into f64 samples
    let Some((&k, rest)) = data.split_first() else {
        return;
    };
    let k = usize::from(k % 6);

    let values: Vec<f64> = rest
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect();
    if k == 0 {
        return;
    }

    let groups: Vec<&[f64]> = values.chunks(values.len().div_ceil(k).max(1)).collect();

    // Any input must yield a report or an error, never a panic
    let evaluator = AnovaEvaluator::default();
    if let Ok(report) = evaluator.analyze(&groups) {
        assert!(report.partition.p_value >= 0.0 && report.partition.p_value <= 1.0);
    }
});
