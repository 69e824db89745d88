// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion config with a pprof flamegraph profiler attached.
///
/// The route searches are short, so samples default higher than for IO-bound
/// benches. Override with `BUNDLE_PROFILE_FREQ`, `BUNDLE_SAMPLE_SIZE`,
/// `BUNDLE_WARMUP_SECS` and `BUNDLE_MEASUREMENT_SECS`.
pub fn criterion() -> Criterion {
    let frequency = env_or::<i32>("BUNDLE_PROFILE_FREQ", 250).clamp(1, 1000);
    let sample_size = env_or::<usize>("BUNDLE_SAMPLE_SIZE", 100).clamp(10, 500);
    let warmup = Duration::from_secs(env_or::<u64>("BUNDLE_WARMUP_SECS", 2).clamp(1, 60));
    let measurement = Duration::from_secs(env_or::<u64>("BUNDLE_MEASUREMENT_SECS", 4).clamp(1, 120));

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(warmup)
        .measurement_time(measurement)
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
