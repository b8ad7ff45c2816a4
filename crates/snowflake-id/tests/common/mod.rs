#![allow(dead_code)]

use snowflake_id::{ManualClock, SnowflakeConfig, SnowflakeGenerator};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

pub const TEST_EPOCH: i64 = 1_687_752_676_742;
pub const TEST_WORKER: i64 = 4;
pub const TEST_DATACENTER: i64 = 6;

static INIT_TRACING: Once = Once::new();

pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn test_config() -> SnowflakeConfig {
    SnowflakeConfig::new(TEST_WORKER, TEST_DATACENTER, TEST_EPOCH)
}

/// Generator on a manual clock set one day after the test epoch.
pub fn manual_generator(config: SnowflakeConfig) -> (SnowflakeGenerator<ManualClock>, ManualClock) {
    init_tracing();
    let clock = ManualClock::new(TEST_EPOCH + 86_400_000);
    (
        SnowflakeGenerator::with_clock(config, clock.clone()),
        clock,
    )
}
