mod common;

use common::{
    init_tracing, manual_generator, test_config, TEST_DATACENTER, TEST_EPOCH, TEST_WORKER,
};
use snowflake_id::layout::{SEQUENCE_MAX, TIMESTAMP_MAX};
use snowflake_id::{
    Clock, GeneratorError, SnowflakeConfig, SnowflakeGenerator, SnowflakeId, SnowflakeParts,
};
use std::collections::HashSet;
use std::time::Duration;

#[test]
fn generates_unique_ids() {
    init_tracing();
    let generator = SnowflakeGenerator::new(test_config());
    let mut ids = HashSet::new();
    for _ in 0..20_000 {
        let id = generator.generate().unwrap();
        assert!(ids.insert(id), "Duplicate ID generated: {id}");
    }
}

#[test]
fn ids_are_monotonic_increasing() {
    init_tracing();
    let generator = SnowflakeGenerator::new(test_config());
    let mut prev = generator.generate().unwrap();
    for _ in 0..10_000 {
        let current = generator.generate().unwrap();
        assert!(current > prev, "ID not strictly increasing: {current} <= {prev}");
        if current.parts().elapsed_millis == prev.parts().elapsed_millis {
            assert_eq!(current.parts().sequence, prev.parts().sequence + 1);
        }
        prev = current;
    }
}

#[test]
fn fields_round_trip_through_the_id() {
    init_tracing();
    let generator = SnowflakeGenerator::new(test_config());
    let before = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64;
    let id = generator.generate().unwrap();

    let parts = id.parts();
    assert_eq!(parts.datacenter, TEST_DATACENTER);
    assert_eq!(parts.worker, TEST_WORKER);
    assert!(parts.sequence <= SEQUENCE_MAX);
    assert!(id.timestamp_millis(TEST_EPOCH) >= before);
    assert_eq!(SnowflakeId::from(parts), id);
    assert_eq!(generator.timestamp_millis(id), id.timestamp_millis(TEST_EPOCH));
}

#[test]
fn same_millisecond_ids_differ_only_in_sequence() {
    let (generator, _clock) = manual_generator(test_config());
    let first = generator.generate().unwrap().as_i64();
    let second = generator.generate().unwrap().as_i64();

    assert_eq!((second & SEQUENCE_MAX) - (first & SEQUENCE_MAX), 1);
    assert_eq!(second >> 12, first >> 12);
}

#[test]
fn same_millisecond_ids_on_the_system_clock() {
    init_tracing();
    let generator = SnowflakeGenerator::new(test_config());
    // retry until two consecutive calls land in one millisecond
    for _ in 0..1_000 {
        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();
        if first.parts().elapsed_millis != second.parts().elapsed_millis {
            continue;
        }
        assert_eq!(second.parts().sequence - first.parts().sequence, 1);
        assert_eq!(second.as_i64() >> 12, first.as_i64() >> 12);
        return;
    }
    panic!("no two consecutive ids shared a millisecond");
}

#[test]
fn exhausted_sequence_waits_for_next_millisecond() {
    let config = test_config().with_sequence_wait_limit(Duration::from_secs(5));
    let (generator, clock) = manual_generator(config);

    let mut last = None;
    for expected in 0..=SEQUENCE_MAX {
        let id = generator.generate().unwrap();
        assert_eq!(id.parts().sequence, expected);
        last = Some(id);
    }
    let last = last.unwrap();

    let ticker = {
        let clock = clock.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            clock.advance(1);
        })
    };

    // the 4097th call blocks until the ticker moves the clock
    let next = generator.generate().unwrap();
    ticker.join().unwrap();

    assert_eq!(next.parts().sequence, 0);
    assert_eq!(next.parts().elapsed_millis, last.parts().elapsed_millis + 1);
    assert!(next > last);
}

#[test]
fn epoch_overflow_is_reported() {
    let (generator, clock) = manual_generator(test_config());
    clock.set(TEST_EPOCH + TIMESTAMP_MAX + 1);

    match generator.generate() {
        Err(GeneratorError::EpochExhausted { epoch, max, .. }) => {
            assert_eq!(epoch, TEST_EPOCH);
            assert_eq!(max, (1 << 41) - 1);
        }
        other => panic!("expected epoch overflow, got {other:?}"),
    }
}

#[test]
fn epoch_overflow_message_names_the_range() {
    let (generator, clock) = manual_generator(test_config());
    clock.set(TEST_EPOCH + TIMESTAMP_MAX + 10);
    let message = generator.generate().unwrap_err().to_string();
    assert!(message.contains(&TIMESTAMP_MAX.to_string()), "{message}");
}

#[test]
fn out_of_range_worker_is_reset_to_zero() {
    let (generator, _clock) = manual_generator(test_config().with_worker(20));
    assert_eq!(generator.worker(), 0);
    assert_eq!(generator.generate().unwrap().parts().worker, 0);
}

/// An out-of-range datacenter resets the datacenter field. The reference
/// behavior reset the worker field instead; this crate does not.
#[test]
fn out_of_range_datacenter_resets_datacenter_only() {
    let (generator, _clock) = manual_generator(test_config());
    generator.configure(TEST_WORKER, 100, TEST_EPOCH);

    let parts = generator.generate().unwrap().parts();
    assert_eq!(parts.datacenter, 0);
    assert_eq!(parts.worker, TEST_WORKER);
}

#[test]
fn negative_identities_are_reset_to_zero() {
    let (generator, _clock) = manual_generator(SnowflakeConfig::new(-1, -1, TEST_EPOCH));
    let id = generator.generate().unwrap();
    assert_eq!(id.parts().worker, 0);
    assert_eq!(id.parts().datacenter, 0);
    assert!(id.as_i64() > 0);
}

#[test]
fn future_epoch_is_replaced_by_now() {
    let (generator, clock) = manual_generator(test_config());
    let now = clock.now_millis();
    generator.set_epoch(now + 60_000);
    assert_eq!(generator.epoch(), now);
    assert_eq!(generator.generate().unwrap().parts().elapsed_millis, 0);
}

#[test]
fn reconfigured_generator_uses_new_fields() {
    let (generator, _clock) = manual_generator(test_config());
    generator.configure(15, 63, TEST_EPOCH - 1_000);
    let config = generator.config();
    assert_eq!((config.worker, config.datacenter), (15, 63));

    let parts = generator.generate().unwrap().parts();
    assert_eq!(
        parts,
        SnowflakeParts {
            elapsed_millis: 86_400_000 + 1_000,
            datacenter: 63,
            worker: 15,
            sequence: 0,
        }
    );
}
