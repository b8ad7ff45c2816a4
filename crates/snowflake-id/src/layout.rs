//! Bit layout of a snowflake identifier, most significant field first:
//!
//! ```text
//! | 1 bit: unused (0) | 41 bits: elapsed ms | 6 bits: datacenter | 4 bits: worker | 12 bits: sequence |
//! ```

pub const TIMESTAMP_BITS: u32 = 41;
pub const DATACENTER_BITS: u32 = 6;
pub const WORKER_BITS: u32 = 4;
pub const SEQUENCE_BITS: u32 = 12;

pub const TIMESTAMP_MAX: i64 = (1 << TIMESTAMP_BITS) - 1;
pub const DATACENTER_MAX: i64 = (1 << DATACENTER_BITS) - 1;
pub const WORKER_MAX: i64 = (1 << WORKER_BITS) - 1;
pub const SEQUENCE_MAX: i64 = (1 << SEQUENCE_BITS) - 1;

pub const WORKER_SHIFT: u32 = SEQUENCE_BITS;
pub const DATACENTER_SHIFT: u32 = SEQUENCE_BITS + WORKER_BITS;
pub const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + WORKER_BITS + DATACENTER_BITS;

/// Packs the four fields into one integer. Each field is masked to its width.
pub const fn pack(elapsed_millis: i64, datacenter: i64, worker: i64, sequence: i64) -> i64 {
    ((elapsed_millis & TIMESTAMP_MAX) << TIMESTAMP_SHIFT)
        | ((datacenter & DATACENTER_MAX) << DATACENTER_SHIFT)
        | ((worker & WORKER_MAX) << WORKER_SHIFT)
        | (sequence & SEQUENCE_MAX)
}

/// Splits an integer into `(elapsed_millis, datacenter, worker, sequence)`.
pub const fn unpack(value: i64) -> (i64, i64, i64, i64) {
    (
        (value >> TIMESTAMP_SHIFT) & TIMESTAMP_MAX,
        (value >> DATACENTER_SHIFT) & DATACENTER_MAX,
        (value >> WORKER_SHIFT) & WORKER_MAX,
        value & SEQUENCE_MAX,
    )
}
