use crate::error::GeneratorResult;
use crate::SnowflakeId;

/// Trait for generating unique identifiers.
///
/// Generic over the target id type, so one generator can hand out ids as
/// [`SnowflakeId`], `i64`, `u64` or `String` (e.g. for `Arc<dyn IdGenerator<String>>`
/// fields that only need an opaque key).
pub trait IdGenerator<T>: Send + Sync
where
    T: From<SnowflakeId>,
{
    fn generate(&self) -> GeneratorResult<T>;
}
