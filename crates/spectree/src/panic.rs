//! Helpers for rendering panic payloads.

use std::any::Any;

/// Extracts a panic payload into a human-readable message.
///
/// Attempts to downcast common primitives before falling back to an opaque
/// description that includes the payload [`TypeId`](std::any::TypeId).
///
/// # Examples
/// ```
/// use spectree::panic_message;
///
/// let Err(payload) = std::panic::catch_unwind(|| panic!("boom")) else {
///     unreachable!("closure always panics");
/// };
/// assert_eq!(panic_message(payload.as_ref()), "boom");
/// ```
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    macro_rules! try_downcast {
        ($($ty:ty),* $(,)?) => {
            $(
                if let Some(val) = payload.downcast_ref::<$ty>() {
                    return val.to_string();
                }
            )*
        };
    }

    try_downcast!(&str, String, i32, u32, i64, u64, isize, usize, f32, f64);
    format!(
        "erased `Any` payload (TypeId({:?})); panic with Display data for detail",
        payload.type_id()
    )
}

#[cfg(test)]
mod tests {
    use super::panic_message;
    use rstest::rstest;
    use std::any::Any;

    #[rstest]
    #[case::static_str(Box::new("boom"), "boom")]
    #[case::owned_string(Box::new(String::from("owned")), "owned")]
    #[case::integer(Box::new(42_i32), "42")]
    #[case::unsigned(Box::new(7_usize), "7")]
    fn renders_common_payloads(#[case] payload: Box<dyn Any + Send>, #[case] expected: &str) {
        assert_eq!(panic_message(payload.as_ref()), expected);
    }

    #[test]
    fn opaque_payloads_mention_type_id() {
        struct Opaque;
        let payload: Box<dyn Any + Send> = Box::new(Opaque);
        assert!(panic_message(payload.as_ref()).contains("TypeId"));
    }
}
