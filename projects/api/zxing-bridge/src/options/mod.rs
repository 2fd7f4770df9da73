//! Option bags passed to the engine.
//!
//! Each type owns one native options object. Accessors marshal a single
//! primitive across the boundary and fail with
//! [`UsageError`](crate::BridgeError::UsageError) once the object is closed.

/// Generates getter/setter pairs for fields whose native type matches the
/// Rust type (`bool`, `c_int`).
macro_rules! primitive_accessors {
    ($(
        $(#[$meta:meta])*
        $get:ident, $set:ident: $ty:ty => $native_get:ident, $native_set:ident;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> $crate::error::BridgeResult<$ty> {
                let ptr = self.handle.as_ptr()?;
                // SAFETY: the handle is live for the duration of the call.
                Ok(unsafe { (self.handle.engine().api().$native_get)(ptr) })
            }

            #[doc = concat!("Sets the value read by [`", stringify!($get), "`](Self::", stringify!($get), ").")]
            pub fn $set(&mut self, value: $ty) -> $crate::error::BridgeResult<()> {
                let ptr = self.handle.as_mut_ptr()?;
                // SAFETY: the handle is live and exclusively borrowed.
                unsafe { (self.handle.engine().api().$native_set)(ptr, value) };
                Ok(())
            }
        )*
    };
}

pub(crate) use primitive_accessors;

/// Implements `from_raw`/`raw` for a fieldless enum mirroring a native enum.
macro_rules! native_enum {
    ($name:ident: $raw:ty, $what:literal) => {
        impl $name {
            /// Maps a raw engine value back to the enum.
            pub fn from_raw(raw: $raw) -> $crate::error::BridgeResult<Self> {
                Self::all_values()
                    .iter()
                    .copied()
                    .find(|value| value.raw() == raw)
                    .ok_or($crate::error::BridgeError::UnknownValue {
                        what: $what,
                        value: i64::from(raw),
                    })
            }

            /// The raw engine value.
            #[inline]
            pub fn raw(self) -> $raw {
                self as $raw
            }
        }
    };
}

pub(crate) use native_enum;

pub mod creator;
pub mod reader;
pub mod writer;

pub use creator::CreatorOptions;
pub use reader::{Binarizer, EanAddOnSymbol, ReaderOptions, TextMode};
pub use writer::WriterOptions;
