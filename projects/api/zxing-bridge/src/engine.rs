//! The engine handle every wrapper calls through.

use core::ffi::CStr;
use zxing_bridge_sys::ZXingApi;

/// A handle to a native engine, expressed as its function table.
///
/// `Engine` is `Copy`; every wrapper stores the engine that created it and
/// releases its native handle through the same table.
#[derive(Clone, Copy)]
pub struct Engine {
    api: &'static ZXingApi,
}

impl Engine {
    /// Wraps a function table.
    ///
    /// # Safety
    ///
    /// Every function in `api` must honour the zxing-cpp C contract: handles
    /// returned by constructors stay valid until passed to the matching
    /// destructor, strings and arrays handed back are released with `free`,
    /// and the last-error message is scoped to the calling thread.
    pub const unsafe fn from_api(api: &'static ZXingApi) -> Self {
        Self { api }
    }

    /// The engine provided by the linked native library.
    #[cfg(feature = "link")]
    pub fn linked() -> Self {
        // SAFETY: the linked table points at the real zxing-cpp entry points.
        unsafe { Self::from_api(&zxing_bridge_sys::linked::API) }
    }

    #[inline]
    pub(crate) fn api(&self) -> &'static ZXingApi {
        self.api
    }

    /// Version string reported by the engine, if it reports one.
    pub fn version(&self) -> Option<String> {
        // SAFETY: returns a pointer to a static, NUL-terminated string or null.
        let ptr = unsafe { (self.api.version)() };
        if ptr.is_null() {
            return None;
        }
        // SAFETY: checked non-null above; the string is static and never freed.
        let version = unsafe { CStr::from_ptr(ptr) };
        Some(version.to_string_lossy().into_owned())
    }
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("api", &(self.api as *const ZXingApi))
            .finish()
    }
}

impl PartialEq for Engine {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.api, other.api)
    }
}

impl Eq for Engine {}
