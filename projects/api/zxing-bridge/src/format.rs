//! Barcode formats and the static format registry.
//!
//! A format is a 16-bit code:
//!
//! ```text
//! 15            8 7             0
//! +--------------+---------------+
//! | variant char | symbology char|
//! +--------------+---------------+
//! ```
//!
//! - A variant of `' '` (0x20) names the whole symbology, e.g. `EANUPC` = `' ' 'E'`.
//!   Concrete variants share the symbology character, e.g. `EAN13` = `'1' 'E'`.
//! - A symbology character of `'*'` (0x2A) marks a filter group; the variant
//!   character selects the group (`'*'` all, `'r'` readable, `'w'` creatable,
//!   `'l'` linear, `'m'` matrix, `'G'` GS1, `'R'` retail, `'I'` industrial).
//! - `0` is "no format", `0xFFFF` is "invalid".
//!
//! Names, lists and group membership come from a table compiled into the crate;
//! no native call is involved. [`Engine::list_formats`], [`Engine::format_name`]
//! and [`Engine::parse_format`] ask the engine instead, which reflects what the
//! linked build actually supports.

use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::last_error::{engine_failure, take_last_error};
use crate::marshal::{take_array, take_string, to_c_string};
use bitfield::bitfield;
use core::ffi::c_int;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
use zxing_bridge_sys::ZXing_BarcodeFormat;

bitfield! {
    /// A barcode format code. See the [module documentation](self) for the layout.
    ///
    /// Two formats are equal iff their codes are equal.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
    pub struct BarcodeFormat(u16);
    u8;
    /// Symbology character (low byte).
    pub symbology_char, _: 7, 0;
    /// Variant character (high byte).
    pub variant_char, _: 15, 8;
}

const SYMBOLOGY_VARIANT: u8 = b' ';
const FILTER_CHAR: u8 = b'*';

/// Group membership bits used by the registry.
mod group {
    pub const LINEAR: u8 = 1 << 0;
    pub const MATRIX: u8 = 1 << 1;
    pub const READABLE: u8 = 1 << 2;
    pub const CREATABLE: u8 = 1 << 3;
    pub const GS1: u8 = 1 << 4;
    pub const RETAIL: u8 = 1 << 5;
    pub const INDUSTRIAL: u8 = 1 << 6;
}

use group::*;

macro_rules! formats {
    ($($(#[$meta:meta])* $name:ident = ($variant:literal, $symbology:literal)),* $(,)?) => {
        impl BarcodeFormat {
            $(
                $(#[$meta])*
                pub const $name: Self = Self::from_chars($variant, $symbology);
            )*
        }
    };
}

formats! {
    /// No format.
    NONE = (0, 0),
    /// Not a valid format.
    INVALID = (0xFF, 0xFF),

    /// Every format.
    ALL = (b'*', b'*'),
    /// Every format the reader can detect.
    ALL_READABLE = (b'r', b'*'),
    /// Every format the creator can produce.
    ALL_CREATABLE = (b'w', b'*'),
    /// Every 1-D format.
    ALL_LINEAR = (b'l', b'*'),
    /// Every 2-D format.
    ALL_MATRIX = (b'm', b'*'),
    /// Every format able to carry GS1 data.
    ALL_GS1 = (b'G', b'*'),
    /// Point-of-sale formats.
    ALL_RETAIL = (b'R', b'*'),
    /// Logistics and industrial formats.
    ALL_INDUSTRIAL = (b'I', b'*'),

    CODABAR = (b' ', b'F'),
    CODE39 = (b' ', b'A'),
    CODE39_STD = (b's', b'A'),
    CODE39_EXT = (b'e', b'A'),
    CODE32 = (b'2', b'A'),
    PZN = (b'p', b'A'),
    CODE93 = (b' ', b'G'),
    CODE128 = (b' ', b'C'),
    ITF = (b' ', b'I'),
    ITF14 = (b'4', b'I'),

    DATA_BAR = (b' ', b'e'),
    DATA_BAR_OMNI = (b'o', b'e'),
    DATA_BAR_STK = (b's', b'e'),
    DATA_BAR_STK_OMNI = (b'O', b'e'),
    DATA_BAR_LTD = (b'l', b'e'),
    DATA_BAR_EXP = (b'e', b'e'),
    DATA_BAR_EXP_STK = (b'E', b'e'),

    EAN_UPC = (b' ', b'E'),
    EAN13 = (b'1', b'E'),
    EAN8 = (b'8', b'E'),
    EAN5 = (b'5', b'E'),
    EAN2 = (b'2', b'E'),
    ISBN = (b'i', b'E'),
    UPC_A = (b'a', b'E'),
    UPC_E = (b'e', b'E'),

    OTHER_BARCODE = (b' ', b'X'),
    DX_FILM_EDGE = (b'x', b'X'),

    PDF417 = (b' ', b'L'),
    COMPACT_PDF417 = (b'c', b'L'),
    MICRO_PDF417 = (b'm', b'L'),

    AZTEC = (b' ', b'z'),
    AZTEC_CODE = (b'c', b'z'),
    AZTEC_RUNE = (b'r', b'z'),

    QR_CODE = (b' ', b'Q'),
    QR_CODE_MODEL1 = (b'1', b'Q'),
    QR_CODE_MODEL2 = (b'2', b'Q'),
    MICRO_QR_CODE = (b'm', b'Q'),
    RMQR_CODE = (b'r', b'Q'),

    DATA_MATRIX = (b' ', b'd'),
    MAXI_CODE = (b' ', b'U'),
}

struct FormatInfo {
    format: BarcodeFormat,
    name: &'static str,
    groups: u8,
}

const fn info(format: BarcodeFormat, name: &'static str, groups: u8) -> FormatInfo {
    FormatInfo {
        format,
        name,
        groups,
    }
}

const LR: u8 = LINEAR | READABLE;
const MR: u8 = MATRIX | READABLE;

/// Every concrete format in listing order.
static FORMATS: &[FormatInfo] = &[
    info(BarcodeFormat::CODABAR, "Codabar", LR | CREATABLE | INDUSTRIAL),
    info(BarcodeFormat::CODE39, "Code39", LR | CREATABLE | INDUSTRIAL),
    info(BarcodeFormat::CODE39_STD, "Code39Std", LR | CREATABLE | INDUSTRIAL),
    info(BarcodeFormat::CODE39_EXT, "Code39Ext", LR | CREATABLE | INDUSTRIAL),
    info(BarcodeFormat::CODE32, "Code32", LR | INDUSTRIAL),
    info(BarcodeFormat::PZN, "PZN", LR | INDUSTRIAL),
    info(BarcodeFormat::CODE93, "Code93", LR | CREATABLE | INDUSTRIAL),
    info(BarcodeFormat::CODE128, "Code128", LR | CREATABLE | GS1 | INDUSTRIAL),
    info(BarcodeFormat::ITF, "ITF", LR | CREATABLE | INDUSTRIAL),
    info(BarcodeFormat::ITF14, "ITF14", LR | CREATABLE | GS1 | INDUSTRIAL),
    info(BarcodeFormat::DATA_BAR, "DataBar", LR | CREATABLE | GS1 | RETAIL),
    info(BarcodeFormat::DATA_BAR_OMNI, "DataBarOmni", LR | CREATABLE | GS1 | RETAIL),
    info(BarcodeFormat::DATA_BAR_STK, "DataBarStk", LR | GS1 | RETAIL),
    info(BarcodeFormat::DATA_BAR_STK_OMNI, "DataBarStkOmni", LR | GS1 | RETAIL),
    info(BarcodeFormat::DATA_BAR_LTD, "DataBarLtd", LR | CREATABLE | GS1 | RETAIL),
    info(BarcodeFormat::DATA_BAR_EXP, "DataBarExp", LR | CREATABLE | GS1 | RETAIL),
    info(BarcodeFormat::DATA_BAR_EXP_STK, "DataBarExpStk", LR | GS1 | RETAIL),
    info(BarcodeFormat::EAN_UPC, "EANUPC", LR | RETAIL),
    info(BarcodeFormat::EAN13, "EAN13", LR | CREATABLE | GS1 | RETAIL),
    info(BarcodeFormat::EAN8, "EAN8", LR | CREATABLE | GS1 | RETAIL),
    info(BarcodeFormat::EAN5, "EAN5", LR | CREATABLE | RETAIL),
    info(BarcodeFormat::EAN2, "EAN2", LR | CREATABLE | RETAIL),
    info(BarcodeFormat::ISBN, "ISBN", LR | CREATABLE | RETAIL),
    info(BarcodeFormat::UPC_A, "UPCA", LR | CREATABLE | GS1 | RETAIL),
    info(BarcodeFormat::UPC_E, "UPCE", LR | CREATABLE | GS1 | RETAIL),
    info(BarcodeFormat::OTHER_BARCODE, "OtherBarcode", LR),
    info(BarcodeFormat::DX_FILM_EDGE, "DXFilmEdge", LR | INDUSTRIAL),
    info(BarcodeFormat::PDF417, "PDF417", MR | CREATABLE),
    info(BarcodeFormat::COMPACT_PDF417, "CompactPDF417", MR | CREATABLE),
    info(BarcodeFormat::MICRO_PDF417, "MicroPDF417", MATRIX | CREATABLE),
    info(BarcodeFormat::AZTEC, "Aztec", MR | CREATABLE),
    info(BarcodeFormat::AZTEC_CODE, "AztecCode", MR | CREATABLE),
    info(BarcodeFormat::AZTEC_RUNE, "AztecRune", MR | CREATABLE),
    info(BarcodeFormat::QR_CODE, "QRCode", MR | CREATABLE | GS1),
    info(BarcodeFormat::QR_CODE_MODEL1, "QRCodeModel1", MR),
    info(BarcodeFormat::QR_CODE_MODEL2, "QRCodeModel2", MR | CREATABLE | GS1),
    info(BarcodeFormat::MICRO_QR_CODE, "MicroQRCode", MR | CREATABLE),
    info(BarcodeFormat::RMQR_CODE, "RMQRCode", MR | CREATABLE | GS1),
    info(BarcodeFormat::DATA_MATRIX, "DataMatrix", MR | CREATABLE | GS1),
    info(BarcodeFormat::MAXI_CODE, "MaxiCode", MR | CREATABLE),
];

/// Filter groups: (format, name, required membership bits; 0 matches any).
static FILTERS: &[(BarcodeFormat, &str, u8)] = &[
    (BarcodeFormat::ALL, "All", 0),
    (BarcodeFormat::ALL_READABLE, "AllReadable", READABLE),
    (BarcodeFormat::ALL_CREATABLE, "AllCreatable", CREATABLE),
    (BarcodeFormat::ALL_LINEAR, "AllLinear", LINEAR),
    (BarcodeFormat::ALL_MATRIX, "AllMatrix", MATRIX),
    (BarcodeFormat::ALL_GS1, "AllGS1", GS1),
    (BarcodeFormat::ALL_RETAIL, "AllRetail", RETAIL),
    (BarcodeFormat::ALL_INDUSTRIAL, "AllIndustrial", INDUSTRIAL),
];

/// Older spellings still accepted by [`BarcodeFormat::parse`].
static ALIASES: &[(&str, BarcodeFormat)] = &[
    ("databarexpanded", BarcodeFormat::DATA_BAR_EXP),
    ("databarexpandedstacked", BarcodeFormat::DATA_BAR_EXP_STK),
    ("databarlimited", BarcodeFormat::DATA_BAR_LTD),
    ("databarstacked", BarcodeFormat::DATA_BAR_STK),
    ("databarstackedomnidirectional", BarcodeFormat::DATA_BAR_STK_OMNI),
    ("databaromnidirectional", BarcodeFormat::DATA_BAR_OMNI),
    ("linearcodes", BarcodeFormat::ALL_LINEAR),
    ("matrixcodes", BarcodeFormat::ALL_MATRIX),
    ("any", BarcodeFormat::ALL),
];

impl BarcodeFormat {
    const fn from_chars(variant: u8, symbology: u8) -> Self {
        Self(((variant as u16) << 8) | symbology as u16)
    }

    /// Interprets a raw code received from the engine.
    ///
    /// Values that do not fit in 16 bits become [`BarcodeFormat::INVALID`].
    pub fn from_raw(raw: ZXing_BarcodeFormat) -> Self {
        u16::try_from(raw).map_or(Self::INVALID, Self)
    }

    /// The raw code passed to the engine.
    #[inline]
    pub fn raw(self) -> ZXing_BarcodeFormat {
        ZXing_BarcodeFormat::from(self.0)
    }

    /// True for a filter group such as [`BarcodeFormat::ALL_MATRIX`].
    pub fn is_filter(self) -> bool {
        self != Self::INVALID && self.symbology_char() == FILTER_CHAR
    }

    /// True for a format that names a single symbology or variant, as opposed
    /// to a filter, [`BarcodeFormat::NONE`] or an unknown code.
    pub fn is_concrete(self) -> bool {
        Self::lookup(self).is_some()
    }

    /// True if this value names a whole symbology (variant `' '`).
    pub fn is_symbology(self) -> bool {
        self.is_concrete() && self.variant_char() == SYMBOLOGY_VARIANT
    }

    /// The symbology this format belongs to, e.g. `EAN13` → `EANUPC`.
    ///
    /// Filters, [`BarcodeFormat::NONE`] and [`BarcodeFormat::INVALID`] map to themselves.
    pub fn symbology(self) -> Self {
        if self == Self::NONE || self == Self::INVALID || self.is_filter() {
            self
        } else {
            Self::from_chars(SYMBOLOGY_VARIANT, self.symbology_char())
        }
    }

    /// Registry name of this format or filter.
    pub fn name(self) -> Option<&'static str> {
        if let Some(info) = Self::lookup(self) {
            return Some(info.name);
        }
        FILTERS
            .iter()
            .find(|(format, _, _)| *format == self)
            .map(|(_, name, _)| *name)
    }

    /// Whether this concrete format is selected by `filter`.
    ///
    /// `filter` may be a filter group, a whole symbology (selecting all of its
    /// variants) or a concrete format (selecting only itself).
    pub fn matches(self, filter: BarcodeFormat) -> bool {
        let Some(info) = Self::lookup(self) else {
            return false;
        };

        if filter.is_filter() {
            return FILTERS
                .iter()
                .find(|(format, _, _)| *format == filter)
                .is_some_and(|(_, _, bits)| *bits == 0 || info.groups & bits != 0);
        }

        if filter.is_symbology() {
            return self.symbology() == filter;
        }

        self == filter
    }

    /// Parses a single format name.
    ///
    /// Matching ignores case and the separators `' '`, `'-'`, `'_'` and `'/'`, so
    /// `"Micro PDF417"`, `"micro-pdf417"` and `"MicroPDF417"` are equivalent.
    /// Filter group names (`"AllReadable"`, ...) are accepted too.
    pub fn parse(name: &str) -> BridgeResult<Self> {
        let key = normalize(name);
        if !key.is_empty() {
            let found = FORMATS
                .iter()
                .map(|info| (info.format, info.name))
                .chain(FILTERS.iter().map(|(format, name, _)| (*format, *name)))
                .find(|(_, candidate)| normalize(candidate) == key)
                .map(|(format, _)| format)
                .or_else(|| {
                    ALIASES
                        .iter()
                        .find(|(alias, _)| *alias == key)
                        .map(|(_, format)| *format)
                });

            if let Some(format) = found {
                return Ok(format);
            }
        }
        Err(BridgeError::UnknownFormat(name.trim().to_string()))
    }

    fn lookup(self) -> Option<&'static FormatInfo> {
        FORMATS.iter().find(|info| info.format == self)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '/'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parses a list of format names separated by `,` or `|`.
///
/// Empty entries are skipped, so `""` yields an empty list. The first unknown
/// name fails the whole parse.
pub fn parse_formats(names: &str) -> BridgeResult<Vec<BarcodeFormat>> {
    names
        .split([',', '|'])
        .filter(|name| !name.trim().is_empty())
        .map(BarcodeFormat::parse)
        .collect()
}

/// Lists every concrete format selected by `filter`, in registry order.
///
/// [`BarcodeFormat::NONE`] selects nothing.
pub fn list_formats(filter: BarcodeFormat) -> Vec<BarcodeFormat> {
    FORMATS
        .iter()
        .map(|info| info.format)
        .filter(|format| format.matches(filter))
        .collect()
}

/// Joins format names with `", "`. The result parses back with [`parse_formats`].
pub fn formats_to_string(formats: &[BarcodeFormat]) -> String {
    formats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for BarcodeFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if *self == Self::NONE => f.write_str("None"),
            None => write!(f, "Unknown(0x{:04X})", self.0),
        }
    }
}

impl fmt::Debug for BarcodeFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BarcodeFormat({self}, 0x{:04X})", self.0)
    }
}

impl FromStr for BarcodeFormat {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Engine {
    /// Concrete formats the engine selects for `filter`, in the engine's order.
    pub fn list_formats(&self, filter: BarcodeFormat) -> BridgeResult<Vec<BarcodeFormat>> {
        let mut count: c_int = 0;
        // SAFETY: `count` is a valid out-parameter.
        let codes = unsafe { (self.api().barcode_formats_list)(filter.raw(), &mut count) };
        // SAFETY: null or an array of `count` codes owned by us.
        match unsafe { take_array(*self, codes, count, "list formats") }? {
            Some(codes) => Ok(codes.into_iter().map(BarcodeFormat::from_raw).collect()),
            None => match take_last_error(*self) {
                Some(message) => Err(BridgeError::EngineFailure {
                    operation: "list formats",
                    message,
                }),
                None => Ok(Vec::new()),
            },
        }
    }

    /// The engine's name for `format`.
    pub fn format_name(&self, format: BarcodeFormat) -> BridgeResult<String> {
        // SAFETY: takes a plain code.
        let ptr = unsafe { (self.api().barcode_format_to_string)(format.raw()) };
        // SAFETY: null or a NUL-terminated string owned by us.
        let name = unsafe { take_string(*self, ptr) };
        name.ok_or_else(|| engine_failure(*self, "name format"))
    }

    /// Parses a single format name with the engine's parser.
    ///
    /// Fails with [`BridgeError::UnknownFormat`] like [`BarcodeFormat::parse`].
    pub fn parse_format(&self, name: &str) -> BridgeResult<BarcodeFormat> {
        let c_name = to_c_string(name, "format name")?;
        // SAFETY: `c_name` is NUL-terminated and outlives the call.
        let raw = unsafe { (self.api().barcode_format_from_string)(c_name.as_ptr()) };
        let format = BarcodeFormat::from_raw(raw);
        if format == BarcodeFormat::INVALID {
            if let Some(message) = take_last_error(*self) {
                log::debug!("engine rejected format name: {message}");
            }
            return Err(BridgeError::UnknownFormat(name.trim().to_string()));
        }
        Ok(format)
    }
}
