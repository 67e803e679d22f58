
use crate::tables::Tables;

use super::{ConvertOptions, Converter};

/// Converter with built-in options, independent of any installed settings.
pub(super) fn converter() -> Converter {
    Converter::new(Tables::global(), ConvertOptions::default())
}

pub(super) fn with_context_punctuation() -> Converter {
    Converter::new(
        Tables::global(),
        ConvertOptions {
            map_context_punctuation: true,
            ..ConvertOptions::default()
        },
    )
}
