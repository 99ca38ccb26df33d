//! Lazy composition of scan ranges for data-identifier and routine-identifier brute force.
//!
//! A 16-bit identifier space is never materialized as a vector; each preset is a
//! `RangeInclusive<u16>` and the combined scan is a chained iterator over the selected presets.

use std::ops::RangeInclusive;

/// Data-identifier OEM preset: `[0x0100,0xA5FF] ∪ [0xA800,0xACFF] ∪ [0xB000,0xB1FF] ∪
/// [0xC200,0xC2FF] ∪ [0xCF00,0xEFFF]`.
const DID_OEM: [RangeInclusive<u16>; 5] = [
    0x0100..=0xA5FF,
    0xA800..=0xACFF,
    0xB000..=0xB1FF,
    0xC200..=0xC2FF,
    0xCF00..=0xEFFF,
];

/// Data-identifier and routine-identifier supplier preset: `[0xF000,0xFEFF]`.
const SUPPLIER: RangeInclusive<u16> = 0xF000..=0xFEFF;

/// Data-identifier safety preset: `[0xFA00,0xFA0F] ∪ [0xFA19,0xFAFF]`.
///
/// The source this was distilled from appears to also merge in the supplier range whenever the
/// safety flag is set; that is very likely accidental (the safety and supplier ranges overlap
/// at their boundary and a straightforward chained-range implementation of "oem ∪ supplier ∪
/// safety" would produce it for free). This implementation is safety-only, per the open
/// question this behavior raised.
const DID_SAFETY: [RangeInclusive<u16>; 2] = [0xFA00..=0xFA0F, 0xFA19..=0xFAFF];

/// Routine-identifier OEM preset: `[0x0200,0xDFFF]`.
const RID_OEM: RangeInclusive<u16> = 0x0200..=0xDFFF;

const FULL: RangeInclusive<u16> = 0x0000..=0xFFFF;

/// Which domain-aware presets to union for a data-identifier scan, or an explicit custom range.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataIdentifierRangeSelection {
    pub oem: bool,
    pub supplier: bool,
    pub safety: bool,
    pub custom: Option<(u16, u16)>,
}

/// Which domain-aware presets to union for a routine-identifier scan, or an explicit custom range.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoutineIdentifierRangeSelection {
    pub oem: bool,
    pub supplier: bool,
    pub custom: Option<(u16, u16)>,
}

/// Build the lazy iterator of data identifiers to scan from the selected presets.
///
/// # Errors
/// Returns an error if a custom range has `min > max`.
pub fn data_identifier_range(
    selection: DataIdentifierRangeSelection,
) -> crate::Result<Box<dyn Iterator<Item = u16>>> {
    if let Some((min, max)) = selection.custom {
        if min > max {
            return Err(crate::Error::InvalidArgument {
                field: "min",
                constraint: "<= max",
                value: format!("{min} > {max}"),
            });
        }
        return Ok(Box::new(min..=max));
    }
    if !selection.oem && !selection.supplier && !selection.safety {
        return Ok(Box::new(FULL));
    }
    let mut ranges: Vec<RangeInclusive<u16>> = Vec::new();
    if selection.oem {
        ranges.extend(DID_OEM);
    }
    if selection.supplier {
        ranges.push(SUPPLIER);
    }
    if selection.safety {
        ranges.extend(DID_SAFETY);
    }
    Ok(Box::new(ranges.into_iter().flatten()))
}

/// Build the lazy iterator of routine identifiers to scan from the selected presets.
///
/// # Errors
/// Returns an error if a custom range has `min > max`.
pub fn routine_identifier_range(
    selection: RoutineIdentifierRangeSelection,
) -> crate::Result<Box<dyn Iterator<Item = u16>>> {
    if let Some((min, max)) = selection.custom {
        if min > max {
            return Err(crate::Error::InvalidArgument {
                field: "min",
                constraint: "<= max",
                value: format!("{min} > {max}"),
            });
        }
        return Ok(Box::new(min..=max));
    }
    if !selection.oem && !selection.supplier {
        return Ok(Box::new(FULL));
    }
    let mut ranges: Vec<RangeInclusive<u16>> = Vec::new();
    if selection.oem {
        ranges.push(RID_OEM);
    }
    if selection.supplier {
        ranges.push(SUPPLIER);
    }
    Ok(Box::new(ranges.into_iter().flatten()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_is_full_space() {
        let range = data_identifier_range(DataIdentifierRangeSelection::default()).unwrap();
        assert_eq!(range.count(), usize::from(u16::MAX) + 1);
    }

    #[test]
    fn safety_preset_excludes_supplier_duplicate() {
        let range = data_identifier_range(DataIdentifierRangeSelection {
            safety: true,
            ..Default::default()
        })
        .unwrap()
        .collect::<Vec<_>>();
        assert!(range.contains(&0xFA00));
        assert!(range.contains(&0xFAFF));
        assert!(!range.contains(&0xFA10));
        assert!(!range.contains(&0xF000));
    }

    #[test]
    fn custom_range_rejects_inverted_bounds() {
        let err = data_identifier_range(DataIdentifierRangeSelection {
            custom: Some((10, 5)),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidArgument { .. }));
    }

    #[test]
    fn routine_default_range_has_no_safety_preset() {
        let range = routine_identifier_range(RoutineIdentifierRangeSelection {
            oem: true,
            ..Default::default()
        })
        .unwrap()
        .collect::<Vec<_>>();
        assert!(range.contains(&0x0200));
        assert!(range.contains(&0xDFFF));
        assert!(!range.contains(&0xFA00));
    }
}
