//! Named date-range presets offered to the CLI.

/// A named `[start, end)` date range, dates in `YYYY-MM-DD`.
pub struct DateRangePreset {
    pub name: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

pub const DATE_RANGE_PRESETS: &[DateRangePreset] = &[
    DateRangePreset {
        name: "All Available Data",
        start: "1950-01-01",
        end: "2024-12-31",
    },
    DateRangePreset {
        name: "Last 10 Years",
        start: "2014-01-01",
        end: "2024-12-31",
    },
    DateRangePreset {
        name: "Last 5 Years",
        start: "2019-01-01",
        end: "2024-12-31",
    },
    DateRangePreset {
        name: "Last 3 Years",
        start: "2021-01-01",
        end: "2024-12-31",
    },
    DateRangePreset {
        name: "COVID Era",
        start: "2020-01-01",
        end: "2024-12-31",
    },
    DateRangePreset {
        name: "Post-2008 Crisis",
        start: "2010-01-01",
        end: "2024-12-31",
    },
];

/// Case-insensitive lookup by preset name.
pub fn find_preset(name: &str) -> Option<&'static DateRangePreset> {
    DATE_RANGE_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_lookup_ignores_case() {
        let preset = find_preset("covid era").expect("preset exists");
        assert_eq!(preset.start, "2020-01-01");
        assert!(find_preset("Jurassic").is_none());
    }
}
