//! AIA wavelength channel catalogue.

use std::collections::BTreeSet;

/// One selectable channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveOption {
    /// Channel code in angstroms as written to settings, e.g. `"171"`.
    pub code: &'static str,
    /// Dominant emission line or regime.
    pub description: &'static str,
}

/// Channels in display order.
pub const WAVE_OPTIONS: [WaveOption; 10] = [
    WaveOption { code: "94", description: "Fe XVIII (hot flares)" },
    WaveOption { code: "131", description: "Fe VIII / Fe XXI" },
    WaveOption { code: "171", description: "Fe IX (quiet corona)" },
    WaveOption { code: "193", description: "Fe XII / Fe XXIV" },
    WaveOption { code: "211", description: "Fe XIV (2 MK loops)" },
    WaveOption { code: "304", description: "He II (chromosphere)" },
    WaveOption { code: "335", description: "Fe XVI (2.5 MK)" },
    WaveOption { code: "1600", description: "C IV / continuum" },
    WaveOption { code: "1700", description: "continuum (photo.)" },
    WaveOption { code: "4500", description: "white-light" },
];

/// Parse a comma-separated settings value into catalogue positions.
///
/// Codes not in the catalogue are dropped.
pub fn parse_waves(value: &str) -> BTreeSet<usize> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .filter_map(|code| WAVE_OPTIONS.iter().position(|opt| opt.code == code))
        .collect()
}

/// Serialize selected positions as a comma list in catalogue order.
pub fn build_wave_value(selected: &BTreeSet<usize>) -> String {
    selected
        .iter()
        .filter_map(|&idx| WAVE_OPTIONS.get(idx))
        .map(|opt| opt.code)
        .collect::<Vec<_>>()
        .join(",")
}

/// Summarize a settings value, collapsing catalogue runs into `a-b`.
///
/// `"94,131,171,304"` becomes `"94-171,304"`; a blank value is `<unset>`.
pub fn wave_display(value: &str) -> String {
    let selected = parse_waves(value);
    if selected.is_empty() {
        return "<unset>".to_string();
    }

    let mut parts = Vec::new();
    let mut run: Option<(usize, usize)> = None;
    for idx in selected {
        run = match run {
            Some((first, last)) if idx == last + 1 => Some((first, idx)),
            Some(done) => {
                parts.push(format_run(done));
                Some((idx, idx))
            }
            None => Some((idx, idx)),
        };
    }
    if let Some(done) = run {
        parts.push(format_run(done));
    }
    parts.join(",")
}

fn format_run((first, last): (usize, usize)) -> String {
    if first == last {
        WAVE_OPTIONS[first].code.to_string()
    } else {
        format!("{}-{}", WAVE_OPTIONS[first].code, WAVE_OPTIONS[last].code)
    }
}
