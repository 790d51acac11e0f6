/// Partner shop shown in the cashback strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CashbackPartner {
    pub id: String,
    pub logo_url: String,
}

impl CashbackPartner {
    pub(crate) fn new(id: &str, logo_url: &str) -> Self {
        Self {
            id: id.to_string(),
            logo_url: logo_url.to_string(),
        }
    }
}

/// One coloured segment of the cashback progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CashbackSegment {
    pub color: String,
    pub percentage: u8,
}

impl CashbackSegment {
    pub(crate) fn new(color: &str, percentage: u8) -> Self {
        Self {
            color: color.to_string(),
            percentage,
        }
    }
}

/// Sum of all segments, capped at 100.
pub(crate) fn progress_percent(segments: &[CashbackSegment]) -> u8 {
    let total: u32 = segments.iter().map(|s| u32::from(s.percentage)).sum();
    total.min(100) as u8
}
