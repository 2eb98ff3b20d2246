use log::{info, warn};
use serde::Serialize;

use crate::allocator::{Allocation, NormalizedShares};
use crate::clipboard::ClipboardSink;
use crate::nature::{Marker, Nature};
use crate::stats::{Attribute, PerStat, RawWeights};

pub const COPY_OK_MESSAGE: &str = "Formation copied ✔";
pub const COPY_FAILED_MESSAGE: &str = "Copy failed";

pub fn compute_final(base: &PerStat<u32>, added: &PerStat<u32>) -> PerStat<u64> {
    PerStat::from_fn(|attr| u64::from(base[attr]) + u64::from(added[attr]))
}

/// Header line with the nature, a blank line, then one line per attribute.
/// Boost markers sit after the bold label's closing delimiters.
pub fn format_export(totals: &PerStat<u64>, nature: Nature) -> String {
    let mut text = format!("Nature: {}\n\n", nature.name());
    for (attr, value) in totals.iter() {
        text.push_str(&format!("• **{}:** {}", attr.display_name(), value));
        match nature.marker_for(attr) {
            Marker::None => {}
            marker => text.push_str(&format!(" {}", marker.suffix())),
        }
        text.push('\n');
    }
    text
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportStatus {
    Copied,
    Failed,
}

impl ExportStatus {
    pub fn message(self) -> &'static str {
        match self {
            ExportStatus::Copied => COPY_OK_MESSAGE,
            ExportStatus::Failed => COPY_FAILED_MESSAGE,
        }
    }
}

/// Hands `text` to `sink`. Failures are logged and reported, never raised.
pub fn export(sink: &mut dyn ClipboardSink, text: &str) -> ExportStatus {
    match sink.write_text(text) {
        Ok(()) => {
            info!("copied formation via {}", sink.name());
            ExportStatus::Copied
        }
        Err(err) => {
            warn!("copy via {} failed: {err}", sink.name());
            ExportStatus::Failed
        }
    }
}

/// A full snapshot of one computed formation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Formation {
    pub nature: Nature,
    pub points: u32,
    pub raw_total: u32,
    pub weights: RawWeights,
    pub shares: NormalizedShares,
    pub added: PerStat<u32>,
    pub base: PerStat<u32>,
    pub totals: PerStat<u64>,
}

impl Formation {
    pub fn new(
        points: u32,
        weights: RawWeights,
        allocation: Allocation,
        base: PerStat<u32>,
        nature: Nature,
    ) -> Self {
        let totals = compute_final(&base, &allocation.points);
        Self {
            nature,
            points,
            raw_total: allocation.raw_total,
            weights,
            shares: allocation.shares,
            added: allocation.points,
            base,
            totals,
        }
    }

    pub fn export_text(&self) -> String {
        format_export(&self.totals, self.nature)
    }

    pub fn marker_for(&self, attr: Attribute) -> Marker {
        self.nature.marker_for(attr)
    }
}
