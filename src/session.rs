use log::warn;

use crate::allocator::allocate;
use crate::clipboard::ClipboardSink;
use crate::config::FormationPreset;
use crate::error::{AllocationError, ConfigError};
use crate::formation::{export, ExportStatus, Formation};
use crate::nature::Nature;
use crate::stats::{clamp_input, Attribute, PerStat, RawWeights, MAX_INPUT};

/// How long a notice stays on screen, in seconds.
pub const NOTICE_SECONDS: f64 = 1.8;
/// Percent per dot in the weight strips.
pub const STEP_PERCENT: u32 = 5;
/// Dots per weight strip.
pub const STEPS: u32 = 20;

pub const CAP_REACHED_MESSAGE: &str = "100% limit reached";

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub shown_at: f64,
}

impl Notice {
    pub fn is_visible(&self, now: f64) -> bool {
        now >= self.shown_at && now - self.shown_at < NOTICE_SECONDS
    }
}

/// All user-editable state for one calculator session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub weights: RawWeights,
    pub base: PerStat<u32>,
    pub points: u32,
    pub nature: Nature,
    notice: Option<Notice>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_preset(preset: &FormationPreset) -> Result<Self, ConfigError> {
        let weights = RawWeights::new(preset.weights)?;
        Ok(Self {
            weights,
            base: preset.base.map(|_, value| (*value).min(MAX_INPUT)),
            points: preset.points.min(MAX_INPUT),
            nature: Nature::from_name(&preset.nature),
            notice: None,
        })
    }

    pub fn raw_total(&self) -> u32 {
        self.weights.total()
    }

    /// Number of lit dots for `attr`.
    pub fn active_steps(&self, attr: Attribute) -> u32 {
        (self.weights.get(attr) + STEP_PERCENT / 2) / STEP_PERCENT
    }

    pub fn set_weight(
        &mut self,
        attr: Attribute,
        value: u32,
        now: f64,
    ) -> Result<(), AllocationError> {
        match self.weights.try_set(attr, value) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("rejected weight edit: {err}");
                if matches!(err, AllocationError::CapacityExceeded { .. }) {
                    self.show_notice(CAP_REACHED_MESSAGE, now);
                }
                Err(err)
            }
        }
    }

    /// Dot click: selects `step * 5` percent, or clears the attribute when the
    /// clicked level is already selected.
    pub fn toggle_step(
        &mut self,
        attr: Attribute,
        step: u32,
        now: f64,
    ) -> Result<(), AllocationError> {
        let desired = step.min(STEPS) * STEP_PERCENT;
        let next = if self.weights.get(attr) == desired {
            0
        } else {
            desired
        };
        self.set_weight(attr, next, now)
    }

    pub fn set_base(&mut self, attr: Attribute, input: &str) {
        self.base[attr] = clamp_input(input, MAX_INPUT);
    }

    pub fn set_points(&mut self, input: &str) {
        self.points = clamp_input(input, MAX_INPUT);
    }

    pub fn select_nature(&mut self, name: &str) {
        self.nature = Nature::from_name(name);
    }

    pub fn snapshot(&self) -> Formation {
        let allocation = allocate(self.points, &self.weights);
        Formation::new(self.points, self.weights, allocation, self.base, self.nature)
    }

    pub fn export_to(&mut self, sink: &mut dyn ClipboardSink, now: f64) -> ExportStatus {
        let text = self.snapshot().export_text();
        let status = export(sink, &text);
        self.show_notice(status.message(), now);
        status
    }

    pub fn show_notice(&mut self, message: &str, now: f64) {
        self.notice = Some(Notice {
            message: message.to_string(),
            shown_at: now,
        });
    }

    pub fn visible_notice(&self, now: f64) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_visible(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClipboardError;
    use crate::formation::{COPY_FAILED_MESSAGE, COPY_OK_MESSAGE};

    struct MemorySink(Option<String>);

    impl ClipboardSink for MemorySink {
        fn name(&self) -> &'static str {
            "memory"
        }

        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0 = Some(text.to_string());
            Ok(())
        }
    }

    struct DeadSink;

    impl ClipboardSink for DeadSink {
        fn name(&self) -> &'static str {
            "dead"
        }

        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable)
        }
    }

    #[test]
    fn over_cap_edit_changes_nothing() {
        let mut session = SessionState::new();
        session.set_points("100");
        session.set_weight(Attribute::Attack, 60, 0.0).unwrap();
        session.set_weight(Attribute::Defense, 40, 0.0).unwrap();
        let before = session.snapshot();

        let result = session.set_weight(Attribute::Speed, 10, 1.0);
        assert!(matches!(result, Err(AllocationError::CapacityExceeded { .. })));
        assert_eq!(session.weights.as_stats().to_array(), [60, 40, 0, 0, 0]);
        assert_eq!(session.snapshot().added, before.added);
        assert_eq!(
            session.visible_notice(1.5).map(|n| n.message.as_str()),
            Some(CAP_REACHED_MESSAGE)
        );
    }

    #[test]
    fn notice_expires() {
        let mut session = SessionState::new();
        session.show_notice("hello", 10.0);
        assert!(session.visible_notice(10.0).is_some());
        assert!(session.visible_notice(11.7).is_some());
        assert!(session.visible_notice(11.8).is_none());
        session.show_notice("again", 12.0);
        assert_eq!(session.visible_notice(12.5).unwrap().message, "again");
    }

    #[test]
    fn toggle_step_selects_and_clears() {
        let mut session = SessionState::new();
        session.toggle_step(Attribute::Speed, 4, 0.0).unwrap();
        assert_eq!(session.weights.get(Attribute::Speed), 20);
        assert_eq!(session.active_steps(Attribute::Speed), 4);
        session.toggle_step(Attribute::Speed, 4, 0.0).unwrap();
        assert_eq!(session.weights.get(Attribute::Speed), 0);
        session.toggle_step(Attribute::Speed, 20, 0.0).unwrap();
        assert!(session.toggle_step(Attribute::Attack, 1, 0.0).is_err());
        assert_eq!(session.raw_total(), 100);
    }

    #[test]
    fn numeric_fields_are_clamped() {
        let mut session = SessionState::new();
        session.set_points("12.7");
        assert_eq!(session.points, 12);
        session.set_points("lots");
        assert_eq!(session.points, 0);
        session.set_base(Attribute::Defense, "5000000");
        assert_eq!(session.base[Attribute::Defense], MAX_INPUT);
        session.set_base(Attribute::Defense, "-3");
        assert_eq!(session.base[Attribute::Defense], 0);
    }

    #[test]
    fn snapshot_combines_base_and_points() {
        let mut session = SessionState::new();
        session.set_points("11");
        for attr in Attribute::ALL {
            session.set_weight(attr, 20, 0.0).unwrap();
            session.set_base(attr, "10");
        }
        let formation = session.snapshot();
        assert_eq!(formation.added.to_array(), [3, 2, 2, 2, 2]);
        assert_eq!(formation.totals.to_array(), [13, 12, 12, 12, 12]);
        assert_eq!(formation.raw_total, 100);
    }

    #[test]
    fn export_records_status_notice() {
        let mut session = SessionState::new();
        session.select_nature("adamant");
        session.set_base(Attribute::Attack, "50");

        let mut sink = MemorySink(None);
        assert_eq!(session.export_to(&mut sink, 3.0), ExportStatus::Copied);
        let copied = sink.0.unwrap();
        assert!(copied.starts_with("Nature: Adamant\n\n"));
        assert!(copied.contains("• **Attack:** 50 (+)"));
        assert_eq!(session.visible_notice(3.1).unwrap().message, COPY_OK_MESSAGE);

        assert_eq!(session.export_to(&mut DeadSink, 4.0), ExportStatus::Failed);
        assert_eq!(session.visible_notice(4.1).unwrap().message, COPY_FAILED_MESSAGE);
    }

    #[test]
    fn preset_over_cap_is_rejected() {
        let preset = FormationPreset {
            weights: PerStat::from_array([80, 30, 0, 0, 0]),
            ..FormationPreset::default()
        };
        assert!(matches!(
            SessionState::from_preset(&preset),
            Err(ConfigError::WeightCap(_))
        ));
    }
}
