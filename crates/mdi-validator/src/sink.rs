//! # Progress Sink
//!
//! Observer seam for a running scan. The validator never prints; front ends
//! that want per-line progress implement [`ProgressSink`]. Every method
//! defaults to doing nothing, and `()` is the silent sink.

use serde_json::Value;

use crate::line::LineOutcome;
use crate::report::Defect;

/// Receives progress events during a scan, in file order.
pub trait ProgressSink {
    /// A physical line was read and classified.
    fn on_line(&mut self, _line: usize, _outcome: &LineOutcome) {}

    /// A line parsed as JSON. In validate mode the value has already passed
    /// through the legacy field-name adapter.
    fn on_record(&mut self, _line: usize, _value: &Value) {}

    /// A defect was recorded.
    fn on_defect(&mut self, _defect: &Defect) {}

    /// The scan stopped early at the configured line limit.
    fn on_top_reached(&mut self, _top: usize) {}
}

impl ProgressSink for () {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DefectKind;

    #[derive(Default)]
    struct Counting {
        lines: usize,
        defects: usize,
    }

    impl ProgressSink for Counting {
        fn on_line(&mut self, _line: usize, _outcome: &LineOutcome) {
            self.lines += 1;
        }

        fn on_defect(&mut self, _defect: &Defect) {
            self.defects += 1;
        }
    }

    #[test]
    fn default_methods_are_noops() {
        let mut sink = Counting::default();
        sink.on_line(1, &LineOutcome::Blank);
        sink.on_record(1, &Value::Null);
        sink.on_defect(&Defect::at(1, DefectKind::BlankLine));
        sink.on_top_reached(5);
        assert_eq!(sink.lines, 1);
        assert_eq!(sink.defects, 1);
    }

    #[test]
    fn unit_sink_accepts_everything() {
        let sink: &mut dyn ProgressSink = &mut ();
        sink.on_line(1, &LineOutcome::Blank);
        sink.on_top_reached(1);
    }
}
