//! Scroll-triggered numeric counter animation and entrance effects.
//!
//! Elements carrying the `stat-value` class are registered as counter
//! candidates when the page opens. A visibility scan runs on every scroll
//! event and once from a 500 ms startup timer; each candidate that has
//! entered the trigger band is handed to the frame-driven runner exactly
//! once and then dropped from the watch list, so scans stay cheap and an
//! element can never animate twice.
//!
//! The runner counts from zero to the value parsed out of the element's
//! initial text over 1.5 s with a quartic ease-out, rewriting the text on
//! every 16 ms frame. Percent sources render with one decimal and a `%`
//! suffix; everything else renders floored with thousands separators.

use super::*;
use unicode_normalization::UnicodeNormalization;

pub const COUNTER_DURATION_MS: i64 = 1_500;
pub(crate) const FRAME_INTERVAL_MS: i64 = 16;
pub(crate) const STARTUP_SWEEP_DELAY_MS: i64 = 500;

pub(crate) const COUNTER_MARKER_CLASS: &str = "stat-value";
/// Element top must be above this fraction of the viewport height.
pub(crate) const COUNTER_TRIGGER_BAND: f64 = 0.85;

pub(crate) const ENTRANCE_CLASS: &str = "animate-in";
pub(crate) const ENTRANCE_SELECTOR: &str = ".about-card, .service-card, .investment-card";
/// Visible fraction of the element's own height required to trigger.
pub(crate) const ENTRANCE_THRESHOLD: f64 = 0.1;
/// The entrance band stops this many pixels short of the viewport bottom.
pub(crate) const ENTRANCE_BOTTOM_MARGIN: f64 = 100.0;

/// Quartic ease-out: fast start, long settle. Input is clamped to [0, 1].
pub fn ease_out_quart(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Extracts the numeric animation target from an element's text. The text
/// is NFKC-normalized, then every character except ASCII digits and `.` is
/// dropped before parsing. Text with no parseable number yields `None`.
pub fn parse_target(text: &str) -> Option<f64> {
    let digits: String = text
        .nfkc()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Renders an in-flight counter value. Percent targets keep one decimal;
/// plain numbers are floored and grouped with commas.
pub fn format_value(value: f64, is_percent: bool) -> String {
    if is_percent {
        format!("{value:.1}%")
    } else {
        group_thousands(value.floor() as i64)
    }
}

pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let first_group = digits.len() % 3;
    let mut written = 0usize;
    if first_group > 0 {
        out.push_str(&digits[..first_group]);
        written = first_group;
    }
    while written < digits.len() {
        if written > 0 {
            out.push(',');
        }
        out.push_str(&digits[written..written + 3]);
        written += 3;
    }
    out
}

/// One element's animation in flight. The start timestamp is captured on
/// the first frame that services the run, not at enqueue time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CounterRun {
    pub(crate) node: NodeId,
    pub(crate) target: f64,
    pub(crate) is_percent: bool,
    pub(crate) started_at: Option<i64>,
}

impl Page {
    /// Registers every marker element present at load. Elements added to
    /// the DOM later are not picked up; the watch list is fixed at open.
    pub(crate) fn register_counter_watch(&mut self) -> Result<()> {
        self.counter_watch = self
            .dom
            .query_selector_all(&format!(".{COUNTER_MARKER_CLASS}"))?;
        Ok(())
    }

    pub(crate) fn register_entrance_watch(&mut self) -> Result<()> {
        self.entrance_watch = self.dom.query_selector_all(ENTRANCE_SELECTOR)?;
        Ok(())
    }

    /// One visibility pass over the counter watch list. Triggered elements
    /// deregister so later passes skip them entirely; elements whose text
    /// has no parseable number also deregister, without animating.
    pub(crate) fn scan_counters(&mut self) -> Result<()> {
        let watch = std::mem::take(&mut self.counter_watch);
        let band = self.viewport.height as f64 * COUNTER_TRIGGER_BAND;

        for node in watch {
            if self.animated.contains(&node) {
                continue;
            }
            let rect = self.dom.bounding_rect(node, self.viewport.scroll_y);
            if !(rect.top <= band && rect.bottom >= 0.0) {
                self.counter_watch.push(node);
                continue;
            }

            let Some(target) = parse_target(&self.dom.text_content(node)) else {
                // Non-numeric text is left untouched and never rechecked.
                continue;
            };

            let is_percent = self.dom.text_content(node).contains('%');
            self.animated.insert(node);
            self.enqueue_counter_run(CounterRun {
                node,
                target,
                is_percent,
                started_at: None,
            });
        }

        Ok(())
    }

    /// One visibility pass over the entrance watch list. A card whose
    /// visible height reaches the threshold gains the entrance class and
    /// deregisters.
    pub(crate) fn scan_entrances(&mut self) -> Result<()> {
        let watch = std::mem::take(&mut self.entrance_watch);
        let band_bottom = self.viewport.height as f64 - ENTRANCE_BOTTOM_MARGIN;

        for node in watch {
            let rect = self.dom.bounding_rect(node, self.viewport.scroll_y);
            let height = rect.bottom - rect.top;
            if height <= 0.0 {
                self.entrance_watch.push(node);
                continue;
            }

            let visible = rect.bottom.min(band_bottom) - rect.top.max(0.0);
            if visible / height >= ENTRANCE_THRESHOLD {
                self.dom.add_class(node, ENTRANCE_CLASS)?;
            } else {
                self.entrance_watch.push(node);
            }
        }

        Ok(())
    }

    /// Counter elements still waiting for their trigger.
    pub fn pending_counter_count(&self) -> usize {
        self.counter_watch.len()
    }

    /// Counter elements that have already triggered.
    pub fn animated_counter_count(&self) -> usize {
        self.animated.len()
    }

    fn enqueue_counter_run(&mut self, run: CounterRun) {
        if self.next_frame_at.is_none() {
            // First tick lands on the next frame boundary after now.
            self.next_frame_at = Some((self.now_ms / FRAME_INTERVAL_MS + 1) * FRAME_INTERVAL_MS);
        }
        self.trace_frame_line(format!(
            "[frame] enqueue target={} is_percent={} next_tick={}",
            run.target,
            run.is_percent,
            self.next_frame_at.unwrap_or_default()
        ));
        self.frame_queue.push(run);
    }

    /// Services one animation frame: steps every live run, rewrites the
    /// element text, and requeues runs that have not reached the target.
    pub(crate) fn run_frame_tick(&mut self) -> Result<()> {
        let Some(ts) = self.next_frame_at.take() else {
            return Ok(());
        };

        let runs = std::mem::take(&mut self.frame_queue);
        let count = runs.len();
        for mut run in runs {
            let started = *run.started_at.get_or_insert(ts);
            let progress =
                ((ts - started) as f64 / COUNTER_DURATION_MS as f64).clamp(0.0, 1.0);
            let value = run.target * ease_out_quart(progress);
            self.dom
                .set_text_content(run.node, &format_value(value, run.is_percent))?;
            if progress < 1.0 {
                self.frame_queue.push(run);
            }
        }

        if !self.frame_queue.is_empty() {
            self.next_frame_at = Some(ts + FRAME_INTERVAL_MS);
        }

        self.trace_frame_line(format!(
            "[frame] tick ts={ts} ran={count} live={}",
            self.frame_queue.len()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod counter_math_tests {
    use super::*;

    #[test]
    fn easing_endpoints_and_clamping() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(-2.0), 0.0);
        assert_eq!(ease_out_quart(3.0), 1.0);
    }

    #[test]
    fn easing_front_loads_motion() {
        // Half the time should cover well over half the distance.
        assert!(ease_out_quart(0.5) > 0.9);
        assert!(ease_out_quart(0.2) < ease_out_quart(0.8));
    }

    #[test]
    fn parse_target_strips_decorations() {
        assert_eq!(parse_target("85%"), Some(85.0));
        assert_eq!(parse_target("12,450"), Some(12450.0));
        assert_eq!(parse_target("$1,299 raised"), Some(1299.0));
        assert_eq!(parse_target("4.5"), Some(4.5));
        assert_eq!(parse_target("N/A"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("coming soon"), None);
    }

    #[test]
    fn parse_target_normalizes_fullwidth_digits() {
        assert_eq!(parse_target("１２３"), Some(123.0));
    }

    #[test]
    fn format_value_percent_keeps_one_decimal() {
        assert_eq!(format_value(85.0, true), "85.0%");
        assert_eq!(format_value(12.34, true), "12.3%");
        assert_eq!(format_value(0.0, true), "0.0%");
    }

    #[test]
    fn format_value_plain_floors_and_groups() {
        assert_eq!(format_value(12450.0, false), "12,450");
        assert_eq!(format_value(999.99, false), "999");
        assert_eq!(format_value(1000000.5, false), "1,000,000");
        assert_eq!(format_value(0.9, false), "0");
    }

    #[test]
    fn group_thousands_handles_signs_and_sizes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-45678), "-45,678");
    }
}
