//! Test capture mode for mapper operation events
//!
//! Installs a global layer that records every `log_op_start!` /
//! `log_op_end!` event with its canonical fields decoded, so tests can
//! assert on ids, row counts and durations without parsing strings.

use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use super::schema::{
    EVENT_END, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_EMPLOYEE_ID, FIELD_EVENT, FIELD_FOUND,
    FIELD_OP, FIELD_REVIEW_ID, FIELD_ROWS,
};

/// One recorded operation event
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapturedEvent {
    pub level: Option<Level>,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub duration_ms: Option<u64>,
    pub employee_id: Option<i64>,
    pub review_id: Option<i64>,
    pub rows: Option<u64>,
    pub found: Option<bool>,
}

impl CapturedEvent {
    fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

impl Visit for CapturedEvent {
    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            FIELD_COMPONENT => &mut self.component,
            FIELD_OP => &mut self.op,
            FIELD_EVENT => &mut self.event,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            FIELD_EMPLOYEE_ID => self.employee_id = Some(value),
            FIELD_REVIEW_ID => self.review_id = Some(value),
            FIELD_DURATION_MS | FIELD_ROWS => {
                self.record_u64(field, u64::try_from(value).unwrap_or_default())
            }
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            FIELD_DURATION_MS => self.duration_ms = Some(value),
            FIELD_ROWS => self.rows = Some(value),
            FIELD_EMPLOYEE_ID | FIELD_REVIEW_ID => {
                self.record_i64(field, i64::try_from(value).unwrap_or(i64::MAX))
            }
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == FIELD_FOUND {
            self.found = Some(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    sink: Sink,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = CapturedEvent {
            level: Some(*event.metadata().level()),
            ..CapturedEvent::default()
        };
        event.record(&mut captured);
        if captured.op.is_none() {
            return;
        }
        if let Ok(mut events) = self.sink.lock() {
            events.push(captured);
        }
    }
}

/// Shared handle onto the captured events
#[derive(Clone)]
pub struct TestCapture {
    sink: Sink,
}

impl TestCapture {
    /// All captured events in emission order
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.sink.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events recorded for one operation, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Number of `event` records emitted for `op`
    pub fn count(&self, op: &str, event: &str) -> usize {
        self.events().iter().filter(|e| e.is(op, event)).count()
    }

    /// Most recent successful end event for `op`
    pub fn last_end(&self, op: &str) -> Option<CapturedEvent> {
        self.events().into_iter().rev().find(|e| e.is(op, EVENT_END))
    }

    /// Assert that `op` emitted at least one `event` record
    ///
    /// # Panics
    ///
    /// Panics if no such event was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        assert!(
            self.count(op, event) > 0,
            "Expected event op={} event={} not captured",
            op,
            event
        );
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer once per process and return its handle
///
/// # Example
///
/// ```
/// use roster_core::logging_facility::test_capture::init_test_capture;
/// use roster_core::log_op_end;
///
/// let capture = init_test_capture();
/// log_op_end!("review.update", duration_ms = 2, review_id = 7);
/// assert_eq!(capture.last_end("review.update").unwrap().review_id, Some(7));
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let sink = Sink::default();
            tracing_subscriber::registry()
                .with(CaptureLayer { sink: sink.clone() })
                .init();
            TestCapture { sink }
        })
        .clone()
}
