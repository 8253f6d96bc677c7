//! Side-channel diagnostics for recoverable extraction degradations.
//!
//! Extraction never aborts a slide or file because one shape failed to
//! classify; instead the failure is recorded here and the affected block is
//! omitted. The collector is threaded through the extraction context so
//! callers can inspect what was dropped; events are also forwarded to the
//! `log` crate as they are recorded.

/// What kind of content was degraded or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationKind {
    /// Section data was present but unusable; a later resolution tier took
    /// over.
    SectionResolutionDegraded,

    /// A shape matched no classification branch cleanly.
    ShapeUnclassifiable,

    /// A relationship id did not resolve to a package part.
    MediaRelationshipMissing,

    /// Diagram data was absent, unparsable, or structurally empty.
    DiagramMalformed,

    /// An image/video/icon blob could not be written to disk.
    MediaWriteFailure,
}

impl DegradationKind {
    /// Whether this event is worth a warning rather than a debug line.
    fn is_warning(self) -> bool {
        matches!(
            self,
            DegradationKind::SectionResolutionDegraded | DegradationKind::DiagramMalformed
        )
    }
}

/// One recorded degradation event.
#[derive(Debug, Clone)]
pub struct Degradation {
    pub kind: DegradationKind,
    pub detail: String,
}

/// Collector for degradation events during one extraction pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Vec<Degradation>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and forward it to the logger.
    pub fn record(&mut self, kind: DegradationKind, detail: impl Into<String>) {
        let detail = detail.into();
        if kind.is_warning() {
            log::warn!("{:?}: {}", kind, detail);
        } else {
            log::debug!("{:?}: {}", kind, detail);
        }
        self.events.push(Degradation { kind, detail });
    }

    /// All events recorded so far, in order.
    pub fn events(&self) -> &[Degradation] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
