//! Transient user notices
//!
//! A submission posts a short success or failure message that disappears on
//! its own after a fixed delay. The slot holds at most one notice; posting a
//! new one supersedes the old one and its deadline. Time is supplied by the
//! caller, so the slot never spawns a timer of its own.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Submission failed. Please try again.";

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
	Success,
	Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub kind: NoticeKind,
	pub message: String,
	pub expires_at: Instant,
}

impl Notice {
	pub fn is_expired(&self, now: Instant) -> bool {
		now >= self.expires_at
	}
}

#[derive(Debug, Clone)]
pub struct NoticeSlot {
	current: Option<Notice>,
	ttl: Duration,
}

impl NoticeSlot {
	pub fn new() -> Self {
		Self::with_ttl(NOTICE_TTL)
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self { current: None, ttl }
	}

	/// Show `message` until `now + ttl`, replacing any visible notice.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::notice::{NoticeKind, NoticeSlot};
	/// use std::time::{Duration, Instant};
	///
	/// let mut slot = NoticeSlot::new();
	/// let start = Instant::now();
	/// slot.post(NoticeKind::Success, "Saved", start);
	///
	/// assert_eq!(slot.current(start).map(|n| n.message.as_str()), Some("Saved"));
	/// assert!(slot.current(start + Duration::from_secs(3)).is_none());
	/// ```
	pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
		self.current = Some(Notice {
			kind,
			message: message.into(),
			expires_at: now + self.ttl,
		});
	}

	/// The visible notice at `now`, if it has not yet expired.
	pub fn current(&self, now: Instant) -> Option<&Notice> {
		self.current.as_ref().filter(|notice| !notice.is_expired(now))
	}

	/// Drop the notice once its deadline has passed.
	pub fn clear_expired(&mut self, now: Instant) {
		if self.current.as_ref().is_some_and(|notice| notice.is_expired(now)) {
			self.current = None;
		}
	}

	pub fn clear(&mut self) {
		self.current = None;
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}

impl Default for NoticeSlot {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_newer_notice_supersedes_older_deadline() {
		// Arrange
		let mut slot = NoticeSlot::new();
		let start = Instant::now();
		slot.post(NoticeKind::Failure, SUBMIT_FAILURE_MESSAGE, start);

		// Act
		let later = start + Duration::from_secs(2);
		slot.post(NoticeKind::Success, SUBMIT_SUCCESS_MESSAGE, later);

		// Assert: the first deadline has passed, the second has not
		let at = start + Duration::from_millis(3500);
		let notice = slot.current(at).unwrap();
		assert_eq!(notice.kind, NoticeKind::Success);
		assert_eq!(notice.message, SUBMIT_SUCCESS_MESSAGE);
	}

	#[rstest]
	fn test_clear_expired_only_drops_stale_notice() {
		// Arrange
		let mut slot = NoticeSlot::with_ttl(Duration::from_millis(100));
		let start = Instant::now();
		slot.post(NoticeKind::Success, "ok", start);

		// Act + Assert
		slot.clear_expired(start + Duration::from_millis(50));
		assert!(slot.current(start + Duration::from_millis(50)).is_some());

		slot.clear_expired(start + Duration::from_millis(100));
		assert!(slot.current(start).is_none());
	}
}
