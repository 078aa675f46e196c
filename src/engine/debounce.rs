//! Debounced propagation of a rapidly changing value.
//!
//! A [`Debouncer`] owns exactly one timer. Every [`Debouncer::push`] re-arms
//! that timer instead of scheduling another one, so superseded values are
//! dropped together with their deadline and nothing is left to fire later.

use std::future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep, sleep_until};

pub struct Debouncer<T> {
	delay: Duration,
	timer: Option<Pin<Box<Sleep>>>,
	pending: Option<T>,
}

impl<T> Debouncer<T> {
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			timer: None,
			pending: None,
		}
	}

	#[must_use]
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Replace the pending value and restart the delay.
	///
	/// Must be called from within a tokio runtime. Never yields the value
	/// synchronously, even with a zero delay.
	pub fn push(&mut self, value: T) {
		let deadline = Instant::now() + self.delay;
		self.pending = Some(value);
		match self.timer.as_mut() {
			Some(timer) => timer.as_mut().reset(deadline),
			None => self.timer = Some(Box::pin(sleep_until(deadline))),
		}
	}

	/// Drop the pending value and release the timer.
	pub fn cancel(&mut self) {
		self.pending = None;
		self.timer = None;
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Resolve with the latest value once it has been stable for the delay.
	///
	/// Never resolves while nothing is pending. Safe to use as a
	/// `tokio::select!` branch: dropping the future keeps the pending value
	/// and its deadline.
	pub async fn settled(&mut self) -> T {
		let Some(timer) = self.timer.as_mut() else {
			return future::pending().await;
		};
		timer.as_mut().await;
		self.timer = None;
		match self.pending.take() {
			Some(value) => value,
			None => future::pending().await,
		}
	}
}

impl<T> Drop for Debouncer<T> {
	fn drop(&mut self) {
		self.cancel();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokio::time::{advance, timeout};

	const DELAY: Duration = Duration::from_millis(300);

	#[tokio::test(start_paused = true)]
	async fn burst_settles_once_on_last_value() {
		let mut debouncer = Debouncer::new(DELAY);
		for text in ["j", "ja", "jav", "java"] {
			debouncer.push(text.to_string());
			advance(Duration::from_millis(100)).await;
		}

		let started = Instant::now();
		let settled = debouncer.settled().await;
		assert_eq!(settled, "java");
		assert_eq!(started.elapsed(), Duration::from_millis(200));
		assert!(!debouncer.is_pending());

		let again = timeout(Duration::from_secs(10), debouncer.settled()).await;
		assert!(again.is_err(), "a settled run must not emit twice");
	}

	#[tokio::test(start_paused = true)]
	async fn separated_runs_each_settle() {
		let mut debouncer = Debouncer::new(DELAY);
		debouncer.push(1);
		assert_eq!(debouncer.settled().await, 1);

		advance(DELAY).await;
		debouncer.push(2);
		debouncer.push(3);
		assert_eq!(debouncer.settled().await, 3);
	}

	#[tokio::test(start_paused = true)]
	async fn cancelled_value_never_surfaces() {
		let mut debouncer = Debouncer::new(DELAY);
		debouncer.push("stale");
		debouncer.cancel();

		let result = timeout(DELAY * 4, debouncer.settled()).await;
		assert!(result.is_err());
		assert!(!debouncer.is_pending());
	}

	#[tokio::test(start_paused = true)]
	async fn zero_delay_still_defers() {
		let mut debouncer = Debouncer::new(Duration::ZERO);
		debouncer.push("now");
		assert!(debouncer.is_pending(), "push must not deliver synchronously");
		assert_eq!(debouncer.settled().await, "now");
	}

	#[tokio::test(start_paused = true)]
	async fn dropped_settle_future_keeps_pending_value() {
		let mut debouncer = Debouncer::new(DELAY);
		debouncer.push("rust");
		let early = timeout(Duration::from_millis(50), debouncer.settled()).await;
		assert!(early.is_err());
		assert!(debouncer.is_pending());
		assert_eq!(debouncer.settled().await, "rust");
	}
}
