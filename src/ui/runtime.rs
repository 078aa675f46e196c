use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use log::debug;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use ratatui::crossterm::execute;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::{MissedTickBehavior, interval};

use super::app::{App, SearchOutcome};
use crate::remote::SearchApi;
use crate::storage::SlotStore;

const INPUT_POLL: Duration = Duration::from_millis(50);
const TICK_RATE: Duration = Duration::from_millis(80);

/// Take over the terminal and run `app` until the user executes or cancels.
///
/// Must be awaited on a tokio runtime. The terminal, mouse capture and the
/// input reader thread are released on every exit path.
pub async fn run<C: SearchApi, S: SlotStore>(mut app: App<C, S>) -> Result<SearchOutcome> {
	let mut terminal = ratatui::init();
	if let Err(err) = execute!(io::stdout(), EnableMouseCapture) {
		ratatui::restore();
		return Err(err.into());
	}

	let (event_tx, mut event_rx) = unbounded_channel();
	let reader_running = Arc::new(AtomicBool::new(true));
	let reader = spawn_event_reader(event_tx, Arc::clone(&reader_running));

	let result = app.event_loop(&mut terminal, &mut event_rx).await;

	reader_running.store(false, Ordering::Relaxed);
	let _ = execute!(io::stdout(), DisableMouseCapture);
	ratatui::restore();
	match reader.join() {
		Ok(join_result) => join_result?,
		Err(err) => std::panic::resume_unwind(err),
	}

	result
}

fn spawn_event_reader(
	event_tx: UnboundedSender<Event>,
	running: Arc<AtomicBool>,
) -> thread::JoinHandle<Result<()>> {
	thread::spawn(move || -> Result<()> {
		while running.load(Ordering::Relaxed) {
			if event::poll(INPUT_POLL)? {
				let event = event::read()?;
				if event_tx.send(event).is_err() {
					break;
				}
			}
		}
		Ok(())
	})
}

impl<C: SearchApi, S: SlotStore> App<C, S> {
	async fn event_loop(
		&mut self,
		terminal: &mut DefaultTerminal,
		events: &mut UnboundedReceiver<Event>,
	) -> Result<SearchOutcome> {
		let mut tick = interval(TICK_RATE);
		tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

		loop {
			terminal.draw(|frame| self.draw(frame))?;

			tokio::select! {
				event = events.recv() => {
					let event = event.ok_or_else(|| anyhow!("input event channel disconnected"))?;
					if let Some(outcome) = self.handle_event(event) {
						debug!("search surface closed (accepted: {})", outcome.accepted);
						return Ok(outcome);
					}
				}
				text = self.debouncer.settled(), if self.debouncer.is_pending() => {
					self.on_settled(text);
				}
				Some(response) = self.search.next_response(), if self.search.has_in_flight() => {
					self.on_response(response);
				}
				_ = tick.tick() => {
					if self.session.remote().is_pending() {
						self.throbber_state.calc_next();
					}
				}
			}
		}
	}
}
