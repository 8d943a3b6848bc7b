//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop over input, ticks and pending timers.
//! - Route input to the main view and execute returned `Effect`s.
//!
//! Ticking runs fast (100 ms) only while something animates: a submission
//! in flight or a visible toast. Otherwise it idles at 5 s.
//!
//! Entry point: `run_app(app)` is called from `lib::run`.
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::MouseEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use digitalfront_types::{Effect, ExecOutcome, Msg, SubmissionPhase};
use futures_util::{StreamExt, stream::FuturesUnordered};
use rat_focus::FocusBuilder;
use ratatui::{Terminal, prelude::*};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::app::App;
use crate::cmd;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

/// Spawn a dedicated input task that polls the terminal and forwards
/// `crossterm` events over a Tokio channel.
async fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_move: Option<Instant> = Some(Instant::now());

    tokio::spawn(async move {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            if event::poll(sixteen_ms).is_ok() {
                match event::read() {
                    Ok(event) => {
                        // Throttle mouse moves events to once per 16 ms.
                        let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                        let should_send = !is_mouse_move || last_mouse_move.is_some_and(|last| last.elapsed() >= sixteen_ms);
                        if is_mouse_move && should_send {
                            last_mouse_move = Some(Instant::now());
                        }

                        if should_send && let Err(e) = sender.send(event).await {
                            warn!("Failed to send event: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read event: {}", e);
                        break;
                    }
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Renders a frame through the main view.
fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    // Rebuild focus just before rendering so structure changes are reflected
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = FocusBuilder::rebuild_for(app, Some(old_focus));
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Feeds a polled terminal size through the regular resize path when it
/// differs from the last one seen. Returns `None` when nothing changed.
fn apply_polled_size(
    app: &mut App,
    main_view: &mut MainView,
    last_size: &mut Option<(u16, u16)>,
    polled: Option<(u16, u16)>,
) -> Option<Vec<Effect>> {
    let (width, height) = polled?;
    if *last_size == Some((width, height)) {
        return None;
    }
    *last_size = Some((width, height));
    Some(main_view.handle_message(app, Msg::Resize(width, height)))
}

fn needs_animation(app: &App) -> bool {
    app.contact.phase() == SubmissionPhase::Submitting || !app.toasts.is_empty()
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the event
/// producer, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut input_receiver = spawn_input_thread().await;
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;

    let mut pending_execs: FuturesUnordered<JoinHandle<ExecOutcome>> = FuturesUnordered::new();
    let mut effects: Vec<Effect> = Vec::with_capacity(5);

    // Track the last known terminal size to synthesize Resize messages when
    // some terminals fail to emit them reliably.
    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();
    if let Some((width, height)) = last_size {
        effects.extend(main_view.handle_message(&mut app, Msg::Resize(width, height)));
    }

    // Ticking strategy: fast while animating, very slow when idle.
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app, &mut main_view)?;

    loop {
        let target_interval = if needs_animation(&app) || !effects.is_empty() {
            fast_interval
        } else {
            idle_interval
        };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }
        let mut needs_render = false;
        tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                if let Some(event) = maybe_event {
                    if let Event::Key(key_event) = event
                        && key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                            break;
                        }
                    effects.extend(handle_input_event(&mut app, &mut main_view, event));
                } else {
                    // Input channel closed; break out to shut down cleanly.
                    break;
                }
                needs_render = true;
            }

            // Periodic animation tick
            _ = ticker.tick() => {
                let animating = needs_animation(&app);
                effects.extend(main_view.handle_message(&mut app, Msg::Tick));
                needs_render = animating || !effects.is_empty();
            }

            Some(joined) = pending_execs.next(), if !pending_execs.is_empty() => {
                match joined {
                    Ok(ExecOutcome::Message(msg)) => effects.extend(main_view.handle_message(&mut app, msg)),
                    Ok(ExecOutcome::Log(line)) => debug!("{line}"),
                    Err(error) => warn!(%error, "background task failed"),
                }
                needs_render = true;
            }

            // Handle Ctrl+C
            _ = signal::ctrl_c() => { break; }
        }

        // Fallback: detect terminal size changes even if no explicit Resize
        // event was received.
        if let Some(resize_effects) = apply_polled_size(&mut app, &mut main_view, &mut last_size, crossterm::terminal::size().ok()) {
            effects.extend(resize_effects);
            needs_render = true;
        }

        // Effects can produce messages that produce more effects; drain until quiet.
        while !effects.is_empty() {
            let mut effects_to_process = std::mem::take(&mut effects);
            handle_local_effects(&mut app, &mut effects_to_process, &mut effects);
            process_effects(&mut app, &mut main_view, effects_to_process, &mut pending_execs, &mut effects);
            needs_render = true;
        }
        if app.should_quit {
            break;
        }

        if needs_render {
            render(&mut terminal, &mut app, &mut main_view)?;
        }
    }

    app.shutdown();
    // Pending resets must never reach the torn-down form.
    for handle in pending_execs.iter() {
        handle.abort();
    }
    cleanup_terminal(&mut terminal)?;
    Ok(())
}

/// Applies effects that only touch in-process state (toasts, scrolling,
/// quitting) and removes them from `effects`.
fn handle_local_effects(app: &mut App, effects: &mut Vec<Effect>, queued_effects: &mut Vec<Effect>) {
    let local_effects = effects
        .extract_if(0.., |effect| {
            matches!(effect, Effect::ShowToast(_) | Effect::ScrollToAnchor(_) | Effect::Quit)
        })
        .collect::<Vec<Effect>>();

    for effect in local_effects {
        match effect {
            Effect::ShowToast(toast) => app.show_toast(toast),
            Effect::ScrollToAnchor(anchor) => queued_effects.extend(app.scroll_to_anchor(&anchor)),
            Effect::Quit => app.should_quit = true,
            _ => {}
        }
    }
}

fn process_effects(
    app: &mut App,
    main_view: &mut MainView,
    effects: Vec<Effect>,
    pending_execs: &mut FuturesUnordered<JoinHandle<ExecOutcome>>,
    effects_out: &mut Vec<Effect>,
) {
    if effects.is_empty() {
        return;
    }

    let command_batch = cmd::run_from_effects(app, effects);
    pending_execs.extend(command_batch.pending);

    for outcome in command_batch.immediate {
        match outcome {
            ExecOutcome::Message(msg) => effects_out.extend(main_view.handle_message(app, msg)),
            ExecOutcome::Log(line) => debug!("{line}"),
        }
    }
}
