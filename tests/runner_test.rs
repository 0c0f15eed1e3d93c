use anyhow::{bail, Result};

use term_fx::core::effects::TunnelMarch;
use term_fx::core::{Effect, EffectRegistry, Flow};
use term_fx::engine::{EffectRunner, RunOutcome, RunnerState};
use term_fx::input::ScriptedInput;
use term_fx::term::{ScreenBuffer, Terminal, VirtualTerminal};
use term_fx::types::{Color, RunOptions};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Records what the runner asked of it and finishes after `limit` frames.
#[derive(Default)]
struct Recorder {
    limit: u64,
    resets: Vec<(u16, u16, u64)>,
    dts: Vec<u32>,
    frames: Vec<u64>,
    fail_at: Option<u64>,
    panic_at: Option<u64>,
}

impl Recorder {
    fn finishing_after(limit: u64) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

impl Effect for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn description(&self) -> &'static str {
        "test effect"
    }

    fn default_interval_ms(&self) -> u32 {
        10
    }

    fn reset(&mut self, width: u16, height: u16, seed: u64) {
        self.resets.push((width, height, seed));
    }

    fn step(&mut self, buf: &mut ScreenBuffer, dt_ms: u32, frame: u64) -> Result<Flow> {
        if self.fail_at == Some(frame) {
            bail!("simulated failure");
        }
        if self.panic_at == Some(frame) {
            panic!("simulated panic");
        }
        self.dts.push(dt_ms);
        self.frames.push(frame);
        buf.clear();
        buf.put_char(frame as i32, 0, '#', Color::White);
        if frame + 1 >= self.limit {
            Ok(Flow::Finished)
        } else {
            Ok(Flow::Continue)
        }
    }
}

/// A virtual terminal that changes size after a number of size queries.
struct ResizingTerminal {
    inner: VirtualTerminal,
    size_queries: usize,
    resize_at: usize,
    new_size: (u16, u16),
}

impl Terminal for ResizingTerminal {
    fn enter(&mut self) -> Result<()> {
        self.inner.enter()
    }

    fn leave(&mut self) -> Result<()> {
        self.inner.leave()
    }

    fn size(&mut self) -> Result<(u16, u16)> {
        self.size_queries += 1;
        if self.size_queries == self.resize_at {
            self.inner.set_size(self.new_size.0, self.new_size.1);
        }
        self.inner.size()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.inner.set_cursor_visible(visible)
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.inner.move_to(x, y)
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()> {
        self.inner.set_colors(fg, bg)
    }

    fn put_char(&mut self, ch: char) -> Result<()> {
        self.inner.put_char(ch)
    }

    fn reset_colors(&mut self) -> Result<()> {
        self.inner.reset_colors()
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

fn assert_restored(term: &VirtualTerminal) {
    assert!(!term.is_entered());
    assert!(term.cursor_visible());
    assert_eq!(term.current_colors(), (Color::Gray, Color::Black));
    assert_eq!(term.stats().leaves, 1);
}

#[test]
fn life_runs_for_its_duration_then_returns_to_idle() {
    let registry = EffectRegistry::builtin();
    let mut life = registry.create("life", &[]).unwrap();
    let mut runner = EffectRunner::new(VirtualTerminal::new(40, 20), ScriptedInput::never());

    let options = RunOptions::default()
        .with_duration_ms(100)
        .with_frame_interval_ms(10)
        .with_seed(42);
    let report = runner.run(life.as_mut(), options);

    assert_eq!(report.outcome, RunOutcome::Expired);
    assert!(report.error.is_none());
    assert!(report.frames >= 1 && report.frames <= 10, "frames = {}", report.frames);
    assert_eq!(report.seed, 42);
    assert_eq!(report.interval_ms, 10);
    assert_eq!(runner.state(), RunnerState::Idle);
    assert_eq!(runner.input().consumed(), 0);
    assert_restored(runner.terminal());
}

#[test]
fn key_press_cancels_and_is_consumed_once() {
    let mut effect = Recorder::finishing_after(u64::MAX);
    let mut runner = EffectRunner::new(
        VirtualTerminal::new(20, 5),
        ScriptedInput::key_at_poll(4),
    );

    let report = runner.run(&mut effect, RunOptions::default().with_seed(1));

    assert_eq!(report.outcome, RunOutcome::Cancelled);
    // Three clean polls, three frames; the fourth poll sees the key.
    assert_eq!(report.frames, 3);
    assert_eq!(effect.frames, vec![0, 1, 2]);
    assert_eq!(runner.input().polls(), 4);
    assert_eq!(runner.input().consumed(), 1);
    assert_eq!(runner.input().pending(), 0);
    assert_restored(runner.terminal());
}

#[test]
fn key_pending_before_start_runs_no_frames() {
    let mut effect = Recorder::finishing_after(u64::MAX);
    let mut runner = EffectRunner::new(
        VirtualTerminal::new(20, 5),
        ScriptedInput::key_at_poll(1),
    );

    let report = runner.run(&mut effect, RunOptions::default());

    assert_eq!(report.outcome, RunOutcome::Cancelled);
    assert_eq!(report.frames, 0);
    assert!(effect.frames.is_empty());
    assert_eq!(effect.resets.len(), 1);
    assert_eq!(runner.input().consumed(), 1);
}

#[test]
fn finished_effect_completes_without_consuming_input() {
    let mut tunnel = TunnelMarch::with_frame_limit(Some(5));
    let mut runner = EffectRunner::new(VirtualTerminal::new(30, 10), ScriptedInput::never());

    let report = runner.run(&mut tunnel, RunOptions::default().with_frame_interval_ms(10));

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.frames, 5);
    assert_eq!(runner.input().consumed(), 0);
    assert_restored(runner.terminal());
}

#[test]
fn first_frame_gets_the_interval_and_frames_are_sequential() {
    let mut effect = Recorder::finishing_after(4);
    let mut runner = EffectRunner::new(VirtualTerminal::new(10, 3), ScriptedInput::never());

    let options = RunOptions::default().with_frame_interval_ms(20).with_seed(3);
    let report = runner.run(&mut effect, options);

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(effect.frames, vec![0, 1, 2, 3]);
    assert_eq!(effect.dts[0], 20);
    // Later frames measure real time, which is never shorter than the sleep.
    assert!(effect.dts[1..].iter().all(|&dt| dt >= 15));
    assert_eq!(effect.resets, vec![(10, 3, 3)]);
}

#[test]
fn interval_is_clamped() {
    let mut effect = Recorder::finishing_after(1);
    let mut runner = EffectRunner::new(VirtualTerminal::new(10, 3), ScriptedInput::never());

    let fast = runner.run(&mut effect, RunOptions::default().with_frame_interval_ms(1));
    assert_eq!(fast.interval_ms, 10);

    let slow = runner.run(&mut effect, RunOptions::default().with_frame_interval_ms(60_000));
    assert_eq!(slow.interval_ms, 1000);
}

#[test]
fn effect_error_aborts_and_still_cleans_up() {
    let mut effect = Recorder {
        limit: u64::MAX,
        fail_at: Some(2),
        ..Recorder::default()
    };
    let mut runner = EffectRunner::new(VirtualTerminal::new(20, 5), ScriptedInput::never());

    let report = runner.run(&mut effect, RunOptions::default());

    assert_eq!(report.outcome, RunOutcome::Aborted);
    assert_eq!(report.frames, 2);
    let err = report.error.expect("aborted runs carry their error");
    assert!(err.to_string().contains("simulated failure"));
    assert_eq!(runner.state(), RunnerState::Idle);
    assert_restored(runner.terminal());
    assert_eq!(runner.terminal().stats().clears, 2);
}

#[test]
fn terminal_error_aborts_the_run() {
    let mut term = VirtualTerminal::new(20, 5);
    term.fail_flushes(true);
    let mut effect = Recorder::finishing_after(u64::MAX);
    let mut runner = EffectRunner::new(term, ScriptedInput::never());

    let report = runner.run(&mut effect, RunOptions::default());

    assert_eq!(report.outcome, RunOutcome::Aborted);
    assert_eq!(report.frames, 0);
    assert!(report.error.is_some());
    assert!(!runner.terminal().is_entered());
    assert!(runner.terminal().cursor_visible());
}

#[test]
fn panic_in_step_aborts_and_returns_to_idle() {
    let mut effect = Recorder {
        limit: u64::MAX,
        panic_at: Some(1),
        ..Recorder::default()
    };
    let mut runner = EffectRunner::new(VirtualTerminal::new(20, 5), ScriptedInput::never());

    let report = runner.run(&mut effect, RunOptions::default());

    assert_eq!(report.outcome, RunOutcome::Aborted);
    assert_eq!(report.frames, 1);
    let err = report.error.expect("panics are reported as errors");
    assert!(err.to_string().contains("simulated panic"));
    assert_eq!(runner.state(), RunnerState::Idle);
    assert_restored(runner.terminal());

    // The runner is usable again afterwards.
    let mut tunnel = TunnelMarch::with_frame_limit(Some(1));
    let again = runner.run(&mut tunnel, RunOptions::default());
    assert_eq!(again.outcome, RunOutcome::Completed);
}

#[test]
fn failed_enter_aborts_and_releases_the_terminal() {
    let mut term = VirtualTerminal::new(20, 5);
    term.fail_enters(true);
    let mut effect = Recorder::finishing_after(u64::MAX);
    let mut runner = EffectRunner::new(term, ScriptedInput::never());

    let report = runner.run(&mut effect, RunOptions::default());

    assert_eq!(report.outcome, RunOutcome::Aborted);
    assert_eq!(report.frames, 0);
    assert!(effect.resets.is_empty());
    assert_eq!(runner.state(), RunnerState::Idle);
    assert_restored(runner.terminal());
}

#[test]
fn effect_background_reaches_the_screen() {
    let registry = EffectRegistry::builtin();
    let mut wave = registry.create("wave", &args(&["yellow", "darkblue"])).unwrap();
    let mut runner = EffectRunner::new(VirtualTerminal::new(30, 12), ScriptedInput::never());

    let options = RunOptions::default()
        .with_duration_ms(30)
        .with_frame_interval_ms(10);
    let report = runner.run(wave.as_mut(), options);

    assert_eq!(report.outcome, RunOutcome::Expired);
    assert_eq!(runner.buffer().background(), Color::DarkBlue);
    assert!(runner.buffer().cells().iter().all(|c| c.bg == Color::DarkBlue));
    assert!(runner
        .buffer()
        .cells()
        .iter()
        .any(|c| c.ch == '~' && c.fg == Color::Yellow));
}

#[test]
fn resize_rebuilds_buffer_and_resets_with_the_same_seed() {
    let term = ResizingTerminal {
        inner: VirtualTerminal::new(20, 10),
        size_queries: 0,
        // Query 1 sizes the buffer, query 2 is the first tick.
        resize_at: 3,
        new_size: (30, 12),
    };
    let mut effect = Recorder::finishing_after(4);
    let mut runner = EffectRunner::new(term, ScriptedInput::never());

    let report = runner.run(&mut effect, RunOptions::default().with_seed(7));

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(effect.resets, vec![(20, 10, 7), (30, 12, 7)]);
    assert_eq!((runner.buffer().width(), runner.buffer().height()), (30, 12));
    // Frame indices keep counting across the resize.
    assert_eq!(effect.frames, vec![0, 1, 2, 3]);
    // The whole new screen was repainted once: initial clear, resize clear
    // and the cleanup clear.
    assert_eq!(runner.terminal().inner.stats().clears, 3);
}
