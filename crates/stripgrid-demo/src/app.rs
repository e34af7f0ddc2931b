use std::time::Duration;

use stripgrid_engine::core::{App, AppControl, FrameCtx};
use stripgrid_engine::input::{InputFrame, Key};
use stripgrid_engine::render::axes::{AxesConfig, AxesRenderer};
use stripgrid_engine::render::backend::StripBackend;
use stripgrid_engine::render::grid::{GridRenderer, ModeMachine, RenderMode};
use stripgrid_engine::render::{Color, Ortho};
use stripgrid_engine::time::FrameStats;

pub fn window_title(mode: RenderMode) -> String {
    format!("stripgrid [{}]", mode.label())
}

/// What key presses ask for, kept until a frame with a backend applies it.
#[derive(Debug, Default, PartialEq)]
struct Commands {
    exit: bool,
    mode: Option<RenderMode>,
    d_rows: i64,
    d_cols: i64,
}

impl Commands {
    fn from_input(input: &InputFrame, current: RenderMode) -> Self {
        let mut cmd = Commands::default();
        let mut mode = current;

        for &key in &input.keys_pressed {
            log::debug!("key {key}");
        }

        if input.pressed(Key::Escape) {
            cmd.exit = true;
            return cmd;
        }

        for _ in 0..input.triggered(Key::M) {
            mode = mode.next();
        }
        // Digits 1..=5 pick a mode directly.
        for key in &input.keys_pressed {
            if let Some(m) = key
                .digit()
                .and_then(|d| usize::from(d).checked_sub(1))
                .and_then(RenderMode::from_index)
            {
                mode = m;
            }
        }
        if mode != current {
            cmd.mode = Some(mode);
        }

        let count = |k: Key| input.triggered(k) as i64;
        cmd.d_rows = count(Key::ArrowUp) - count(Key::ArrowDown);
        cmd.d_cols = count(Key::ArrowRight) - count(Key::ArrowLeft);
        cmd
    }

    /// Folds this frame's input into the commands still waiting to be applied.
    fn absorb(&mut self, input: &InputFrame, current: RenderMode) {
        let next = Commands::from_input(input, self.mode.unwrap_or(current));
        self.exit |= next.exit;
        if next.mode.is_some() {
            self.mode = next.mode;
        }
        self.d_rows += next.d_rows;
        self.d_cols += next.d_cols;
    }

    /// Applies mode and size changes to `machine`.
    fn apply(self, machine: &mut ModeMachine, backend: &mut dyn StripBackend) {
        if let Some(mode) = self.mode {
            machine.set_mode(mode, backend);
        }
        if self.d_rows != 0 || self.d_cols != 0 {
            let resized = machine
                .dims()
                .resized(self.d_rows, self.d_cols)
                .and_then(|dims| machine.resize(dims, backend));
            if let Err(e) = resized {
                log::warn!("resize rejected: {e}");
            }
        }
    }
}

/// The interactive demo: one grid, one axes overlay, switchable modes.
pub struct GridApp {
    machine: ModeMachine,
    grid: GridRenderer,
    axes: AxesRenderer,
    stats: FrameStats,
    pending: Commands,
}

impl GridApp {
    pub fn new(machine: ModeMachine, axes: AxesConfig) -> Self {
        let ortho = Ortho::square(2.0);
        Self {
            machine,
            grid: GridRenderer::new(ortho, Color::WHITE),
            axes: AxesRenderer::new(axes, ortho),
            stats: FrameStats::new(Duration::from_secs(2)),
            pending: Commands::default(),
        }
    }
}

impl App for GridApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.pending.absorb(ctx.input_frame, self.machine.mode());
        if self.pending.exit {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        if let Some(report) = self.stats.record(ctx.time.now) {
            log::info!(
                "{:<24} {:7.1} fps  {:6.3} ms/frame",
                self.machine.mode().label(),
                report.fps(),
                report.mean_ms()
            );
        }

        let Self {
            machine,
            grid,
            axes,
            stats,
            pending,
        } = self;

        let mode_before = machine.mode();

        let control = ctx.render(Color::BLACK, |rctx, target| {
            {
                let mut backend = grid.backend(rctx);
                // Only cleared here: a skipped frame keeps its key presses.
                std::mem::take(pending).apply(machine, &mut backend);
                machine.draw(&mut backend);
            }

            axes.render(rctx, target);
            grid.render(rctx, target);
        });

        if machine.mode() != mode_before {
            stats.restart();
            ctx.window.set_title(&window_title(machine.mode()));
        }

        control
    }

    fn on_exit(&mut self) {
        log::debug!("leaving in mode {}", self.machine.mode());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripgrid_engine::input::{InputEvent, InputState, KeyState, Modifiers};
    use stripgrid_engine::render::backend::RecordingBackend;

    fn press(keys: &[Key]) -> InputFrame {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for &key in keys {
            for st in [KeyState::Pressed, KeyState::Released] {
                state.apply_event(
                    &mut frame,
                    InputEvent::Key {
                        key,
                        state: st,
                        modifiers: Modifiers::default(),
                        repeat: false,
                    },
                );
            }
        }
        frame
    }

    #[test]
    fn m_advances_mode() {
        let cmd = Commands::from_input(&press(&[Key::M]), RenderMode::VertexBufferObject);
        assert_eq!(cmd.mode, Some(RenderMode::Immediate));
    }

    #[test]
    fn digit_selects_mode() {
        let cmd = Commands::from_input(&press(&[Key::Digit4]), RenderMode::Immediate);
        assert_eq!(cmd.mode, Some(RenderMode::VertexArray));

        let same = Commands::from_input(&press(&[Key::Digit1]), RenderMode::Immediate);
        assert!(same.mode.is_none());
    }

    #[test]
    fn digits_outside_modes_ignored() {
        for key in [Key::Digit0, Key::Digit6, Key::Digit9] {
            let cmd = Commands::from_input(&press(&[key]), RenderMode::CachedVertices);
            assert!(cmd.mode.is_none(), "{key}");
        }
    }

    #[test]
    fn unapplied_commands_carry_to_next_frame() {
        let mut pending = Commands::default();
        let current = RenderMode::Immediate;

        // Frame N: `m` pressed, but the frame is skipped before applying.
        pending.absorb(&press(&[Key::M]), current);
        // Frame N + 1 adds more input on top.
        pending.absorb(&press(&[Key::M, Key::ArrowUp]), current);

        assert_eq!(
            pending,
            Commands {
                exit: false,
                mode: Some(RenderMode::CachedVertexIndices),
                d_rows: 1,
                d_cols: 0,
            }
        );

        let quiet = InputFrame::default();
        pending.absorb(&quiet, current);
        assert_eq!(pending.mode, Some(RenderMode::CachedVertexIndices));
    }

    #[test]
    fn apply_switches_mode_and_resizes() {
        let mut backend = RecordingBackend::new();
        let mesh = stripgrid_mesh::build(2, 2).unwrap();
        let mut machine = ModeMachine::new(mesh, RenderMode::Immediate);

        let mut pending = Commands::default();
        pending.absorb(&press(&[Key::Digit5, Key::ArrowRight]), machine.mode());
        std::mem::take(&mut pending).apply(&mut machine, &mut backend);

        assert_eq!(machine.mode(), RenderMode::VertexBufferObject);
        assert_eq!((machine.dims().rows(), machine.dims().cols()), (2, 3));
        assert_eq!(pending, Commands::default());
    }

    #[test]
    fn arrows_map_to_rows_and_cols() {
        let cmd = Commands::from_input(
            &press(&[Key::ArrowUp, Key::ArrowLeft]),
            RenderMode::Immediate,
        );
        assert_eq!((cmd.d_rows, cmd.d_cols), (1, -1));
        assert!(!cmd.exit);
    }

    #[test]
    fn escape_wins() {
        let cmd = Commands::from_input(&press(&[Key::M, Key::Escape]), RenderMode::Immediate);
        assert!(cmd.exit);
        assert!(cmd.mode.is_none());
    }

    #[test]
    fn title_names_mode() {
        assert!(window_title(RenderMode::VertexArray).contains(RenderMode::VertexArray.label()));
    }
}
