//! Headless harnesses for exercising models and components in plain
//! `#[test]` functions, without a terminal or a tokio runtime.

use crate::command::{Command, CommandInner};
use crate::component::Component;
use crate::model::Model;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// Drives a [`Model`] synchronously.
///
/// Immediate messages returned from `update` are queued and can be flushed
/// with [`drain_messages`](TestProgram::drain_messages); deferred work is
/// dropped.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Showcase>::new(());
/// prog.send(Msg::Table(data_table::Message::ToggleAll));
/// prog.drain_messages();
/// assert_eq!(prog.model().selected.len(), 5);
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: Vec<M::Message>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and queue any immediate messages it returns.
    pub fn new(flags: M::Flags) -> Self {
        let (model, cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: Vec::new(),
            quit: false,
        };
        program.collect(cmd);
        program
    }

    /// Run one update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Feed queued messages back into `update` until none remain.
    pub fn drain_messages(&mut self) {
        while !self.pending.is_empty() {
            let batch: Vec<_> = self.pending.drain(..).collect();
            for msg in batch {
                let cmd = self.model.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Whether any update asked to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render to a buffer of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        draw(width, height, |frame| self.model.view(frame))
    }

    /// Render and return the screen as newline-separated rows.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None | CommandInner::Future(_) => {}
            CommandInner::Message(msg) => self.pending.push(msg),
            CommandInner::Quit => self.quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

/// Render a single component into a `width` x `height` screen and return
/// its rows joined by newlines.
pub fn render_component<C: Component>(component: &C, width: u16, height: u16) -> String {
    buffer_to_string(&draw(width, height, |frame| {
        let area = frame.area();
        component.view(frame, area);
    }))
}

/// Flatten a buffer into newline-separated rows of cell symbols.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(width: u16, height: u16, f: impl FnOnce(&mut ratatui::Frame)) -> Buffer {
    let mut terminal = match Terminal::new(TestBackend::new(width, height)) {
        Ok(terminal) => terminal,
        Err(err) => panic!("test backend cannot fail: {err}"),
    };
    if let Err(err) = terminal.draw(f) {
        panic!("drawing to the test backend failed: {err}");
    }
    terminal.backend().buffer().clone()
}
