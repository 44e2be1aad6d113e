//! Scene controller
//!
//! Owns the store, the settings and the scene stack, and drives one
//! [`Scene::full_pass`] per input poll. Generic over the ratatui backend so the
//! whole interface can run against a `TestBackend`.

use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};
use tracing::debug;

use crate::config::Settings;
use crate::error::FinmanResult;
use crate::storage::Store;

use super::event::{Input, InputSource};
use super::scene::{Context, Pass, Scene, Transition};
use super::views::MainMenu;

/// Drives the active scene and applies the transitions it requests
pub struct Controller<B: Backend> {
    terminal: Terminal<B>,
    store: Store,
    settings: Settings,
    /// Bottom is the root menu, top is the active scene
    stack: Vec<Scene>,
    running: bool,
}

impl<B: Backend> Controller<B> {
    pub fn new(terminal: Terminal<B>, store: Store, settings: Settings) -> Self {
        Self {
            terminal,
            store,
            settings,
            stack: vec![Scene::from(MainMenu::new())],
            running: true,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// The active scene
    pub fn current(&self) -> Option<&Scene> {
        self.stack.last()
    }

    /// Number of scenes on the stack, root included
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Poll and step until a scene asks to quit
    pub fn run<S: InputSource>(&mut self, events: &mut S) -> FinmanResult<()> {
        while self.running {
            let input = events.poll()?;
            self.step(input)?;
        }
        Ok(())
    }

    /// One tick. Transitions chain without input until a scene settles.
    /// Returns false once the application should exit.
    pub fn step(&mut self, input: Option<Input>) -> FinmanResult<bool> {
        let mut input = input;
        while self.running {
            match self.pass(input.take())? {
                Some(transition) => self.apply(transition),
                None => break,
            }
        }
        Ok(self.running)
    }

    fn area(&self) -> FinmanResult<Rect> {
        let size = self.terminal.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn pass(&mut self, input: Option<Input>) -> FinmanResult<Option<Transition>> {
        let area = self.area()?;
        let Some(scene) = self.stack.last_mut() else {
            self.running = false;
            return Ok(None);
        };

        let mut ctx = Context {
            store: &mut self.store,
            settings: &self.settings,
            area,
        };

        match scene.full_pass(input, &mut ctx) {
            Pass::Transition(transition) => Ok(Some(transition)),
            Pass::Render => {
                self.draw()?;
                if let Some(scene) = self.stack.last_mut() {
                    scene.clear_dirty();
                }
                Ok(None)
            }
            Pass::Idle => Ok(None),
        }
    }

    fn draw(&mut self) -> FinmanResult<()> {
        let Self {
            terminal,
            stack,
            settings,
            ..
        } = self;
        terminal.draw(|frame| render_stack(frame, stack, settings))?;
        Ok(())
    }

    fn apply(&mut self, transition: Transition) {
        let area = match self.area() {
            Ok(area) => area,
            Err(_) => Rect::default(),
        };

        match transition {
            Transition::Quit => {
                debug!("Quit requested");
                self.running = false;
            }
            Transition::Push(scene) => {
                let mut scene = *scene;
                if let Some(current) = self.stack.last_mut() {
                    current.exit();
                    debug!(from = current.name(), to = scene.name(), "Push scene");
                }
                let mut ctx = Context {
                    store: &mut self.store,
                    settings: &self.settings,
                    area,
                };
                scene.enter(&mut ctx, None);
                self.stack.push(scene);
            }
            Transition::Back => {
                if self.stack.len() <= 1 {
                    debug!("Back at root, quitting");
                    self.running = false;
                    return;
                }
                let Some(mut finished) = self.stack.pop() else {
                    return;
                };
                finished.exit();
                if let Some(parent) = self.stack.last_mut() {
                    debug!(from = finished.name(), to = parent.name(), "Back");
                    let mut ctx = Context {
                        store: &mut self.store,
                        settings: &self.settings,
                        area,
                    };
                    parent.enter(&mut ctx, Some(finished));
                }
            }
        }
    }
}

/// Draw the active scene, preceded by every scene it is layered over
fn render_stack(frame: &mut Frame, stack: &[Scene], settings: &Settings) {
    let Some(top) = stack.len().checked_sub(1) else {
        return;
    };
    let mut base = top;
    while base > 0 && stack[base].is_modal() {
        base -= 1;
    }
    for scene in &stack[base..] {
        scene.render(frame, settings);
    }
}
