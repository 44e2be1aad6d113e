//! Scene contract
//!
//! Every screen implements [`SceneBehavior`]. The controller keeps a stack of
//! [`Scene`]s: the scene below the top is the predecessor a `Back` returns to,
//! and it resumes with all of its view state intact.
//!
//! A scene never switches screens itself. It parks a [`Transition`] in its
//! [`SceneCore`] and the next [`Scene::full_pass`] hands it to the controller.

use ratatui::{layout::Rect, Frame};

use crate::config::Settings;
use crate::storage::Store;

use super::dialogs::{BudgetEditor, Dialog, TransactionEditor};
use super::event::Input;
use super::views::{BudgetScene, HelpScene, MainMenu, OverviewScene, TransactionsScene};

/// What the active scene asks the controller to do next
#[derive(Debug)]
pub enum Transition {
    /// Open a scene on top of the current one
    Push(Box<Scene>),
    /// Return to the predecessor, handing it the finished scene
    Back,
    /// Leave the application
    Quit,
}

/// Per-scene render flag and pending-transition slot
#[derive(Debug)]
pub struct SceneCore {
    dirty: bool,
    pending: Option<Transition>,
}

impl Default for SceneCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCore {
    /// New scenes start dirty so their first frame is drawn
    pub fn new() -> Self {
        Self {
            dirty: true,
            pending: None,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn push(&mut self, scene: impl Into<Scene>) {
        self.pending = Some(Transition::Push(Box::new(scene.into())));
    }

    pub fn back(&mut self) {
        self.pending = Some(Transition::Back);
    }

    pub fn quit(&mut self) {
        self.pending = Some(Transition::Quit);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn take_pending(&mut self) -> Option<Transition> {
        self.pending.take()
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }
}

/// Shared resources lent to the active scene for one tick
pub struct Context<'a> {
    pub store: &'a mut Store,
    pub settings: &'a Settings,
    /// Current terminal area
    pub area: Rect,
}

/// The capability set every screen implements
pub trait SceneBehavior {
    fn core(&self) -> &SceneCore;

    fn core_mut(&mut self) -> &mut SceneCore;

    /// React to one input event
    fn handle_input(&mut self, input: Input, ctx: &mut Context<'_>);

    /// Recompute derived view state against the store and terminal size
    fn update(&mut self, ctx: &mut Context<'_>);

    /// Draw from the state computed by the last `update`
    fn render(&self, frame: &mut Frame, settings: &Settings);

    /// Called when the scene becomes active; `returned` is the scene that just
    /// finished when control comes back from a modal
    fn on_enter(&mut self, _ctx: &mut Context<'_>, _returned: Option<Scene>) {}

    /// Called when the scene stops being active
    fn on_exit(&mut self) {}

    /// Modal scenes are drawn over the scene beneath them
    fn is_modal(&self) -> bool {
        false
    }
}

/// Result of one [`Scene::full_pass`]
#[derive(Debug)]
pub enum Pass {
    /// Nothing changed on screen
    Idle,
    /// The scene is dirty and must be drawn
    Render,
    /// Switch scenes; nothing is drawn this frame
    Transition(Transition),
}

/// Every concrete screen
#[derive(Debug)]
pub enum Scene {
    MainMenu(MainMenu),
    Overview(OverviewScene),
    Transactions(TransactionsScene),
    Budget(BudgetScene),
    Help(HelpScene),
    TransactionEditor(TransactionEditor),
    BudgetEditor(BudgetEditor),
    Dialog(Dialog),
}

macro_rules! scene_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scene {
                fn from(scene: $ty) -> Self {
                    Scene::$variant(scene)
                }
            }
        )*
    };
}

scene_from! {
    MainMenu => MainMenu,
    Overview => OverviewScene,
    Transactions => TransactionsScene,
    Budget => BudgetScene,
    Help => HelpScene,
    TransactionEditor => TransactionEditor,
    BudgetEditor => BudgetEditor,
    Dialog => Dialog,
}

impl Scene {
    pub fn behavior(&self) -> &dyn SceneBehavior {
        match self {
            Scene::MainMenu(s) => s,
            Scene::Overview(s) => s,
            Scene::Transactions(s) => s,
            Scene::Budget(s) => s,
            Scene::Help(s) => s,
            Scene::TransactionEditor(s) => s,
            Scene::BudgetEditor(s) => s,
            Scene::Dialog(s) => s,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn SceneBehavior {
        match self {
            Scene::MainMenu(s) => s,
            Scene::Overview(s) => s,
            Scene::Transactions(s) => s,
            Scene::Budget(s) => s,
            Scene::Help(s) => s,
            Scene::TransactionEditor(s) => s,
            Scene::BudgetEditor(s) => s,
            Scene::Dialog(s) => s,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scene::MainMenu(_) => "main_menu",
            Scene::Overview(_) => "overview",
            Scene::Transactions(_) => "transactions",
            Scene::Budget(_) => "budget",
            Scene::Help(_) => "help",
            Scene::TransactionEditor(_) => "transaction_editor",
            Scene::BudgetEditor(_) => "budget_editor",
            Scene::Dialog(_) => "dialog",
        }
    }

    /// The option a finished dialog recorded, if this is one
    pub fn dialog_result(&self) -> Option<&str> {
        match self {
            Scene::Dialog(dialog) => dialog.result(),
            _ => None,
        }
    }

    pub fn is_modal(&self) -> bool {
        self.behavior().is_modal()
    }

    pub fn is_dirty(&self) -> bool {
        self.behavior().core().is_dirty()
    }

    pub fn clear_dirty(&mut self) {
        self.behavior_mut().core_mut().clear_dirty();
    }

    pub fn render(&self, frame: &mut Frame, settings: &Settings) {
        self.behavior().render(frame, settings);
    }

    /// Activate the scene; it is always redrawn afterwards
    pub fn enter(&mut self, ctx: &mut Context<'_>, returned: Option<Scene>) {
        let scene = self.behavior_mut();
        scene.on_enter(ctx, returned);
        scene.core_mut().mark_dirty();
    }

    /// Deactivate the scene; a stale transition never survives the trip back
    pub fn exit(&mut self) {
        let scene = self.behavior_mut();
        scene.on_exit();
        scene.core_mut().clear_pending();
    }

    /// One frame of the per-tick contract: input, then update, then decide
    /// whether to draw. A parked transition short-circuits the update.
    pub fn full_pass(&mut self, input: Option<Input>, ctx: &mut Context<'_>) -> Pass {
        let scene = self.behavior_mut();

        if let Some(input) = input {
            if !matches!(input, Input::Resize { .. }) {
                scene.handle_input(input, ctx);
            }
            scene.core_mut().mark_dirty();
        }

        if let Some(transition) = scene.core_mut().take_pending() {
            return Pass::Transition(transition);
        }

        scene.update(ctx);

        if let Some(transition) = scene.core_mut().take_pending() {
            return Pass::Transition(transition);
        }

        if scene.core().is_dirty() {
            Pass::Render
        } else {
            Pass::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context_parts() -> (TempDir, Store, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("budget_data.json")).unwrap();
        (temp_dir, store, Settings::default())
    }

    #[test]
    fn test_core_starts_dirty_without_pending() {
        let core = SceneCore::new();
        assert!(core.is_dirty());
        assert!(!core.has_pending());
    }

    #[test]
    fn test_pending_transition_short_circuits() {
        let (_temp, mut store, settings) = context_parts();
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area: Rect::new(0, 0, 80, 24),
        };

        let mut scene = Scene::from(MainMenu::new());
        scene.clear_dirty();
        assert!(matches!(scene.full_pass(None, &mut ctx), Pass::Idle));

        assert!(matches!(
            scene.full_pass(Some(Input::Esc), &mut ctx),
            Pass::Transition(Transition::Back)
        ));
    }

    #[test]
    fn test_resize_only_dirties() {
        let (_temp, mut store, settings) = context_parts();
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area: Rect::new(0, 0, 80, 24),
        };

        let mut scene = Scene::from(MainMenu::new());
        scene.clear_dirty();
        let pass = scene.full_pass(
            Some(Input::Resize {
                width: 100,
                height: 40,
            }),
            &mut ctx,
        );
        assert!(matches!(pass, Pass::Render));
    }

    #[test]
    fn test_exit_clears_pending_and_enter_dirties() {
        let (_temp, mut store, settings) = context_parts();
        let mut ctx = Context {
            store: &mut store,
            settings: &settings,
            area: Rect::new(0, 0, 80, 24),
        };

        let mut scene = Scene::from(MainMenu::new());
        scene.behavior_mut().core_mut().quit();
        scene.exit();
        assert!(!scene.behavior().core().has_pending());

        scene.clear_dirty();
        scene.enter(&mut ctx, None);
        assert!(scene.is_dirty());
    }

    #[test]
    fn test_dialog_result_accessor() {
        let mut dialog = Dialog::confirm("Delete?");
        dialog.choose(0);
        let scene = Scene::from(dialog);
        assert_eq!(scene.dialog_result(), Some("Yes"));
        assert_eq!(Scene::from(MainMenu::new()).dialog_result(), None);
    }
}
