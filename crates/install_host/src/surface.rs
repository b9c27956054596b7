//! Prompt-surface contracts: the rendering port between the UI machine and the document.
//!
//! A surface owns one DOM subtree for the lifetime of one prompt instance. The UI machine
//! describes what to show as a pure [`PromptView`]; the surface decides how to draw it.

use std::{cell::RefCell, rc::Rc};

/// Pure description of one prompt card state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptView {
    /// Interactive card with explicit install and dismiss actions.
    Interactive {
        /// Application name shown under the title.
        app_name: String,
        /// Icon URL for the header.
        icon_url: String,
        /// Card title.
        title: String,
        /// Card description.
        description: String,
        /// Install button label.
        install_label: String,
        /// Dismiss button label.
        dismiss_label: String,
    },
    /// Step-by-step guidance for platforms without a native prompt.
    Guided {
        /// Application name shown under the title.
        app_name: String,
        /// Icon URL for the header.
        icon_url: String,
        /// Card title.
        title: String,
        /// Card description.
        description: String,
        /// Dismiss button label.
        dismiss_label: String,
        /// The three ordered instruction steps.
        steps: [String; 3],
    },
    /// Installing placeholder with a spinner.
    Installing {
        /// Application name shown in the header.
        app_name: String,
        /// Icon URL for the header.
        icon_url: String,
        /// Short status line.
        status: String,
        /// Longer hint under the spinner.
        detail: String,
    },
    /// Success card shown after a confirmed installation.
    Success {
        /// Success title.
        title: String,
        /// Success description.
        description: String,
    },
}

/// User-action callbacks a surface binds to its rendered controls.
#[derive(Clone)]
pub struct PromptActions {
    /// Invoked when the install control is activated; absent for views without one.
    pub on_install: Option<Rc<dyn Fn()>>,
    /// Invoked when the dismiss or close control is activated.
    pub on_dismiss: Rc<dyn Fn()>,
}

/// Host service drawing prompt views into the document.
pub trait PromptSurface {
    /// Builds the subtree for `view` and binds `actions` to its controls.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is unavailable or the subtree cannot be attached.
    fn mount(&self, view: &PromptView, actions: PromptActions) -> Result<(), String>;

    /// Replaces the card content with `view`, keeping the mounted subtree.
    fn swap(&self, view: &PromptView);

    /// Starts the fixed fade/slide-out animation.
    fn begin_exit(&self);

    /// Detaches the subtree from the document.
    fn detach(&self);
}

/// Factory creating one surface per prompt instance.
pub trait PromptSurfaceFactory {
    /// Creates a fresh surface themed with `theme_color`.
    fn create(&self, theme_color: &str) -> Rc<dyn PromptSurface>;
}

/// One observable step in a [`MemorySurface`]'s life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// `mount` was called with this view.
    Mounted(PromptView),
    /// `swap` was called with this view.
    Swapped(PromptView),
    /// `begin_exit` was called.
    ExitBegan,
    /// `detach` was called.
    Detached,
}

#[derive(Default)]
/// Recording surface for tests; exposes bound actions so tests can simulate clicks.
pub struct MemorySurface {
    events: RefCell<Vec<SurfaceEvent>>,
    actions: RefCell<Option<PromptActions>>,
}

impl MemorySurface {
    /// Every event observed so far, in order.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    /// The most recently mounted or swapped view, if any.
    pub fn current_view(&self) -> Option<PromptView> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            SurfaceEvent::Mounted(view) | SurfaceEvent::Swapped(view) => Some(view.clone()),
            _ => None,
        })
    }

    /// Simulates the user activating the install control.
    pub fn click_install(&self) {
        let action = self
            .actions
            .borrow()
            .as_ref()
            .and_then(|actions| actions.on_install.clone());
        if let Some(action) = action {
            action();
        }
    }

    /// Simulates the user activating the dismiss control.
    pub fn click_dismiss(&self) {
        let action = self.actions.borrow().as_ref().map(|actions| actions.on_dismiss.clone());
        if let Some(action) = action {
            action();
        }
    }
}

impl PromptSurface for MemorySurface {
    fn mount(&self, view: &PromptView, actions: PromptActions) -> Result<(), String> {
        self.events
            .borrow_mut()
            .push(SurfaceEvent::Mounted(view.clone()));
        *self.actions.borrow_mut() = Some(actions);
        Ok(())
    }

    fn swap(&self, view: &PromptView) {
        self.events
            .borrow_mut()
            .push(SurfaceEvent::Swapped(view.clone()));
    }

    fn begin_exit(&self) {
        self.events.borrow_mut().push(SurfaceEvent::ExitBegan);
    }

    fn detach(&self) {
        self.events.borrow_mut().push(SurfaceEvent::Detached);
    }
}

#[derive(Default)]
/// Factory handing out [`MemorySurface`]s and retaining them for inspection.
pub struct MemorySurfaceFactory {
    created: RefCell<Vec<Rc<MemorySurface>>>,
}

impl MemorySurfaceFactory {
    /// Surfaces created so far, in order.
    pub fn created(&self) -> Vec<Rc<MemorySurface>> {
        self.created.borrow().clone()
    }

    /// The most recently created surface, if any.
    pub fn last(&self) -> Option<Rc<MemorySurface>> {
        self.created.borrow().last().cloned()
    }
}

impl PromptSurfaceFactory for MemorySurfaceFactory {
    fn create(&self, _theme_color: &str) -> Rc<dyn PromptSurface> {
        let surface = Rc::new(MemorySurface::default());
        self.created.borrow_mut().push(surface.clone());
        surface
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Factory for targets that cannot render; mounts fail.
pub struct NoopSurfaceFactory;

struct NoopSurface;

impl PromptSurface for NoopSurface {
    fn mount(&self, _view: &PromptView, _actions: PromptActions) -> Result<(), String> {
        Err("prompt surface unavailable".to_string())
    }

    fn swap(&self, _view: &PromptView) {}

    fn begin_exit(&self) {}

    fn detach(&self) {}
}

impl PromptSurfaceFactory for NoopSurfaceFactory {
    fn create(&self, _theme_color: &str) -> Rc<dyn PromptSurface> {
        Rc::new(NoopSurface)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn success_view() -> PromptView {
        PromptView::Success {
            title: "Installed".to_string(),
            description: "Launch it from your desktop".to_string(),
        }
    }

    #[test]
    fn memory_surface_records_lifecycle_and_routes_clicks() {
        let surface = MemorySurface::default();
        let dismissed = Rc::new(Cell::new(0));
        let counter = dismissed.clone();

        surface
            .mount(
                &success_view(),
                PromptActions {
                    on_install: None,
                    on_dismiss: Rc::new(move || counter.set(counter.get() + 1)),
                },
            )
            .expect("mount");
        surface.click_install();
        surface.click_dismiss();
        surface.begin_exit();
        surface.detach();

        assert_eq!(dismissed.get(), 1);
        assert_eq!(
            surface.events(),
            vec![
                SurfaceEvent::Mounted(success_view()),
                SurfaceEvent::ExitBegan,
                SurfaceEvent::Detached,
            ]
        );
    }

    #[test]
    fn current_view_tracks_the_latest_swap() {
        let surface = MemorySurface::default();
        surface
            .mount(
                &success_view(),
                PromptActions {
                    on_install: None,
                    on_dismiss: Rc::new(|| {}),
                },
            )
            .expect("mount");
        let swapped = PromptView::Installing {
            app_name: "App".to_string(),
            icon_url: String::new(),
            status: "Installing".to_string(),
            detail: "Confirm in the browser popup".to_string(),
        };
        surface.swap(&swapped);
        assert_eq!(surface.current_view(), Some(swapped));
    }
}
