//! Liveness tokens for work that completes after the scene may be gone.
//!
//! A [`SceneLifetime`] hands out cheap [`LiveToken`]s. Once the lifetime is
//! retired (or dropped) every token it issued reports dead, so a late image
//! decode or file read can check before touching scene state.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
pub struct SceneLifetime {
    alive: Rc<Cell<bool>>,
}

#[derive(Clone, Debug)]
pub struct LiveToken {
    alive: Rc<Cell<bool>>,
}

impl SceneLifetime {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn token(&self) -> LiveToken {
        LiveToken {
            alive: self.alive.clone(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn retire(&self) {
        self.alive.set(false);
    }

    /// Retire every outstanding token and start a fresh generation.
    pub fn renew(&mut self) {
        self.retire();
        self.alive = Rc::new(Cell::new(true));
    }
}

impl Default for SceneLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SceneLifetime {
    fn drop(&mut self) {
        self.retire();
    }
}

impl LiveToken {
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Run `f` only while the issuing lifetime is still alive.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        self.is_alive().then(f)
    }
}
