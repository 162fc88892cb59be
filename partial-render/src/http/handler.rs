use crate::controller::Controller;

use std::ops::Deref;

/// A path and the controller serving it.
pub struct Handler {
    path: String,
    controller: Box<dyn Controller>,
}

impl Handler {
    pub fn new(path: &str, controller: impl Controller + 'static) -> Self {
        Self {
            path: path.to_string(),
            controller: Box::new(controller),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn controller_name(&self) -> &'static str {
        self.controller.controller_name()
    }
}

impl Deref for Handler {
    type Target = Box<dyn Controller>;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}
