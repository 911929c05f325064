use std::cell::RefCell;
use std::rc::Rc;

/// A test value which increments a shared counter every time an instance is dropped, for checking
/// that collections free exactly the nodes they own.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new() -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(0)))
    }

    pub fn count(&self) -> usize {
        *self.0.borrow()
    }
}

impl Default for CountedDrop {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}
