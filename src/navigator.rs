//! Navigation abstraction
//!
//! The API client uses it to force the browser onto the login view when the
//! backend rejects the bearer token.

pub trait Navigator {
    fn redirect(&self, path: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Navigator;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every redirect instead of performing it
    #[derive(Clone, Default)]
    pub struct RecordingNavigator {
        pub visits: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingNavigator {
        pub fn visits(&self) -> Vec<String> {
            self.visits.borrow().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn redirect(&self, path: &str) {
            self.visits.borrow_mut().push(path.to_string());
        }
    }
}
