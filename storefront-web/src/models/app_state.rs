use std::rc::Rc;

use shared::router::{RouterAction, ViewRouter};
use yewdux::{Reducer, Store};

#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub router: ViewRouter,
}

impl Reducer<AppState> for RouterAction {
    fn apply(self, mut state: Rc<AppState>) -> Rc<AppState> {
        Rc::make_mut(&mut state).router.apply(self);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Session;
    use shared::router::Page;

    #[test]
    fn test_reducer_settles_router() {
        let state = Rc::new(AppState::default());
        let state = RouterAction::SessionChanged(Session::signed_out()).apply(state);
        assert_eq!(state.router.page(), Page::Auth);
    }

    #[test]
    fn test_reducer_does_not_touch_shared_snapshot() {
        let before = Rc::new(AppState::default());
        let after = RouterAction::Navigate(Page::Cart).apply(Rc::clone(&before));
        assert_eq!(before.router.page(), Page::Products);
        assert_eq!(after.router.page(), Page::Cart);
    }
}
