use dioxus::prelude::*;
use tokio::sync::watch;

/// Mirrors a store's watch channel into a signal for as long as the
/// component lives.
pub fn use_watch<T: Clone + 'static>(subscribe: impl FnOnce() -> watch::Receiver<T>) -> Signal<T> {
    let receiver = use_hook(subscribe);
    let mut state = use_signal({
        let receiver = receiver.clone();
        move || receiver.borrow().clone()
    });

    use_future(move || {
        let mut receiver = receiver.clone();
        async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                state.set(next);
            }
        }
    });

    state
}
