//! Advisory notices
//!
//! Advisories are informational, never errors.
//! They are delivered to a [`Notify`] implementation injected by the caller.

use core::sync::atomic::{AtomicBool, Ordering};

/// Topic of an advisory notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory
{
    /// A negative component index was resolved relative to the number of non-zero components.
    IndexReinterpreted,
    /// Swapped singular components are not re-orthogonalized.
    SwapQuality,
}

/// Receiver of advisory notices.
pub trait Notify
{
    fn notify(&self, topic: Advisory, msg: &str);
}

impl<T: Fn(Advisory, &str)> Notify for T
{
    fn notify(&self, topic: Advisory, msg: &str)
    {
        self(topic, msg)
    }
}

/// Forwards advisories to the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotify;

impl Notify for LogNotify
{
    fn notify(&self, topic: Advisory, msg: &str)
    {
        match topic {
            Advisory::IndexReinterpreted => log::info!("{}", msg),
            Advisory::SwapQuality => log::warn!("{}", msg),
        }
    }
}

/// Discards advisories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notify for Silent
{
    fn notify(&self, _topic: Advisory, _msg: &str) {}
}

/// Forwards only the first advisory of each topic.
///
/// One instance held for the process lifetime, e.g. in a `static`,
/// gives at-most-once-per-process notices.
#[derive(Debug)]
pub struct NotifyOnce<N>
{
    inner: N,
    index_done: AtomicBool,
    swap_done: AtomicBool,
}

impl<N> NotifyOnce<N>
{
    /// Wraps `inner`.
    pub const fn new(inner: N) -> Self
    {
        NotifyOnce {
            inner,
            index_done: AtomicBool::new(false),
            swap_done: AtomicBool::new(false),
        }
    }
}

impl<N: Notify> Notify for NotifyOnce<N>
{
    fn notify(&self, topic: Advisory, msg: &str)
    {
        let done = match topic {
            Advisory::IndexReinterpreted => &self.index_done,
            Advisory::SwapQuality => &self.swap_done,
        };

        if !done.swap(true, Ordering::Relaxed) {
            self.inner.notify(topic, msg);
        }
    }
}

//

#[test]
fn test_notify_once()
{
    use std::cell::RefCell;

    let seen = RefCell::new(Vec::new());
    let record = |topic: Advisory, msg: &str| seen.borrow_mut().push((topic, msg.to_string()));

    let once = NotifyOnce::new(record);
    once.notify(Advisory::SwapQuality, "a");
    once.notify(Advisory::SwapQuality, "b");
    once.notify(Advisory::IndexReinterpreted, "c");
    once.notify(Advisory::IndexReinterpreted, "d");
    drop(once);

    assert_eq!(seen.into_inner(), vec![
        (Advisory::SwapQuality, "a".to_string()),
        (Advisory::IndexReinterpreted, "c".to_string()),
    ]);
}
