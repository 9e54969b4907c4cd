//! Caller-scoped locale order
//!
//! The order decides which locale a plain string is filed under (the first
//! entry, the *preview locale*) and in which order renderers lay out the
//! translations.
//!
//! # Scoping
//!
//! State lives in thread-local storage, so one thread never sees another
//! thread's order. Code running on a tokio runtime must wrap its work in
//! [`LocaleOrderRegistry::scope`]: inside the scope the order is held in a
//! tokio task-local and reads and writes never touch the worker thread's
//! order, nor any other task's. Writes from a runtime task outside a scope
//! fail with [`FieldError::UnscopedAsyncWrite`].
//!
//! The default order is `[platform default locale]`, captured once on first use.

use std::cell::RefCell;
use std::future::Future;
use std::sync::{
    Arc,
    LazyLock,
};

use crate::error::FieldError;
use crate::locale::Locale;

/// Immutable snapshot of a locale order
pub type LocaleOrder = Arc<[Locale]>;

/// Platform locale captured at first registry use
static PLATFORM_DEFAULT: LazyLock<Locale> = LazyLock::new(|| {
    let locale = Locale::platform_default();
    tracing::debug!("Captured platform default locale '{locale}'");
    locale
});

thread_local! {
    /// Order for code running outside a task scope
    static THREAD_ORDER: RefCell<LocaleOrder> = RefCell::new(default_order());
}

tokio::task_local! {
    /// Order for code running inside [`LocaleOrderRegistry::scope`]
    static TASK_ORDER: RefCell<LocaleOrder>;
}

/// The single-element default order
fn default_order() -> LocaleOrder {
    Arc::from([PLATFORM_DEFAULT.clone()])
}

/// Access to the caller-scoped locale order
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleOrderRegistry;

impl LocaleOrderRegistry {
    /// Replaces the caller's order with a snapshot of `locales`.
    ///
    /// An empty order is accepted, but [`LocaleOrderRegistry::preview_locale`]
    /// fails until a non-empty one is set.
    ///
    /// # Errors
    /// `UnscopedAsyncWrite` when called on a tokio runtime outside
    /// [`LocaleOrderRegistry::scope`]
    pub fn set_locales(locales: impl IntoIterator<Item = Locale>) -> Result<(), FieldError> {
        let order: LocaleOrder = locales.into_iter().collect();
        tracing::debug!("Setting locale order: {:?}", tags(&order));
        replace(order)
    }

    /// The caller's current order
    #[must_use]
    pub fn locales() -> LocaleOrder {
        TASK_ORDER
            .try_with(|order| Arc::clone(&order.borrow()))
            .unwrap_or_else(|_| THREAD_ORDER.with(|order| Arc::clone(&order.borrow())))
    }

    /// The first locale of the caller's order
    ///
    /// # Errors
    /// `EmptyLocaleOrder` when the order is empty
    pub fn preview_locale() -> Result<Locale, FieldError> {
        Self::locales().first().cloned().ok_or(FieldError::EmptyLocaleOrder)
    }

    /// Restores the default order for the caller
    ///
    /// # Errors
    /// `UnscopedAsyncWrite`, as for [`LocaleOrderRegistry::set_locales`]
    pub fn reset() -> Result<(), FieldError> {
        tracing::debug!("Resetting locale order");
        replace(default_order())
    }

    /// The platform locale the default order is built from
    #[must_use]
    pub fn platform_default() -> Locale {
        PLATFORM_DEFAULT.clone()
    }

    /// Runs `future` with its own locale order.
    ///
    /// Changes made inside the scope stay inside it.
    pub async fn scope<F: Future>(locales: impl IntoIterator<Item = Locale>, future: F) -> F::Output {
        let order: LocaleOrder = locales.into_iter().collect();
        tracing::trace!("Entering task scope with locale order: {:?}", tags(&order));
        TASK_ORDER.scope(RefCell::new(order), future).await
    }

    /// Runs `f` with its own locale order, synchronously
    pub fn sync_scope<R>(locales: impl IntoIterator<Item = Locale>, f: impl FnOnce() -> R) -> R {
        let order: LocaleOrder = locales.into_iter().collect();
        TASK_ORDER.sync_scope(RefCell::new(order), f)
    }
}

/// Stores `order` in the innermost scope of the caller.
///
/// Worker threads are shared between tasks, so outside a task scope the
/// thread order is only writable when no runtime is driving the caller.
fn replace(order: LocaleOrder) -> Result<(), FieldError> {
    let stored = TASK_ORDER.try_with(|current| {
        current.replace(Arc::clone(&order));
    });
    if stored.is_ok() {
        return Ok(());
    }
    if tokio::runtime::Handle::try_current().is_ok() {
        tracing::warn!("Rejected locale order {:?} written outside a task scope", tags(&order));
        return Err(FieldError::UnscopedAsyncWrite);
    }
    THREAD_ORDER.with(|current| {
        current.replace(order);
    });
    Ok(())
}

/// Tags of an order, for logging
fn tags(order: &[Locale]) -> Vec<&str> {
    order.iter().map(Locale::tag).collect()
}
