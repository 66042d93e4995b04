//! Type-erased handler storage.

use std::any::{self, Any, TypeId};
use std::fmt;

use crate::error::HandlerResult;

/// Token returned by [`EventBus::subscribe`](crate::EventBus::subscribe).
///
/// Closures have no identity, so the id is what `unsubscribe` matches on.
/// Every subscribe call yields a fresh id, even for the same closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

type ErasedHandler = Box<dyn Fn(&dyn Any) -> HandlerResult>;

/// A (payload type, handler) pair registered under one topic.
pub(crate) struct Subscription {
    id: SubscriptionId,
    payload_type: TypeId,
    payload_name: &'static str,
    handler: ErasedHandler,
}

impl Subscription {
    pub(crate) fn new<P, F>(id: SubscriptionId, handler: F) -> Self
    where
        P: 'static,
        F: Fn(&P) -> HandlerResult + 'static,
    {
        let handler: ErasedHandler = Box::new(move |payload: &dyn Any| {
            match payload.downcast_ref::<P>() {
                Some(payload) => handler(payload),
                // Callers check `accepts` first.
                None => Ok(()),
            }
        });

        Self {
            id,
            payload_type: TypeId::of::<P>(),
            payload_name: any::type_name::<P>(),
            handler,
        }
    }

    pub(crate) fn id(&self) -> SubscriptionId {
        self.id
    }

    pub(crate) fn payload_name(&self) -> &'static str {
        self.payload_name
    }

    pub(crate) fn accepts(&self, payload_type: TypeId) -> bool {
        self.payload_type == payload_type
    }

    pub(crate) fn invoke(&self, payload: &dyn Any) -> HandlerResult {
        (self.handler)(payload)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("payload", &self.payload_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn accepts_only_the_registered_payload_type() {
        let sub = Subscription::new(SubscriptionId::new(1), |_: &u32| Ok(()));
        assert!(sub.accepts(TypeId::of::<u32>()));
        assert!(!sub.accepts(TypeId::of::<i32>()));
        assert!(!sub.accepts(TypeId::of::<String>()));
    }

    #[test]
    fn invoke_downcasts_payload() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let sub = Subscription::new(SubscriptionId::new(7), move |value: &u32| {
            sink.set(*value);
            Ok(())
        });

        sub.invoke(&42u32).unwrap();
        assert_eq!(seen.get(), 42);
        assert_eq!(sub.id().get(), 7);
    }

    #[test]
    fn invoke_with_foreign_payload_is_a_no_op() {
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        let sub = Subscription::new(SubscriptionId::new(1), move |_: &bool| {
            flag.set(true);
            Ok(())
        });

        sub.invoke(&"not a bool").unwrap();
        assert!(!called.get());
    }
}
