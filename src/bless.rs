//! Binding models to the client that produced them.
//!
//! Models returned by resource methods are "blessed": they carry a
//! [`ClientHandle`] so they can issue follow-up calls (`user.friends()`,
//! `status.reply(..)`). The handle does not keep the client alive; once the
//! last [`TwitterClient`] clone is dropped, follow-up calls fail with
//! [`TwitterError::ClientReleased`].
//!
//! Only types implementing [`Bless`] can be blessed: single [`Bindable`]
//! models, `Vec`s of them, and `Option`s of either. Anything else is
//! rejected at compile time.

use std::fmt;
use std::ptr;
use std::sync::{Arc, Weak};

use crate::client::{ClientInner, TwitterClient};
use crate::error::{Result, TwitterError};

/// Non-owning reference from a model back to its client.
///
/// The default handle is unbound.
#[derive(Clone, Default)]
pub struct ClientHandle(Option<Weak<ClientInner>>);

impl ClientHandle {
    pub(crate) fn new(inner: Weak<ClientInner>) -> Self {
        Self(Some(inner))
    }

    /// Whether the handle was ever bound, live or not.
    pub fn is_bound(&self) -> bool {
        self.0.is_some()
    }

    /// The client, if it is still alive.
    pub fn client(&self) -> Result<TwitterClient> {
        self.0
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| TwitterClient { inner })
            .ok_or(TwitterError::ClientReleased)
    }

    /// Whether this handle points at `client` (or one of its clones).
    pub fn is_bound_to(&self, client: &TwitterClient) -> bool {
        self.0
            .as_ref()
            .is_some_and(|weak| ptr::eq(weak.as_ptr(), Arc::as_ptr(&client.inner)))
    }
}

/// Handles always compare equal: the back-reference is transient and never
/// affects model equality.
impl PartialEq for ClientHandle {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ClientHandle {}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("bound", &self.is_bound())
            .field("live", &self.0.as_ref().is_some_and(|weak| weak.strong_count() > 0))
            .finish()
    }
}

/// A model that can hold a back-reference to a client.
pub trait Bindable {
    /// Model name used in [`TwitterError::Unbound`].
    const MODEL: &'static str;

    fn set_client(&mut self, handle: ClientHandle);

    /// The handle, when the model has been bound.
    fn client_handle(&self) -> Option<&ClientHandle>;

    /// The bound client, for follow-up calls.
    fn bound_client(&self) -> Result<TwitterClient> {
        self.client_handle()
            .ok_or(TwitterError::Unbound { model: Self::MODEL })?
            .client()
    }
}

/// Values that can be bound to a client: a model, a collection of models,
/// or an absent value.
pub trait Bless: Sized {
    fn bless(self, client: &TwitterClient) -> Self;
}

impl<T: Bindable> Bless for Vec<T> {
    fn bless(mut self, client: &TwitterClient) -> Self {
        for model in &mut self {
            model.set_client(client.handle());
        }
        self
    }
}

impl<T: Bless> Bless for Option<T> {
    fn bless(self, client: &TwitterClient) -> Self {
        self.map(|value| value.bless(client))
    }
}

/// Implement [`Bindable`] and [`Bless`] for a model with a
/// `client: ClientHandle` field. Any listed `Option` fields holding nested
/// models are bound along with it.
macro_rules! impl_bindable {
    ($model:ty, $name:literal $(, $nested:ident)*) => {
        impl $crate::bless::Bindable for $model {
            const MODEL: &'static str = $name;

            fn set_client(&mut self, handle: $crate::bless::ClientHandle) {
                $(
                    if let Some(nested) = self.$nested.as_mut() {
                        use $crate::bless::Bindable as _;
                        nested.set_client(handle.clone());
                    }
                )*
                self.client = handle;
            }

            fn client_handle(&self) -> Option<&$crate::bless::ClientHandle> {
                Some(&self.client).filter(|handle| handle.is_bound())
            }
        }

        impl $crate::bless::Bless for $model {
            fn bless(mut self, client: &$crate::client::TwitterClient) -> Self {
                $crate::bless::Bindable::set_client(&mut self, client.handle());
                self
            }
        }
    };
}

pub(crate) use impl_bindable;
