//! Future-related utility code lives here.

use futures::*;

// Converts a concrete object implementing the `Future` trait into a `Box`ed
// trait object, so that a function can return a variety of futures with
// different concrete types while typing them all the same.
pub fn into_future_trait<F, I, E>(f: F) -> Box<Future<Item = I, Error = E> + Send>
where
    F: 'static + Send + Future<Item = I, Error = E>,
{
    Box::new(f)
}
