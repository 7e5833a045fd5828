use std::fmt::{self, Debug, Display, Formatter};

/// Debug-formats a value by calling a closure.
pub struct FormatDebugWith<F>(pub F)
where
    F: Fn(&mut Formatter<'_>) -> fmt::Result;

impl<F> Debug for FormatDebugWith<F>
where
    F: Fn(&mut Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        (self.0)(f)
    }
}

/// Debug-formats a value using its `Display` impl, so strings print
/// without quotes.
pub struct FormatDebugAs<T: Display>(pub T);

impl<T: Display> Debug for FormatDebugAs<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
