use core::fmt;

/// Comma delimited
pub(super) struct Comma<'a, T>(pub(super) &'a [T]);

impl<T: fmt::Display> fmt::Display for Comma<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = "";
        for item in self.0 {
            write!(f, "{s}{item}")?;
            s = ", ";
        }
        Ok(())
    }
}
