//! Deterministic name ordering for enumeration responses.

/// Anything listed by name: containers in an account, objects in a container.
pub trait Named {
    fn name(&self) -> &str;
}

/// Collect `items` sorted ascending by name (byte-wise, case sensitive).
///
/// The result does not depend on the iteration order of the source map.
pub fn ordered_by_name<'a, T, I>(items: I) -> Vec<&'a T>
where
    T: Named + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut sorted: Vec<&T> = items.into_iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));
    sorted
}
