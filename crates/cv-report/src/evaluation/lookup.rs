/// Find the first item matching `predicate` and project it, falling back to `default`.
///
/// Only the first match is considered: if its projection yields `None`, later
/// duplicates are not consulted and `default` is returned.
pub fn lookup<T, R, P, F>(items: &[T], predicate: P, project: F, default: R) -> R
where
    P: Fn(&T) -> bool,
    F: FnOnce(&T) -> Option<R>,
{
    items
        .iter()
        .find(|item| predicate(*item))
        .and_then(project)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_projection_of_first_match() {
        let items = [("a", 1), ("b", 2), ("b", 3)];
        let found = lookup(&items, |item| item.0 == "b", |item| Some(item.1), 0);
        assert_eq!(found, 2);
    }

    #[test]
    fn falls_back_when_missing_or_projection_rejects() {
        let items = [("a", 1), ("b", 2)];
        assert_eq!(lookup(&items, |item| item.0 == "z", |item| Some(item.1), 9), 9);
        assert_eq!(
            lookup(&items, |item| item.0 == "a", |item| (item.1 > 5).then_some(item.1), 9),
            9
        );
    }
}
