/// Cuts `s` at its first NUL character.
#[inline]
pub fn rtrim_null (s: &str) -> &str {
    match s.find('\0') {
        Some(idx) => &s[..idx],
        None => s
    }
}

/// Splits `s` on `delim`. An empty string yields an empty list.
pub fn split (s: &str, delim: char) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    s.split(delim).map(String::from).collect()
}

/// Joins `items` with `sep` between each pair.
#[inline]
pub fn join<T: AsRef<str>> (sep: &str, items: &[T]) -> String {
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_at_first_nul () {
        assert_eq!(rtrim_null("vec_add\0\0"), "vec_add");
        assert_eq!(rtrim_null("abc"), "abc");
        assert_eq!(rtrim_null("\0abc"), "");
    }

    #[test]
    fn split_names () {
        assert_eq!(split("vec_add;vec_sub", ';'), vec!["vec_add", "vec_sub"]);
        assert_eq!(split("one", ';'), vec!["one"]);
        assert!(split("", ';').is_empty());
    }

    #[test]
    fn join_items () {
        assert_eq!(join(", ", &["a", "b", "c"]), "a, b, c");
        assert_eq!(join::<&str>(";", &[]), "");
    }
}
