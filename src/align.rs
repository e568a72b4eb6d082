//! Parallel-list alignment for semicolon-delimited sub-fields.
//!
//! Several raw columns hold semicolon-delimited lists that describe N
//! sibling line items positionally: position `i` across all lists is
//! one logical item. The alignment policy is fixed for the whole
//! pipeline: lists are zipped to the SHORTEST length and trailing
//! unmatched entries in longer lists are ignored. No entity gets a
//! different policy.

/// Split a raw field on `;`, trimming each element.
pub fn split_list(field: &str) -> Vec<&str> {
    field.split(';').map(str::trim).collect()
}

/// Zip two parallel lists, truncating to the shorter one.
pub fn zip_shortest2<'a>(
    a: &'a [&'a str],
    b: &'a [&'a str],
) -> impl Iterator<Item = (&'a str, &'a str)> {
    a.iter().copied().zip(b.iter().copied())
}

/// Zip three parallel lists, truncating to the shortest one.
pub fn zip_shortest3<'a>(
    a: &'a [&'a str],
    b: &'a [&'a str],
    c: &'a [&'a str],
) -> impl Iterator<Item = (&'a str, &'a str, &'a str)> {
    a.iter()
        .copied()
        .zip(b.iter().copied())
        .zip(c.iter().copied())
        .map(|((x, y), z)| (x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_elements() {
        assert_eq!(split_list("Cola; Pepsi ;Juice"), vec!["Cola", "Pepsi", "Juice"]);
    }

    #[test]
    fn test_split_list_keeps_empty_positions() {
        // Empty positions are the extractor's problem, not the splitter's.
        assert_eq!(split_list("a;;b"), vec!["a", "", "b"]);
        assert_eq!(split_list(""), vec![""]);
    }

    #[test]
    fn test_zip_shortest2_truncates() {
        let a = split_list("a;b;c");
        let b = split_list("1;2");
        let pairs: Vec<_> = zip_shortest2(&a, &b).collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_zip_shortest3_truncates_to_shortest() {
        let a = split_list("A;B;C");
        let b = split_list("1;2");
        let c = split_list("x;y;z");
        let triples: Vec<_> = zip_shortest3(&a, &b, &c).collect();
        assert_eq!(triples, vec![("A", "1", "x"), ("B", "2", "y")]);
    }
}
