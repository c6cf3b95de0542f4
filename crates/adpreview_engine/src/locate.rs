pub const INDEX_ENTRY_SUFFIX: &str = "index.html";

/// First entry whose name ends with `index.html`, in archive order.
pub fn find_index_entry(names: &[String]) -> Option<&str> {
    names
        .iter()
        .map(String::as_str)
        .find(|name| name.ends_with(INDEX_ENTRY_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::find_index_entry;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_name_matches() {
        let entries = names(&["style.css", "index.html"]);
        assert_eq!(find_index_entry(&entries), Some("index.html"));
    }

    #[test]
    fn nested_entry_matches_by_suffix() {
        let entries = names(&["assets/", "assets/logo.png", "assets/index.html"]);
        assert_eq!(find_index_entry(&entries), Some("assets/index.html"));
    }

    #[test]
    fn first_match_wins() {
        let entries = names(&["b/index.html", "index.html"]);
        assert_eq!(find_index_entry(&entries), Some("b/index.html"));
    }

    #[test]
    fn no_match_without_suffix() {
        let entries = names(&["index.htm", "index.html.bak", "main.html"]);
        assert_eq!(find_index_entry(&entries), None);
        assert_eq!(find_index_entry(&[]), None);
    }
}
