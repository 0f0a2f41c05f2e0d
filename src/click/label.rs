use crate::dom::node::LabelSource;

/// Shown when an element has no value, text or alt.
pub const NO_TEXT_PLACEHOLDER: &str = "(テキストなし)";

/// First candidate that is not blank, trimmed; the placeholder otherwise.
pub fn select_label<I, S>(candidates: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .find_map(|c| {
            let trimmed = c.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| NO_TEXT_PLACEHOLDER.to_string())
}

/// The on-screen wording of an element: value, then visible text, then alt.
pub fn element_label<N: LabelSource>(node: &N) -> String {
    select_label([node.value(), node.visible_text(), node.alt()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_blank_candidate_wins() {
        assert_eq!(select_label(["", "  Buy  ", "alt"]), "Buy");
        assert_eq!(select_label(["ok", "text", "alt"]), "ok");
    }

    #[test]
    fn whitespace_only_candidates_are_skipped() {
        assert_eq!(select_label([" \n", "", "pic"]), "pic");
    }

    #[test]
    fn placeholder_when_nothing_is_present() {
        assert_eq!(select_label(["", "", ""]), NO_TEXT_PLACEHOLDER);
        assert_eq!(select_label(Vec::<String>::new()), NO_TEXT_PLACEHOLDER);
    }
}
