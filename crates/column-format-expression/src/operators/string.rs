/// Joins reduced operands left to right.
pub fn concat<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    parts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_in_order() {
        assert_eq!(concat(vec!["42".to_owned(), "%".to_owned()]), "42%");
        assert_eq!(concat(Vec::<String>::new()), "");
    }
}
