//! Conversion of "one fragment or many" arguments into fragment lists

/// Trait for types that can be converted to an ordered list of SQL fragments
/// (column expressions, predicates).
pub trait IntoFragments {
    fn into_fragments(self) -> Vec<String>;
}

impl IntoFragments for &str {
    fn into_fragments(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoFragments for String {
    fn into_fragments(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoFragments for &String {
    fn into_fragments(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>> IntoFragments for Vec<S> {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String> + Clone> IntoFragments for &[S] {
    fn into_fragments(self) -> Vec<String> {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoFragments for [S; N] {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}
