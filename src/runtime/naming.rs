//! Unique class names and owner slot encodings.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::model::constants::CLASS_SUFFIX_LEN;

/// Random alphanumeric string of `len` characters.
pub fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// `root` followed by a random suffix, so repeated runs and reloaded
/// libraries never collide on a class name.
pub fn unique_class_name(root: &str) -> String {
    let mut name = String::with_capacity(root.len() + CLASS_SUFFIX_LEN);
    name.push_str(root);
    name.push_str(&random_suffix(CLASS_SUFFIX_LEN));
    name
}

/// Type encoding of a pointer to an opaque struct, e.g. `^{ViewCore=}`.
pub fn owner_ivar_encoding(owner_type: &str) -> String {
    format!("^{{{owner_type}=}}")
}

/// Last path segment of a Rust type name: `nano_ui::a::ViewCore` → `ViewCore`.
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_length_and_alphabet() {
        let s = random_suffix(CLASS_SUFFIX_LEN);
        assert_eq!(s.len(), 10);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_unique_names_keep_root() {
        let a = unique_class_name("UIViewClassObject");
        let b = unique_class_name("UIViewClassObject");
        assert!(a.starts_with("UIViewClassObject"));
        assert_eq!(a.len(), "UIViewClassObject".len() + 10);
        assert_ne!(a, b);
    }

    #[test]
    fn test_owner_encoding() {
        assert_eq!(owner_ivar_encoding("ViewCore"), "^{ViewCore=}");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("nano_ui::platform::macos::ui::view::ViewCore"), "ViewCore");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper");
    }
}
