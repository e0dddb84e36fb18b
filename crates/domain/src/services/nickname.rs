//! 昵称生成
//!
//! 昵称长度上限为 32 个字符，依次尝试三种格式直到满足上限。

use crate::value_objects::ComputingId;

/// 平台允许的昵称最大字符数
pub const MAX_LABEL_CHARS: usize = 32;

pub fn fits_label_bound(label: &str) -> bool {
    label.chars().count() <= MAX_LABEL_CHARS
}

/// 由全名和学生标识生成昵称。
///
/// 1. `全名 (标识)`
/// 2. `名字第一个词 (标识)`
/// 3. `第一个词首字母 (标识)`
///
/// 第三步仍超长时原样返回，由调用方决定如何处理。
pub fn derive_nickname(full_name: &str, identifier: &ComputingId) -> String {
    let full = format!("{} ({})", full_name, identifier);
    if fits_label_bound(&full) {
        return full;
    }

    let first_word = full_name.split_whitespace().next().unwrap_or_default();
    let short = format!("{} ({})", first_word, identifier);
    if fits_label_bound(&short) {
        return short;
    }

    let initial: String = first_word.chars().take(1).collect();
    format!("{} ({})", initial, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Jane Doe", "ab3ef", "Jane Doe (ab3ef)")]
    #[case("Alexander Wellington", "abc9xy", "Alexander Wellington (abc9xy)")]
    #[case(
        "Alexander Wellington Fitzgerald-Smythe",
        "abc9xy",
        "Alexander (abc9xy)"
    )]
    #[case(
        "Maximilianalexanderwellington Smythe",
        "abc9xy",
        "M (abc9xy)"
    )]
    fn test_truncation_cascade(
        #[case] full_name: &str,
        #[case] identifier: &str,
        #[case] expected: &str,
    ) {
        let label = derive_nickname(full_name, &ComputingId::normalize(identifier));
        assert_eq!(label, expected);
        assert!(fits_label_bound(&label));
    }

    #[test]
    fn test_full_form_exactly_at_bound_is_kept() {
        // 23 + 2 + 6 + 1 = 32
        let name = "Abcdefghij Klmnopqrstuv";
        let label = derive_nickname(name, &ComputingId::normalize("abc9xy"));
        assert_eq!(label.chars().count(), MAX_LABEL_CHARS);
        assert_eq!(label, format!("{} (abc9xy)", name));
    }

    #[test]
    fn test_over_length_after_last_step_is_returned_as_is() {
        let identifier = ComputingId::normalize(&"x".repeat(40));
        let label = derive_nickname("Jane Doe", &identifier);
        assert_eq!(label, format!("J ({})", "x".repeat(40)));
        assert!(!fits_label_bound(&label));
    }

    #[test]
    fn test_blank_name_does_not_panic() {
        let identifier = ComputingId::normalize("ab3ef");
        assert_eq!(derive_nickname("", &identifier), " (ab3ef)");
    }

    #[test]
    fn test_bound_counts_characters_not_bytes() {
        let name = "Zoë Ångström Éléonore Ø";
        let label = derive_nickname(name, &ComputingId::normalize("zz1"));
        assert_eq!(label, format!("{} (zz1)", name));
    }
}
