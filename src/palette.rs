pub const PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F06292", "#AED581", "#7986CB",
    "#4DB6AC", "#DCE775",
];

/// Stable color for a teacher name: the first UTF-16 code unit modulo the
/// palette size. Names sharing a first character share a color; an empty
/// name gets the first palette entry.
pub fn course_color(teacher_name: &str) -> &'static str {
    match teacher_name.encode_utf16().next() {
        Some(unit) => PALETTE[unit as usize % PALETTE.len()],
        None => PALETTE[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_color_is_stable() {
        assert_eq!(course_color("王老师"), course_color("王老师"));
        assert_eq!(course_color("王老师"), course_color("王小明"));
    }

    #[test]
    fn test_course_color_is_in_palette() {
        for name in ["Alice", "Bob", "张三", "李四", "Unknown Teacher"] {
            assert!(PALETTE.contains(&course_color(name)));
        }
    }

    #[test]
    fn test_course_color_ascii_index() {
        // 'A' is 65, and 65 % 10 == 5.
        assert_eq!(course_color("Alice"), PALETTE[5]);
    }

    #[test]
    fn test_course_color_empty_name_falls_back() {
        assert_eq!(course_color(""), PALETTE[0]);
    }
}
